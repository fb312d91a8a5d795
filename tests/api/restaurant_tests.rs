//! Restaurant API Tests

use axum::http::{header, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{assert_error, json_body, TestApp};

#[tokio::test]
async fn test_get_all_sorted_by_name() {
    let app = TestApp::new().await;

    let body = json_body(app.get("/restaurants/").await).await;

    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Astoria", "Bistro", "Cafe Pushkin"]);
}

#[tokio::test]
async fn test_get_restaurant() {
    let app = TestApp::new().await;
    let id = app.fixtures.restaurant_3;

    let response = app.get(&format!("/restaurants/{}", id)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({ "id": id, "name": "Cafe Pushkin" })
    );
}

#[tokio::test]
async fn test_get_restaurant_not_found() {
    let app = TestApp::new().await;

    let response = app.get("/restaurants/1").await;

    assert_error(response, StatusCode::UNPROCESSABLE_ENTITY, "DATA_NOT_FOUND").await;
}

#[tokio::test]
async fn test_create_restaurant() {
    let app = TestApp::new().await;

    let response = app
        .send_json("POST", "/restaurants/", &json!({ "name": "Dacha" }))
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response.headers()[header::LOCATION]
        .to_str()
        .unwrap()
        .to_owned();
    let created = json_body(response).await;
    assert_eq!(location, format!("/restaurants/{}", created["id"]));
    assert_eq!(json_body(app.get(&location).await).await, created);
}

#[tokio::test]
async fn test_create_duplicate_restaurant() {
    let app = TestApp::new().await;

    let response = app
        .send_json("POST", "/restaurants/", &json!({ "name": "Bistro" }))
        .await;

    assert_error(response, StatusCode::CONFLICT, "DATA_ERROR").await;
}

#[tokio::test]
async fn test_create_invalid_restaurant() {
    let app = TestApp::new().await;

    let response = app
        .send_json("POST", "/restaurants/", &json!({ "name": "X" }))
        .await;

    assert_error(response, StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR").await;
}
