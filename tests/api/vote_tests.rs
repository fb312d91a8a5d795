//! Vote API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{assert_error, at, json_body, today, TestApp};

async fn publish_today(app: &TestApp, restaurant_id: i64) {
    let response = app
        .send_json(
            "POST",
            &format!("/menus/{}", restaurant_id),
            &json!({ "date": today(), "dishes": [{ "name": "Lagman", "price": 320 }] }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_first_vote_is_created() {
    let app = TestApp::new().await;
    let r1 = app.fixtures.restaurant_1;

    let response = app.post_as(&format!("/votes/{}", r1), 1).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    assert_eq!(body["restaurant_id"], r1);
    assert_eq!(body["date"], "2019-06-12");

    let own = json_body(app.get_as("/votes/own", 1).await).await;
    assert_eq!(own, body);
}

#[tokio::test]
async fn test_vote_requires_user() {
    let app = TestApp::new().await;

    let response = app
        .send_json("POST", &format!("/votes/{}", app.fixtures.restaurant_1), &json!({}))
        .await;

    assert_error(response, StatusCode::UNAUTHORIZED, "UNAUTHORIZED").await;
}

#[tokio::test]
async fn test_vote_without_menu_today_rejected() {
    let app = TestApp::new().await;

    let response = app
        .post_as(&format!("/votes/{}", app.fixtures.restaurant_2), 1)
        .await;

    assert_error(response, StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR").await;
}

#[tokio::test]
async fn test_vote_for_unknown_restaurant() {
    let app = TestApp::new().await;

    let response = app.post_as("/votes/1", 1).await;

    assert_error(response, StatusCode::UNPROCESSABLE_ENTITY, "DATA_NOT_FOUND").await;
}

#[tokio::test]
async fn test_change_vote_before_deadline() {
    let app = TestApp::new().await;
    let f = &app.fixtures;
    publish_today(&app, f.restaurant_2).await;
    app.post_as(&format!("/votes/{}", f.restaurant_1), 7).await;

    app.clock.set(at(10, 59));
    let response = app.post_as(&format!("/votes/{}", f.restaurant_2), 7).await;

    assert_eq!(response.status(), StatusCode::OK);
    let own = json_body(app.get_as("/votes/own", 7).await).await;
    assert_eq!(own["restaurant_id"], f.restaurant_2);
}

#[tokio::test]
async fn test_change_vote_after_deadline_closed() {
    let app = TestApp::new().await;
    let f = &app.fixtures;
    publish_today(&app, f.restaurant_2).await;
    app.post_as(&format!("/votes/{}", f.restaurant_1), 7).await;

    app.clock.set(at(11, 0));
    let response = app.post_as(&format!("/votes/{}", f.restaurant_2), 7).await;

    assert_error(response, StatusCode::CONFLICT, "VOTE_CLOSED").await;
    let own = json_body(app.get_as("/votes/own", 7).await).await;
    assert_eq!(own["restaurant_id"], f.restaurant_1);
}

#[tokio::test]
async fn test_first_vote_after_deadline_accepted() {
    let app = TestApp::new().await;
    app.clock.set(at(13, 30));

    let response = app
        .post_as(&format!("/votes/{}", app.fixtures.restaurant_1), 3)
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_own_vote_not_found() {
    let app = TestApp::new().await;

    let response = app.get_as("/votes/own?date=2019-06-10", 1).await;

    assert_error(response, StatusCode::UNPROCESSABLE_ENTITY, "DATA_NOT_FOUND").await;
}

#[tokio::test]
async fn test_results_count_one_vote_per_user() {
    let app = TestApp::new().await;
    let f = &app.fixtures;
    publish_today(&app, f.restaurant_2).await;
    for user in [1, 2] {
        app.post_as(&format!("/votes/{}", f.restaurant_1), user).await;
    }
    app.post_as(&format!("/votes/{}", f.restaurant_1), 3).await;
    app.post_as(&format!("/votes/{}", f.restaurant_2), 3).await;
    app.post_as(&format!("/votes/{}", f.restaurant_2), 4).await;

    let response = app.get("/votes/results").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!([
            { "restaurant_id": f.restaurant_1, "restaurant_name": "Astoria", "votes": 2 },
            { "restaurant_id": f.restaurant_2, "restaurant_name": "Bistro", "votes": 2 }
        ])
    );

    let other_day = json_body(app.get("/votes/results?date=2019-06-11").await).await;
    assert_eq!(other_day, json!([]));
}
