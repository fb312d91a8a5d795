//! Menu API Tests

use axum::http::{header, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{assert_error, date, ids, json_body, TestApp};

#[tokio::test]
async fn test_get_all_orders_newest_first() {
    let app = TestApp::new().await;
    let f = &app.fixtures;

    let response = app.get("/menus/").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(
        ids(&body),
        vec![f.menu_5, f.menu_3, f.menu_4, f.menu_1, f.menu_2]
    );
}

#[tokio::test]
async fn test_get_returns_dishes_sorted_by_name() {
    let app = TestApp::new().await;
    let f = &app.fixtures;

    let response = app
        .get(&format!("/menus/{}/{}", f.restaurant_2, f.menu_3))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["id"], f.menu_3);
    assert_eq!(body["date"], "2019-06-11");
    assert_eq!(body["restaurant_id"], f.restaurant_2);
    let names: Vec<&str> = body["dishes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Fries", "Steak"]);
}

#[tokio::test]
async fn test_get_not_found() {
    let app = TestApp::new().await;

    let response = app
        .get(&format!("/menus/{}/0", app.fixtures.restaurant_2))
        .await;

    assert_error(response, StatusCode::UNPROCESSABLE_ENTITY, "DATA_NOT_FOUND").await;
}

#[tokio::test]
async fn test_get_under_other_restaurant_not_found() {
    let app = TestApp::new().await;
    let f = &app.fixtures;

    let response = app
        .get(&format!("/menus/{}/{}", f.restaurant_2, f.menu_1))
        .await;

    assert_error(response, StatusCode::UNPROCESSABLE_ENTITY, "DATA_NOT_FOUND").await;
}

#[tokio::test]
async fn test_create_with_location() {
    let app = TestApp::new().await;
    let f = &app.fixtures;
    let body = json!({
        "id": null,
        "date": "2019-06-20",
        "dishes": [
            { "id": f.dish_1, "name": "Borscht", "price": 250 },
            { "name": "Kvass", "price": 90 }
        ]
    });

    let response = app
        .send_json("POST", &format!("/menus/{}", f.restaurant_2), &body)
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_owned();
    let created = json_body(response).await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(location, format!("/menus/{}/{}", f.restaurant_2, id));
    assert_eq!(created["date"], "2019-06-20");
    assert_eq!(created["restaurant_id"], f.restaurant_2);

    // Submitted dish ids are ignored; fresh rows are created
    let dish_ids: Vec<i64> = created["dishes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["id"].as_i64().unwrap())
        .collect();
    assert_eq!(dish_ids.len(), 2);
    assert!(!dish_ids.contains(&f.dish_1));

    let fetched = json_body(app.get(&location).await).await;
    assert_eq!(fetched, created);

    let all = json_body(app.get("/menus/").await).await;
    assert_eq!(ids(&all).len(), 6);
    assert!(ids(&all).contains(&id));
}

#[tokio::test]
async fn test_create_invalid() {
    let app = TestApp::new().await;

    let response = app
        .send_json(
            "POST",
            &format!("/menus/{}", app.fixtures.restaurant_3),
            &json!({ "id": null, "date": null }),
        )
        .await;

    assert_error(response, StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR").await;
    assert_eq!(ids(&json_body(app.get("/menus/").await).await).len(), 5);
}

#[tokio::test]
async fn test_create_invalid_dish() {
    let app = TestApp::new().await;

    let response = app
        .send_json(
            "POST",
            &format!("/menus/{}", app.fixtures.restaurant_3),
            &json!({ "date": "2019-06-20", "dishes": [{ "name": "", "price": -1 }] }),
        )
        .await;

    assert_error(response, StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR").await;
}

#[tokio::test]
async fn test_create_with_id_rejected() {
    let app = TestApp::new().await;

    let response = app
        .send_json(
            "POST",
            &format!("/menus/{}", app.fixtures.restaurant_3),
            &json!({ "id": 42, "date": "2019-06-20" }),
        )
        .await;

    assert_error(response, StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR").await;
}

#[tokio::test]
async fn test_create_for_unknown_restaurant() {
    let app = TestApp::new().await;

    let response = app
        .send_json("POST", "/menus/1", &json!({ "date": "2019-06-20" }))
        .await;

    assert_error(response, StatusCode::UNPROCESSABLE_ENTITY, "DATA_NOT_FOUND").await;
}

#[tokio::test]
async fn test_create_duplicate() {
    let app = TestApp::new().await;

    let response = app
        .send_json(
            "POST",
            &format!("/menus/{}", app.fixtures.restaurant_3),
            &json!({ "id": null, "date": "2019-06-11" }),
        )
        .await;

    assert_error(response, StatusCode::CONFLICT, "DATA_ERROR").await;
    let by_date = json_body(app.get("/menus/byDate?date=2019-06-11").await).await;
    assert_eq!(ids(&by_date).len(), 2);
}

#[tokio::test]
async fn test_update() {
    let app = TestApp::new().await;
    let f = &app.fixtures;
    let uri = format!("/menus/{}/{}", f.restaurant_1, f.menu_1);

    let response = app
        .send_json(
            "PUT",
            &uri,
            &json!({
                "id": f.menu_1,
                "date": "3000-01-01",
                "dishes": [{ "name": "Okroshka", "price": 220 }]
            }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let updated = json_body(app.get(&uri).await).await;
    assert_eq!(updated["date"], "3000-01-01");
    assert_eq!(updated["dishes"].as_array().unwrap().len(), 1);
    assert_eq!(updated["dishes"][0]["name"], "Okroshka");

    // Replaced dishes are gone
    let old_dish = app.get(&format!("/dishes/{}", f.dish_1)).await;
    assert_error(old_dish, StatusCode::UNPROCESSABLE_ENTITY, "DATA_NOT_FOUND").await;
}

#[tokio::test]
async fn test_update_invalid() {
    let app = TestApp::new().await;
    let f = &app.fixtures;
    let uri = format!("/menus/{}/{}", f.restaurant_2, f.menu_2);

    let response = app
        .send_json("PUT", &uri, &json!({ "id": f.menu_2, "date": null }))
        .await;

    assert_error(response, StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR").await;
    let unchanged = json_body(app.get(&uri).await).await;
    assert_eq!(unchanged["date"], "2019-06-10");
}

#[tokio::test]
async fn test_update_id_mismatch() {
    let app = TestApp::new().await;
    let f = &app.fixtures;

    let response = app
        .send_json(
            "PUT",
            &format!("/menus/{}/{}", f.restaurant_2, f.menu_2),
            &json!({ "id": f.menu_3, "date": "2019-06-20" }),
        )
        .await;

    assert_error(response, StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR").await;
}

#[tokio::test]
async fn test_update_duplicate() {
    let app = TestApp::new().await;
    let f = &app.fixtures;
    let uri = format!("/menus/{}/{}", f.restaurant_2, f.menu_2);

    let response = app
        .send_json("PUT", &uri, &json!({ "id": f.menu_2, "date": "2019-06-11" }))
        .await;

    assert_error(response, StatusCode::CONFLICT, "DATA_ERROR").await;
    let unchanged = json_body(app.get(&uri).await).await;
    assert_eq!(unchanged["date"], "2019-06-10");
    assert_eq!(unchanged["dishes"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_update_not_found() {
    let app = TestApp::new().await;

    let response = app
        .send_json(
            "PUT",
            &format!("/menus/{}/0", app.fixtures.restaurant_1),
            &json!({ "date": "2019-06-20" }),
        )
        .await;

    assert_error(response, StatusCode::UNPROCESSABLE_ENTITY, "DATA_NOT_FOUND").await;
}

#[tokio::test]
async fn test_delete() {
    let app = TestApp::new().await;
    let f = &app.fixtures;
    let uri = format!("/menus/{}/{}", f.restaurant_1, f.menu_1);
    let dishes_before = app.store.dish_count();

    let response = app.delete(&uri).await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let all = json_body(app.get("/menus/").await).await;
    assert_eq!(ids(&all), vec![f.menu_5, f.menu_3, f.menu_4, f.menu_2]);
    assert_error(app.get(&uri).await, StatusCode::UNPROCESSABLE_ENTITY, "DATA_NOT_FOUND").await;
    assert_error(
        app.get(&format!("/dishes/{}", f.dish_1)).await,
        StatusCode::UNPROCESSABLE_ENTITY,
        "DATA_NOT_FOUND",
    )
    .await;
    assert_eq!(app.store.dish_count(), dishes_before - 2);
}

#[tokio::test]
async fn test_delete_not_found() {
    let app = TestApp::new().await;

    let response = app
        .delete(&format!("/menus/{}/0", app.fixtures.restaurant_2))
        .await;

    assert_error(response, StatusCode::UNPROCESSABLE_ENTITY, "DATA_NOT_FOUND").await;
}

#[tokio::test]
async fn test_find_by_date() {
    let app = TestApp::new().await;
    let f = &app.fixtures;

    let response = app.get("/menus/byDate?date=2019-06-11").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(ids(&json_body(response).await), vec![f.menu_3, f.menu_4]);
}

#[tokio::test]
async fn test_find_by_restaurant() {
    let app = TestApp::new().await;
    let f = &app.fixtures;

    let response = app
        .get(&format!("/menus/byRestaurant?restaurant_id={}", f.restaurant_2))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(ids(&json_body(response).await), vec![f.menu_3, f.menu_2]);
}

#[tokio::test]
async fn test_get_dish() {
    let app = TestApp::new().await;
    let f = &app.fixtures;

    let response = app.get(&format!("/dishes/{}", f.dish_1)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["menu_id"], f.menu_1);
    assert_eq!(body["name"], "Borscht");
    assert_eq!(body["price"], 250);
}

#[tokio::test]
async fn test_creates_minus_deletes() {
    let app = TestApp::new().await;
    let f = &app.fixtures;
    let mut created = Vec::new();

    for day in 20..24 {
        let response = app
            .send_json(
                "POST",
                &format!("/menus/{}", f.restaurant_3),
                &json!({ "date": date(2019, 6, day) }),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        created.push(json_body(response).await["id"].as_i64().unwrap());
    }
    for id in &created[..3] {
        let response = app
            .delete(&format!("/menus/{}/{}", f.restaurant_3, id))
            .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    let all = ids(&json_body(app.get("/menus/").await).await);
    assert_eq!(all.len(), 5 + 4 - 3);
    assert!(all.contains(&created[3]));
}
