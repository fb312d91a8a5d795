//! Common Test Utilities
//!
//! Shared helpers, fixtures, and test infrastructure.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    response::Response,
    Router,
};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::Value;
use tower::ServiceExt;

use restaurant_voting::config::Settings;
use restaurant_voting::domain::{Dish, Menu, MenuRepository, RestaurantRepository};
use restaurant_voting::infrastructure::repositories::InMemoryStore;
use restaurant_voting::shared::clock::{Clock, FixedClock};
use restaurant_voting::startup::{build_router, AppState};

/// Date of the last seeded menu; the test clock starts on it.
pub fn today() -> NaiveDate {
    date(2019, 6, 12)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn at(hour: u32, minute: u32) -> NaiveDateTime {
    today().and_hms_opt(hour, minute, 0).unwrap()
}

/// Ids of the seeded rows.
///
/// | menu   | restaurant | date       |
/// |--------|------------|------------|
/// | menu_1 | r1         | 2019-06-10 |
/// | menu_2 | r2         | 2019-06-10 |
/// | menu_3 | r2         | 2019-06-11 |
/// | menu_4 | r3         | 2019-06-11 |
/// | menu_5 | r1         | 2019-06-12 |
#[derive(Debug, Clone)]
pub struct Fixtures {
    pub restaurant_1: i64,
    pub restaurant_2: i64,
    pub restaurant_3: i64,
    pub menu_1: i64,
    pub menu_2: i64,
    pub menu_3: i64,
    pub menu_4: i64,
    pub menu_5: i64,
    /// A dish of menu_1
    pub dish_1: i64,
}

/// Test application over the in-memory backend
pub struct TestApp {
    pub router: Router,
    pub store: InMemoryStore,
    pub clock: Arc<FixedClock>,
    pub fixtures: Fixtures,
}

async fn seed_menu(store: &InMemoryStore, restaurant_id: i64, day: NaiveDate, dishes: &[(&str, i64)]) -> Menu {
    let menu = Menu::new(None, day)
        .with_restaurant(restaurant_id)
        .with_dishes(dishes.iter().map(|(name, price)| Dish::new(*name, *price)));
    store.save(&menu).await.unwrap()
}

impl TestApp {
    /// Create a seeded test application; the clock reads 10:00 on `today()`.
    pub async fn new() -> Self {
        let store = InMemoryStore::new();

        let restaurant_1 = RestaurantRepository::create(&store, "Astoria").await.unwrap().id;
        let restaurant_2 = RestaurantRepository::create(&store, "Bistro").await.unwrap().id;
        let restaurant_3 = RestaurantRepository::create(&store, "Cafe Pushkin").await.unwrap().id;

        let menu_1 = seed_menu(
            &store,
            restaurant_1,
            date(2019, 6, 10),
            &[("Borscht", 250), ("Pelmeni", 400)],
        )
        .await;
        let menu_2 = seed_menu(&store, restaurant_2, date(2019, 6, 10), &[("Caesar", 350)]).await;
        let menu_3 = seed_menu(
            &store,
            restaurant_2,
            date(2019, 6, 11),
            &[("Steak", 900), ("Fries", 150)],
        )
        .await;
        let menu_4 = seed_menu(&store, restaurant_3, date(2019, 6, 11), &[("Blini", 200)]).await;
        let menu_5 = seed_menu(&store, restaurant_1, today(), &[("Solyanka", 300)]).await;

        let fixtures = Fixtures {
            restaurant_1,
            restaurant_2,
            restaurant_3,
            menu_1: menu_1.id.unwrap(),
            menu_2: menu_2.id.unwrap(),
            menu_3: menu_3.id.unwrap(),
            menu_4: menu_4.id.unwrap(),
            menu_5: menu_5.id.unwrap(),
            dish_1: menu_1.dishes()[0].id.unwrap(),
        };

        let clock = Arc::new(FixedClock::new(at(10, 0)));
        let state = AppState::in_memory(
            store.clone(),
            clock.clone() as Arc<dyn Clock>,
            NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
        );
        let settings = Settings::defaults().unwrap();

        Self {
            router: build_router(state, &settings),
            store,
            clock,
            fixtures,
        }
    }

    async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Make a GET request to the application
    pub async fn get(&self, uri: &str) -> Response {
        self.send(
            Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    /// Make a GET request as a user
    pub async fn get_as(&self, uri: &str, user_id: i64) -> Response {
        self.send(
            Request::builder()
                .method("GET")
                .uri(uri)
                .header("X-User-Id", user_id.to_string())
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    /// Make a request with a JSON body
    pub async fn send_json(&self, method: &str, uri: &str, body: &Value) -> Response {
        self.send(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    /// Make a DELETE request
    pub async fn delete(&self, uri: &str) -> Response {
        self.send(
            Request::builder()
                .method("DELETE")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    /// Make an empty POST request as a user
    pub async fn post_as(&self, uri: &str, user_id: i64) -> Response {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("X-User-Id", user_id.to_string())
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }
}

/// Read a response body as JSON
pub async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert status and error `type` of an error response
pub async fn assert_error(response: Response, status: StatusCode, error_type: &str) {
    assert_eq!(response.status(), status);
    let body = json_body(response).await;
    assert_eq!(body["type"], error_type, "unexpected error body: {}", body);
    assert_eq!(body["code"], status.as_u16());
}

/// Menu ids of a JSON array response, in response order
pub fn ids(body: &Value) -> Vec<i64> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|m| m["id"].as_i64().unwrap())
        .collect()
}
