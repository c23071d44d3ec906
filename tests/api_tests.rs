use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use motor_platform::config::environment::EnvironmentConfig;
use motor_platform::testing::{make, FakeCatalog};
use motor_platform::{create_router, AppState};

struct TestApp {
    state: AppState,
    catalog: Arc<FakeCatalog>,
}

async fn create_test_app() -> TestApp {
    let makes = (1..=23).map(|i| make(i, &format!("MAKE {}", i))).collect();
    let catalog = Arc::new(FakeCatalog::new(makes));
    let state = AppState::new(EnvironmentConfig::default(), catalog.clone());
    state.store.fetch_vehicles().await.unwrap();
    TestApp { state, catalog }
}

impl TestApp {
    fn router(&self) -> Router {
        create_router(self.state.clone())
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        send(self.router(), request).await
    }

    async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        send(self.router(), request).await
    }
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

fn sam_loan() -> Value {
    json!({
        "holder_name": "Sam",
        "time": "2024-01-01T10:00:00Z",
        "checkout_type": "loan"
    })
}

fn clean_return() -> Value {
    json!({
        "return_time": "2024-01-01T12:00:00Z",
        "condition": "clean"
    })
}

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app().await;
    let (status, body) = app.get("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["vehicles"], 23);
}

#[tokio::test]
async fn test_list_first_page_defaults_to_ten() {
    let app = create_test_app().await;
    let (status, body) = app.get("/api/vehicles").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"].as_array().unwrap().len(), 10);
    assert_eq!(body["page"], 1);
    assert_eq!(body["total"], 23);
    assert_eq!(body["total_pages"], 3);
    assert_eq!(body["has_previous"], false);
    assert_eq!(body["has_next"], true);
    assert_eq!(body["items"][0]["status"], "available");
}

#[tokio::test]
async fn test_list_last_page_and_custom_size() {
    let app = create_test_app().await;

    let (_, body) = app.get("/api/vehicles?page=3").await;
    assert_eq!(body["items"].as_array().unwrap().len(), 3);
    assert_eq!(body["has_next"], false);

    let (_, body) = app.get("/api/vehicles?page=2&per_page=20").await;
    assert_eq!(body["items"].as_array().unwrap().len(), 3);
    assert_eq!(body["items"][0]["id"], 21);
}

#[tokio::test]
async fn test_checkout_and_checkin_flow() {
    let app = create_test_app().await;

    let (status, body) = app.post("/api/vehicles/1/checkout", sam_loan()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "checked_out");
    assert_eq!(body["data"]["holder_name"], "Sam");
    assert_eq!(body["data"]["checkout_type"], "loan");
    assert_eq!(body["message"], "Vehículo entregado exitosamente (Loan)");

    let (_, other) = app.get("/api/vehicles/2").await;
    assert_eq!(other["status"], "available");

    let (status, body) = app.post("/api/vehicles/1/checkin", clean_return()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "available");
    assert_eq!(body["data"]["condition"], "clean");
    assert!(body["data"].get("holder_name").is_none());
}

#[tokio::test]
async fn test_unknown_vehicle_is_404() {
    let app = create_test_app().await;

    let (status, body) = app.post("/api/vehicles/999/checkout", sam_loan()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    let (status, _) = app.get("/api/vehicles/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_details_are_400() {
    let app = create_test_app().await;

    let (status, body) = app
        .post(
            "/api/vehicles/1/checkout",
            json!({ "holder_name": "", "time": "2024-01-01T10:00:00Z" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, _) = app
        .post(
            "/api/vehicles/1/checkout",
            json!({ "holder_name": "Sam", "time": "noon" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, vehicle) = app.get("/api/vehicles/1").await;
    assert_eq!(vehicle["status"], "available");
}

#[tokio::test]
async fn test_malformed_bodies_are_400_json() {
    let app = create_test_app().await;

    let (status, body) = app
        .post(
            "/api/vehicles/1/checkout",
            json!({ "holder_name": "Sam", "time": "2024-01-01T10:00:00Z", "checkout_type": "rental" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_DETAILS");
    assert!(body["message"].as_str().unwrap().contains("checkout_type"));

    let (status, body) = app
        .post("/api/vehicles/1/checkout", json!({ "holder_name": "Sam" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_DETAILS");
    assert!(body["message"].as_str().unwrap().contains("time"));

    app.post("/api/vehicles/2/checkout", sam_loan()).await;
    let (status, body) = app
        .post("/api/vehicles/2/checkin", json!({ "condition": "clean" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_DETAILS");

    let request = Request::builder()
        .method("POST")
        .uri("/api/vehicles/1/checkout")
        .header("content-type", "application/json")
        .body(Body::from("{\"holder_name\": "))
        .unwrap();
    let (status, body) = send(app.router(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_DETAILS");

    let (_, vehicle) = app.get("/api/vehicles/1").await;
    assert_eq!(vehicle["status"], "available");
    let (_, vehicle) = app.get("/api/vehicles/2").await;
    assert_eq!(vehicle["status"], "checked_out");
}

#[tokio::test]
async fn test_second_checkin_is_conflict() {
    let app = create_test_app().await;
    app.post("/api/vehicles/3/checkout", sam_loan()).await;
    app.post("/api/vehicles/3/checkin", clean_return()).await;

    let (status, body) = app.post("/api/vehicles/3/checkin", clean_return()).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "INVALID_TRANSITION");
}

#[tokio::test]
async fn test_refresh_overwrites_checkouts() {
    let app = create_test_app().await;
    app.post("/api/vehicles/1/checkout", sam_loan()).await;

    let (status, body) = app.post("/api/vehicles/refresh", Value::Null).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["count"], 23);
    assert_eq!(body["data"]["policy"], "replace");
    assert_eq!(app.catalog.calls(), 2);

    let (_, vehicle) = app.get("/api/vehicles/1").await;
    assert_eq!(vehicle["status"], "available");
}

#[tokio::test]
async fn test_refresh_failure_is_502_and_keeps_list() {
    let app = create_test_app().await;
    app.post("/api/vehicles/1/checkout", sam_loan()).await;
    app.catalog.set_failing(true);

    let (status, body) = app.post("/api/vehicles/refresh", Value::Null).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], "CATALOG_ERROR");

    let (_, vehicle) = app.get("/api/vehicles/1").await;
    assert_eq!(vehicle["status"], "checked_out");
}

#[tokio::test]
async fn test_about_and_fallback() {
    let app = create_test_app().await;

    let (status, body) = app.get("/api/about").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "MotorPlatform");
    assert_eq!(body["values"].as_array().unwrap().len(), 3);

    let (status, body) = app.get("/vehicle-list").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["home"], "/api/vehicles");
}
