mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use common::{InMemoryClicks, InMemoryMappings, TestStores};
use utm_tracker::api::handlers::health_handler;

fn server(stores: &TestStores) -> TestServer {
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(stores.state(false));

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_health_ok() {
    let stores = TestStores::new();

    let response = server(&stores).get("/health").await;

    assert_eq!(response.status_code(), 200);

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"]["database"]["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_health_degraded_when_database_down() {
    let stores = TestStores::with(
        InMemoryMappings::failing(),
        InMemoryClicks::default(),
    );

    let response = server(&stores).get("/health").await;

    assert_eq!(response.status_code(), 503);

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["checks"]["database"]["status"], "error");
    assert_eq!(body["checks"]["database"]["message"], "Database error");
}
