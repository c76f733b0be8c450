//! End-to-end tests of the wizard routes over an in-memory store.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use fifthworld_geo::{CoastlineProbe, Coordinate, GeoError};
use fifthworld_web::{create_router, AppState};
use fifthworld_wizard::{CommunityStore, MemoryStore, Wizard, WizardLimits, WizardState};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

struct Inland;

#[async_trait]
impl CoastlineProbe for Inland {
    async fn is_coastal(&self, _center: Coordinate) -> fifthworld_geo::Result<bool> {
        Ok(false)
    }
}

struct Unreachable;

#[async_trait]
impl CoastlineProbe for Unreachable {
    async fn is_coastal(&self, _center: Coordinate) -> fifthworld_geo::Result<bool> {
        Err(GeoError::ShardFetch {
            shard: 7,
            message: "503 Service Unavailable".into(),
        })
    }
}

fn app_with(store: Arc<MemoryStore>, probe: Arc<dyn CoastlineProbe>) -> Router {
    let wizard = Wizard::new(store, probe, WizardLimits::default());
    create_router(Arc::new(AppState { wizard }))
}

fn app(store: Arc<MemoryStore>) -> Router {
    app_with(store, Arc::new(Inland))
}

fn post(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/create-community")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

async fn json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_center_creates_community() {
    let store = Arc::new(MemoryStore::new());
    let response = app(store.clone())
        .oneshot(post("lat=40.441810&lon=-80.012770"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/create-community/1");

    let stored = store.load(1).await.unwrap().unwrap();
    assert_eq!(stored.state, WizardState::AwaitingSpecialties);
    assert_eq!(stored.community.territory.center, Coordinate::new(40.44181, -80.01277));
}

#[tokio::test]
async fn test_bad_latitude_on_existing_community() {
    let store = Arc::new(MemoryStore::new());
    for _ in 0..5 {
        app(store.clone())
            .oneshot(post("lat=40.441810&lon=-80.012770"))
            .await
            .unwrap();
    }
    let before = store.raw(5).await;
    assert!(before.is_some());

    let response = app(store.clone())
        .oneshot(post("community=5&lat=200&lon=-80"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/create-community/5?step=1&error=lat&lat=200&lon=-80");
    assert_eq!(store.raw(5).await, before);
}

#[tokio::test]
async fn test_bad_center_after_specialties_returns_to_current_step() {
    let store = Arc::new(MemoryStore::new());
    let app = app(store.clone());
    app.clone().oneshot(post("lat=40.441810&lon=-80.012770")).await.unwrap();
    app.clone().oneshot(post("community=1&specialty=Music")).await.unwrap();
    let before = store.raw(1).await;

    let response = app.oneshot(post("community=1&lat=200&lon=-80")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/create-community/1?step=3");
    assert_eq!(store.raw(1).await, before);
}

#[tokio::test]
async fn test_wizard_walkthrough() {
    let store = Arc::new(MemoryStore::new());
    let app = app(store.clone());

    let steps = [
        ("lat=40.441810&lon=-80.012770", "/create-community/1"),
        (
            "community=1&specialty=Fishing&specialty=Hunting&specialty=Music&specialty=Trade&specialty=Salvage",
            "/create-community/1?step=2&error=toomany&specialty=Fishing&specialty=Hunting&specialty=Music&specialty=Trade&specialty=Salvage",
        ),
        ("community=1&specialty%5B%5D=Fishing&specialty%5B%5D=Music", "/create-community/1"),
        (
            "community=1&specialty=Fishing&response=",
            "/create-community/1?step=3&error=nointro&specialty=Fishing",
        ),
        ("community=1&specialty=Fishing&response=Weirs", "/create-community/1"),
        ("community=1&specialty=Music&response=Bone+flutes", "/create-community/1"),
        (
            "community=1&card=D5&lat=39.9526&lon=-75.1652&name=Dock",
            "/create-community/1?step=4&error=toofar&card=D5&lat=39.9526&lon=-75.1652&name=Dock",
        ),
        ("community=1&card=D5&lat=40.45&lon=-80.0&name=Dock", "/create-community/1"),
        ("community=1&card=D7&lat=40.45&lon=-80.0&name=Kiln", "/create-community/1?step=4"),
    ];

    for (body, expected) in steps {
        let response = app.clone().oneshot(post(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{body}");
        assert_eq!(location(&response), expected, "{body}");
    }

    let response = app.oneshot(get("/create-community/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json(response).await;
    assert_eq!(body["id"], 1);
    assert_eq!(body["state"], "awaiting_places");
    assert_eq!(body["step"], 4);
    assert_eq!(body["community"]["traditions"]["village"], false);
    assert_eq!(body["community"]["traditions"]["specialties"]["Music"], "Bone flutes");
    assert_eq!(body["community"]["territory"]["places"]["D5"]["name"], "Dock");
    assert!(body["community"]["territory"]["places"]["C10"].is_null());
}

#[tokio::test]
async fn test_unknown_and_malformed_ids() {
    let store = Arc::new(MemoryStore::new());

    let response = app(store.clone()).oneshot(post("community=9&lat=1&lon=1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json(response).await["code"], "NOT_FOUND");

    let response = app(store.clone()).oneshot(post("community=nine&lat=1&lon=1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app(store.clone()).oneshot(get("/create-community/abc")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app(store).oneshot(get("/create-community/9")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_corrupt_row_is_server_error() {
    let store = Arc::new(MemoryStore::new());
    store.put_raw(1, "complete", r#"{"territory":{"center":[0,0],"coastal":false}}"#).await;

    let response = app(store).oneshot(get("/create-community/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json(response).await["code"], "CORRUPT_RECORD");
}

#[tokio::test]
async fn test_coastline_failure_is_server_error() {
    let store = Arc::new(MemoryStore::new());
    let response = app_with(store.clone(), Arc::new(Unreachable))
        .oneshot(post("lat=40&lon=-80"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let report = json(response).await;
    assert_eq!(report["code"], "COASTLINE_UNAVAILABLE");
    assert_eq!(report["context"], "Geo error G10003");
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_health_and_metrics() {
    let store = Arc::new(MemoryStore::new());

    let response = app(store.clone()).oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"OK");

    app(store.clone()).oneshot(post("lat=1&lon=1")).await.unwrap();
    let response = app(store).oneshot(get("/metrics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json(response).await;
    assert!(body["counters"]["wizard.submissions"].as_u64().unwrap_or(0) >= 1);
}
