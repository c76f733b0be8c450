//! HTTP surface of the Fifth World community wizard
//!
//! Routes:
//! - `POST /create-community` - run one wizard step, answered with a 303
//! - `GET /create-community/{id}` - the community record as JSON
//! - `GET /health` - liveness
//! - `GET /metrics` - in-process metrics snapshot

#![warn(missing_docs)]

mod error;
pub mod form;
pub mod redirect;
pub mod routes;

pub use error::ApiError;
pub use form::FormFields;

use axum::routing::{get, post};
use axum::Router;
use fifthworld_wizard::Wizard;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// State shared across handlers
pub struct AppState {
    /// The wizard every submission runs through
    pub wizard: Wizard,
}

/// Handle to [`AppState`] held by the router
pub type SharedState = Arc<AppState>;

/// Create the application router
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/create-community", post(routes::submit))
        .route("/create-community/:id", get(routes::show))
        .route("/health", get(routes::health))
        .route("/metrics", get(routes::api_metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
