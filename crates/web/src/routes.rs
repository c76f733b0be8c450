//! Wizard HTTP handlers.

use crate::error::ApiError;
use crate::form::FormFields;
use crate::redirect;
use crate::SharedState;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Json, Redirect};
use fifthworld_telemetry::metrics;
use fifthworld_wizard::{Community, WizardState};
use serde::Serialize;

/// POST /create-community
pub async fn submit(
    State(state): State<SharedState>,
    body: String,
) -> Result<Redirect, ApiError> {
    let fields = FormFields::parse(&body)
        .map_err(|e| ApiError::bad_request(format!("Malformed form body: {e}")))?;
    let id = fields.community_id().map_err(ApiError::bad_request)?;

    let outcome = state.wizard.submit(id, fields.into_submission()).await?;
    Ok(Redirect::to(&redirect::location(&outcome)))
}

/// Community as returned by `GET /create-community/{id}`
#[derive(Serialize)]
pub struct CommunityResponse {
    /// Row id
    pub id: i64,
    /// Stored wizard state
    pub state: WizardState,
    /// Form step for that state
    pub step: u8,
    /// The record itself
    pub community: Community,
}

/// GET /create-community/{id}
pub async fn show(
    State(state): State<SharedState>,
    Path(raw): Path<String>,
) -> Result<Json<CommunityResponse>, ApiError> {
    let id: i64 = raw
        .parse()
        .map_err(|_| ApiError::bad_request(format!("community id {raw:?} is not an integer")))?;

    let stored = state.wizard.show(id).await?;
    Ok(Json(CommunityResponse {
        id: stored.id,
        state: stored.state,
        step: stored.state.step().number(),
        community: stored.community,
    }))
}

/// GET /health
pub async fn health() -> impl IntoResponse {
    "OK"
}

/// GET /metrics
pub async fn api_metrics() -> Json<serde_json::Value> {
    Json(metrics().export_json())
}
