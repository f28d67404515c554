use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use inscription_registration::RegisterInput;
use inscription_shared::InscriptionReply;
use serde_json::json;

use crate::error::{ApiError, INTERNAL_ERROR_MESSAGE};

use super::AppState;

pub const ACCEPTED_MESSAGE: &str = "Inscription réussie!";

/// POST /inscription
#[tracing::instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterInput>, JsonRejection>,
) -> Result<Json<InscriptionReply>, ApiError> {
    let Json(payload) = payload.map_err(|e| ApiError::Malformed(e.body_text()))?;

    state.command.register(payload).await?;

    Ok(Json(InscriptionReply::accepted(ACCEPTED_MESSAGE)))
}

/// GET /inscriptions
pub async fn list(State(state): State<AppState>) -> Response {
    match state.query.list().await {
        Ok(inscriptions) => Json(inscriptions).into_response(),
        Err(e) => {
            tracing::error!("Failed to list inscriptions: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": INTERNAL_ERROR_MESSAGE})),
            )
                .into_response()
        }
    }
}
