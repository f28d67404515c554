use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use inscription_shared::InscriptionReply;
use thiserror::Error;

pub const INTERNAL_ERROR_MESSAGE: &str = "Erreur interne du serveur.";
pub const MALFORMED_MESSAGE: &str = "Données invalides";
pub const TOO_MANY_REQUESTS_MESSAGE: &str = "Trop de requêtes, veuillez réessayer plus tard.";

/// Errors of the JSON endpoints, rendered as `{"success": false, "message": ..}`.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("Malformed request: {0}")]
    Malformed(String),

    #[error("Too many requests")]
    TooManyRequests,

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<inscription_shared::Error> for ApiError {
    fn from(err: inscription_shared::Error) -> Self {
        match err {
            inscription_shared::Error::Validate(errors) => {
                ApiError::Validation(inscription_registration::first_message(&errors))
            }
            inscription_shared::Error::Invalid(msg) => ApiError::Validation(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Malformed(reason) => {
                tracing::debug!("Rejected malformed body: {}", reason);
                (StatusCode::BAD_REQUEST, MALFORMED_MESSAGE.to_string())
            }
            ApiError::TooManyRequests => (
                StatusCode::TOO_MANY_REQUESTS,
                TOO_MANY_REQUESTS_MESSAGE.to_string(),
            ),
            ApiError::Internal(e) => {
                tracing::error!("Internal error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
        };

        (status, Json(InscriptionReply::refused(message))).into_response()
    }
}
