//! Errors surfaced by the prediction boundary.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use taspm::{FormError, PersistError, PipelineError};

/// Anything that can go wrong between a submitted form and a prediction.
///
/// The HTML surface renders every variant the same way; the JSON surface
/// picks a status code from it.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("{0}")]
    Rejected(String),

    #[error(transparent)]
    Form(#[from] FormError),

    #[error("failed to load model artifact: {0}")]
    Load(#[from] PersistError),

    #[error("model loader stopped: {0}")]
    LoadTask(#[from] tokio::task::JoinError),

    #[error(transparent)]
    Predict(#[from] PipelineError),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Rejected(_) | Self::Form(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Load(_) | Self::LoadTask(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Predict(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
