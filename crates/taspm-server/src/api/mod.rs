pub mod handlers;

use axum::routing::{get, post};
use axum::Router;

use crate::api::handlers::{health, index, predict_api, predict_form};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/predict", post(predict_form))
        .route("/api/predict", post(predict_api))
        .route("/health", get(health))
}
