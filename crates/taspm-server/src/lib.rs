//! taspm-server: the inference surface of the TASPM pipeline.
//!
//! - `GET /` renders the incident form from query-string widget state
//! - `POST /predict` scores a form submission and renders the result
//! - `POST /api/predict` scores a JSON body
//! - `GET /health` reports liveness and whether the pipeline is loaded

pub mod api;
pub mod config;
pub mod error;
pub mod state;
pub mod view;

use axum::Router;
use tower_http::trace::TraceLayer;

pub use config::Config;
pub use error::ServerError;
pub use state::{AppState, ModelCache};

pub fn app(state: AppState) -> Router {
    api::routes().layer(TraceLayer::new_for_http()).with_state(state)
}
