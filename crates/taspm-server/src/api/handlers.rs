use axum::extract::rejection::{FormRejection, JsonRejection, QueryRejection};
use axum::extract::{Form, Query, State};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};

use taspm::{IncidentForm, Prediction};

use crate::error::ServerError;
use crate::state::AppState;
use crate::view::{self, Outcome};

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub label: u8,
    pub probability: f32,
    pub probability_display: String,
    pub verdict: &'static str,
}

impl From<Prediction> for PredictResponse {
    fn from(prediction: Prediction) -> Self {
        Self {
            label: prediction.label,
            probability: prediction.probability,
            probability_display: view::format_percentage(prediction.probability),
            verdict: view::verdict(prediction.label),
        }
    }
}

/// Validate, fetch the cached pipeline and score one incident.
async fn predict(state: &AppState, form: &IncidentForm) -> Result<Prediction, ServerError> {
    let record = form.to_record()?;
    let pipeline = state.models.get().await?;
    let prediction = pipeline.predict(&record)?;
    info!(label = prediction.label, probability = prediction.probability, "prediction");
    Ok(prediction)
}

/// The form, with widget state taken from the query string.
pub async fn index(query: Result<Query<IncidentForm>, QueryRejection>) -> Html<String> {
    match query {
        Ok(Query(mut form)) => {
            form.normalize();
            Html(view::render_page(&form, None))
        }
        Err(rejection) => {
            let outcome = Outcome::Error(view::error_message(&rejection.body_text()));
            Html(view::render_page(&IncidentForm::default(), Some(&outcome)))
        }
    }
}

pub async fn predict_form(
    State(state): State<AppState>,
    form: Result<Form<IncidentForm>, FormRejection>,
) -> Html<String> {
    let (mut form, result) = match form {
        Ok(Form(form)) => {
            let result = predict(&state, &form).await;
            (form, result)
        }
        Err(rejection) => (IncidentForm::default(), Err(ServerError::Rejected(rejection.body_text()))),
    };

    let outcome = match result {
        Ok(prediction) => Outcome::Prediction(prediction),
        Err(e) => {
            warn!(error = %e, "prediction failed");
            Outcome::Error(view::error_message(&e))
        }
    };
    form.normalize();
    Html(view::render_page(&form, Some(&outcome)))
}

pub async fn predict_api(
    State(state): State<AppState>,
    payload: Result<Json<IncidentForm>, JsonRejection>,
) -> Response {
    let result = match payload {
        Ok(Json(form)) => predict(&state, &form).await,
        Err(rejection) => Err(ServerError::Rejected(rejection.body_text())),
    };
    match result {
        Ok(prediction) => Json(PredictResponse::from(prediction)).into_response(),
        Err(e) => {
            warn!(error = %e, "prediction failed");
            e.into_response()
        }
    }
}

pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "model_loaded": state.models.is_loaded(),
    }))
}
