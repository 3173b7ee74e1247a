//! HTTP handlers

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form, Json,
};
use serde_json::{json, Value};
use tracing::error;

use crate::application::{AppState, SubmissionOutcome};
use crate::domain::validation::BuggyForm;
use crate::web::templates;

/// Read-route failure rendered as a 500 page
#[derive(Debug)]
pub struct WebError(anyhow::Error);

impl From<anyhow::Error> for WebError {
    fn from(e: anyhow::Error) -> Self {
        Self(e)
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        error!("Request failed: {:#}", self.0);
        (StatusCode::INTERNAL_SERVER_ERROR, Html(templates::error(&self.0.to_string()))).into_response()
    }
}

pub async fn home(State(state): State<AppState>) -> Html<String> {
    Html(templates::home(state.race_server_url()))
}

pub async fn info() -> Html<String> {
    Html(templates::info())
}

pub async fn new_buggy_form(State(state): State<AppState>) -> Result<Html<String>, WebError> {
    let buggy = state.buggies.current_buggy().await?;
    Ok(Html(templates::buggy_form(Some(&buggy))))
}

pub async fn submit_buggy(State(state): State<AppState>, Form(form): Form<BuggyForm>) -> Response {
    match state.buggies.submit(&form).await {
        SubmissionOutcome::Saved { .. } => Html(templates::updated(Some("Record successfully saved"), None)).into_response(),
        SubmissionOutcome::Rejected(violation) => Html(templates::updated(None, Some(&violation.to_string()))).into_response(),
        SubmissionOutcome::Failed(reason) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(templates::updated(Some(&format!("Error in update operation: {reason}")), None)),
        )
            .into_response(),
    }
}

pub async fn show_buggy(State(state): State<AppState>) -> Result<Html<String>, WebError> {
    let buggy = state.buggies.current_buggy().await?;
    Ok(Html(templates::buggy(&buggy)))
}

pub async fn edit_buggy() -> Html<String> {
    Html(templates::buggy_form(None))
}

pub async fn summary(State(state): State<AppState>) -> Result<Json<Value>, WebError> {
    let buggy = state.buggies.current_buggy().await?;
    Ok(Json(Value::Object(buggy.summary())))
}

pub async fn cost_catalog(State(state): State<AppState>) -> Response {
    match state.buggies.cost_catalog().await {
        Ok(catalog) => Json(catalog).into_response(),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "error": "pricing data unavailable", "reason": e.to_string() })),
        )
            .into_response(),
    }
}
