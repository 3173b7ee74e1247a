//! Route table

use axum::{routing::get, Router};

use crate::application::AppState;
use crate::web::handlers;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/info", get(handlers::info))
        .route("/new", get(handlers::new_buggy_form).post(handlers::submit_buggy))
        .route("/buggy", get(handlers::show_buggy))
        .route("/edit", get(handlers::edit_buggy))
        .route("/json", get(handlers::summary))
        .route("/specs/costs", get(handlers::cost_catalog))
        .with_state(state)
}
