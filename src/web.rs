//! Web layer: axum routes, handlers and HTML pages

pub mod handlers;
pub mod routes;
pub mod templates;

pub use routes::router;
