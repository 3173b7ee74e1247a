//! Application layer module
//!
//! Use cases and the state shared with the web layer.

pub mod buggy_service;
pub mod state;

pub use buggy_service::{BuggyService, SubmissionOutcome};
pub use state::AppState;
