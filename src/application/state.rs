//! Shared application state handed to every HTTP handler

use std::sync::Arc;

use crate::application::buggy_service::BuggyService;
use crate::infrastructure::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub buggies: BuggyService,
}

impl AppState {
    pub fn new(config: AppConfig, buggies: BuggyService) -> Self {
        Self {
            config: Arc::new(config),
            buggies,
        }
    }

    /// Race server link shown on the home page
    pub fn race_server_url(&self) -> &str {
        &self.config.catalog.base_url
    }
}
