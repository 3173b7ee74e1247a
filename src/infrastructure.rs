//! Infrastructure layer for configuration, logging, persistence and the
//! race server integration.

pub mod buggy_repository;
pub mod config;
pub mod database_connection;
pub mod html_parser;
pub mod logging;
pub mod race_server_catalog;
pub mod simple_http_client;

// Re-export commonly used items
pub use buggy_repository::SqliteBuggyRepository;
pub use config::AppConfig;
pub use database_connection::DatabaseConnection;
pub use html_parser::{ColumnRule, CostTableParser, TableLayout};
pub use race_server_catalog::RaceServerCatalog;
pub use simple_http_client::HttpClient;
