// Database connection and pool management
// This module handles SQLite database connections using sqlx

use anyhow::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

use crate::domain::buggy::BuggySpec;
use crate::domain::constants::buggy::DEFAULT_BUGGY_ID;
use crate::infrastructure::config::DatabaseConfig;

pub struct DatabaseConnection {
    pool: SqlitePool,
}

/// File path part of a sqlite URL, `None` for in-memory databases
fn sqlite_file_path(database_url: &str) -> Option<&str> {
    let path = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))
        .unwrap_or(database_url);
    let path = path.split('?').next().unwrap_or(path);

    if path.is_empty() || path.starts_with(":memory:") {
        None
    } else {
        Some(path)
    }
}

impl DatabaseConnection {
    pub async fn new(database_url: &str) -> Result<Self> {
        Self::with_max_connections(database_url, 5).await
    }

    pub async fn from_config(config: &DatabaseConfig) -> Result<Self> {
        Self::with_max_connections(&config.url, config.max_connections).await
    }

    pub async fn with_max_connections(database_url: &str, max_connections: u32) -> Result<Self> {
        if let Some(db_path) = sqlite_file_path(database_url) {
            if let Some(parent) = Path::new(db_path).parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent).await?;
            }

            // Ensure the database file exists by creating it if necessary
            if !Path::new(db_path).exists() {
                tokio::fs::File::create(db_path).await?;
            }
        }

        // In-memory databases live and die with their connection, so keep
        // exactly one open for the life of the pool
        let options = if sqlite_file_path(database_url).is_none() {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections)
        };

        let pool = options.connect(database_url).await?;

        info!("Connected to database {}", database_url);
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create the buggies table and seed the default buggy if missing
    pub async fn migrate(&self) -> Result<()> {
        let create_buggies_sql = r#"
            CREATE TABLE IF NOT EXISTS buggies (
                id INTEGER PRIMARY KEY,
                qty_wheels INTEGER NOT NULL DEFAULT 4,
                power_type TEXT NOT NULL DEFAULT 'petrol',
                power_units INTEGER NOT NULL DEFAULT 1,
                qty_tyres INTEGER NOT NULL DEFAULT 4,
                tyres TEXT NOT NULL DEFAULT 'knobbly',
                flag_color TEXT NOT NULL DEFAULT 'white',
                flag_color_secondary TEXT NOT NULL DEFAULT 'black',
                flag_pattern TEXT NOT NULL DEFAULT 'plain',
                armour TEXT NOT NULL DEFAULT 'none',
                attack TEXT NOT NULL DEFAULT 'none',
                total_cost INTEGER NOT NULL DEFAULT 0
            )
        "#;

        let seed_sql = r#"
            INSERT OR IGNORE INTO buggies
            (id, qty_wheels, power_type, power_units, qty_tyres, tyres,
             flag_color, flag_color_secondary, flag_pattern, armour, attack, total_cost)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 0)
        "#;

        let seed = BuggySpec::default();

        sqlx::query(create_buggies_sql).execute(&self.pool).await?;
        let seeded = sqlx::query(seed_sql)
            .bind(DEFAULT_BUGGY_ID)
            .bind(i64::from(seed.qty_wheels))
            .bind(&seed.power_type)
            .bind(i64::from(seed.power_units))
            .bind(i64::from(seed.qty_tyres))
            .bind(&seed.tyres)
            .bind(&seed.flag_color)
            .bind(&seed.flag_color_secondary)
            .bind(&seed.flag_pattern)
            .bind(&seed.armour)
            .bind(&seed.attack)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if seeded > 0 {
            info!("Seeded default buggy {}", DEFAULT_BUGGY_ID);
        }

        Ok(())
    }
}
