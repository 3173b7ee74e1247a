//! SQLite implementation of `BuggyRepository`

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use crate::domain::buggy::{BuggyRecord, BuggySpec};
use crate::domain::constants::buggy::DEFAULT_BUGGY_ID;
use crate::domain::repositories::BuggyRepository;

const SELECT_COLUMNS: &str = "id, qty_wheels, power_type, power_units, qty_tyres, tyres, \
     flag_color, flag_color_secondary, flag_pattern, armour, attack, total_cost";

pub struct SqliteBuggyRepository {
    pool: SqlitePool,
}

impl SqliteBuggyRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn count_column(row: &SqliteRow, column: &str) -> Result<u32> {
        let value: i64 = row.try_get(column)?;
        u32::try_from(value).map_err(|_| anyhow!("Column {} holds out-of-range value {}", column, value))
    }

    /// Helper method to convert database row to BuggyRecord entity
    fn row_to_buggy(row: &SqliteRow) -> Result<BuggyRecord> {
        Ok(BuggyRecord {
            id: row.try_get("id")?,
            spec: BuggySpec {
                qty_wheels: Self::count_column(row, "qty_wheels")?,
                power_type: row.try_get("power_type")?,
                power_units: Self::count_column(row, "power_units")?,
                qty_tyres: Self::count_column(row, "qty_tyres")?,
                tyres: row.try_get("tyres")?,
                flag_color: row.try_get("flag_color")?,
                flag_color_secondary: row.try_get("flag_color_secondary")?,
                flag_pattern: row.try_get("flag_pattern")?,
                armour: row.try_get("armour")?,
                attack: row.try_get("attack")?,
            },
            total_cost: Self::count_column(row, "total_cost")?,
        })
    }
}

#[async_trait]
impl BuggyRepository for SqliteBuggyRepository {
    async fn find_default(&self) -> Result<Option<BuggyRecord>> {
        let row = sqlx::query(&format!("SELECT {SELECT_COLUMNS} FROM buggies WHERE id = ? LIMIT 1"))
            .bind(DEFAULT_BUGGY_ID)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Self::row_to_buggy).transpose()
    }

    async fn update_default(&self, spec: &BuggySpec, total_cost: u32) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE buggies
            SET qty_wheels = ?, power_type = ?, power_units = ?, qty_tyres = ?, tyres = ?,
                flag_color = ?, flag_color_secondary = ?, flag_pattern = ?,
                armour = ?, attack = ?, total_cost = ?
            WHERE id = ?
            "#,
        )
        .bind(i64::from(spec.qty_wheels))
        .bind(&spec.power_type)
        .bind(i64::from(spec.power_units))
        .bind(i64::from(spec.qty_tyres))
        .bind(&spec.tyres)
        .bind(&spec.flag_color)
        .bind(&spec.flag_color_secondary)
        .bind(&spec.flag_pattern)
        .bind(&spec.armour)
        .bind(&spec.attack)
        .bind(i64::from(total_cost))
        .bind(DEFAULT_BUGGY_ID)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database_connection::DatabaseConnection;

    async fn repository() -> Result<SqliteBuggyRepository> {
        let db = DatabaseConnection::new("sqlite::memory:").await?;
        db.migrate().await?;
        Ok(SqliteBuggyRepository::new(db.pool().clone()))
    }

    #[tokio::test]
    async fn test_find_seeded_buggy() -> Result<()> {
        let repo = repository().await?;

        let buggy = repo.find_default().await?.expect("seeded row");

        assert_eq!(buggy, BuggyRecord::default());
        Ok(())
    }

    #[tokio::test]
    async fn test_update_round_trip() -> Result<()> {
        let repo = repository().await?;
        let spec = BuggySpec {
            qty_wheels: 6,
            power_type: "steam".to_string(),
            qty_tyres: 8,
            flag_pattern: "checker".to_string(),
            attack: "flame".to_string(),
            ..BuggySpec::default()
        };

        let changed = repo.update_default(&spec, 321).await?;
        let stored = repo.find_default().await?.expect("row");

        assert_eq!(changed, 1);
        assert_eq!(stored.spec, spec);
        assert_eq!(stored.total_cost, 321);
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_row_is_none_and_update_is_noop() -> Result<()> {
        let repo = repository().await?;
        sqlx::query("DELETE FROM buggies").execute(&repo.pool).await?;

        assert!(repo.find_default().await?.is_none());
        assert_eq!(repo.update_default(&BuggySpec::default(), 0).await?, 0);
        Ok(())
    }
}
