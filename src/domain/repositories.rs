//! Repository interfaces for the buggy editor

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::buggy::{BuggyRecord, BuggySpec};

#[async_trait]
pub trait BuggyRepository: Send + Sync {
    /// The single buggy managed by the editor, if the row exists
    async fn find_default(&self) -> Result<Option<BuggyRecord>>;

    /// Overwrite the single buggy. Returns the number of rows changed.
    async fn update_default(&self, spec: &BuggySpec, total_cost: u32) -> Result<u64>;
}
