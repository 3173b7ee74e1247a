//! Domain service interfaces
//!
//! Seams to external collaborators the domain depends on.

use async_trait::async_trait;

use crate::domain::cost_catalog::{CatalogUnavailable, CostCatalog};

/// Source of component prices.
///
/// Every call builds a fresh catalog. An unreachable source yields
/// `CatalogUnavailable`, never an empty catalog.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn load_catalog(&self) -> Result<CostCatalog, CatalogUnavailable>;
}
