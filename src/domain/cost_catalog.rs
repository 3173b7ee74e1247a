//! Cost catalog built from the race server's specifications page

use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::domain::pricing::{ComponentField, PricingError};

/// One parsed catalog row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostEntry {
    pub item_name: String,
    pub cost: u32,
}

impl CostEntry {
    pub fn new(item_name: impl Into<String>, cost: u32) -> Self {
        Self {
            item_name: item_name.into(),
            cost,
        }
    }
}

/// Item name to cost mapping.
///
/// Built fresh for every pricing computation and never cached. Inserting an
/// item that already exists overwrites it, so the last parsed row wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CostCatalog {
    entries: BTreeMap<String, u32>,
}

impl CostCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite an entry, returning the previous cost if any
    pub fn insert(&mut self, entry: CostEntry) -> Option<u32> {
        self.entries.insert(entry.item_name, entry.cost)
    }

    pub fn get(&self, item_name: &str) -> Option<u32> {
        self.entries.get(item_name).copied()
    }

    /// Look up the cost of a selected component.
    ///
    /// A miss means the selection is not in the catalog and is reported as
    /// an error rather than priced at zero.
    pub fn cost_of(&self, field: ComponentField, item_name: &str) -> Result<u32, PricingError> {
        self.get(item_name)
            .ok_or_else(|| PricingError::UnknownComponent {
                field,
                item: item_name.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.entries.iter().map(|(name, cost)| (name.as_str(), *cost))
    }
}

impl FromIterator<CostEntry> for CostCatalog {
    fn from_iter<I: IntoIterator<Item = CostEntry>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for entry in iter {
            catalog.insert(entry);
        }
        catalog
    }
}

/// The catalog could not be obtained from the race server.
///
/// Distinct from an empty catalog: callers must not price anything when
/// they receive this.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogUnavailable {
    #[error("race server answered {status} for {url}")]
    Status { status: u16, url: String },

    #[error("request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    #[error("catalog URL could not be built from '{base_url}': {reason}")]
    InvalidUrl { base_url: String, reason: String },
}
