//! Domain module - Core business logic and entities
//!
//! Buggy entities, the cost catalog, pricing and form validation, plus the
//! repository and service traits the outer layers implement.

pub mod buggy;
pub mod constants;
pub mod cost_catalog;
pub mod pricing;
pub mod repositories;
pub mod services;
pub mod validation;

pub use buggy::{BuggyRecord, BuggySpec};
pub use cost_catalog::{CatalogUnavailable, CostCatalog, CostEntry};
pub use pricing::{ComponentField, PricingError};
pub use validation::{BuggyForm, Violation};
