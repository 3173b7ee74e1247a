//! Buggy entities
//!
//! `BuggySpec` is a validated configuration ready to be priced and stored.
//! `BuggyRecord` is the persisted row.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::constants::buggy::DEFAULT_BUGGY_ID;

/// Validated buggy configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuggySpec {
    pub qty_wheels: u32,
    pub power_type: String,
    pub power_units: u32,
    pub qty_tyres: u32,
    pub tyres: String,
    pub flag_color: String,
    pub flag_color_secondary: String,
    pub flag_pattern: String,
    pub armour: String,
    pub attack: String,
}

impl Default for BuggySpec {
    fn default() -> Self {
        Self {
            qty_wheels: 4,
            power_type: "petrol".to_string(),
            power_units: 1,
            qty_tyres: 4,
            tyres: "knobbly".to_string(),
            flag_color: "white".to_string(),
            flag_color_secondary: "black".to_string(),
            flag_pattern: "plain".to_string(),
            armour: "none".to_string(),
            attack: "none".to_string(),
        }
    }
}

/// The stored buggy row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuggyRecord {
    pub id: i64,
    #[serde(flatten)]
    pub spec: BuggySpec,
    pub total_cost: u32,
}

impl Default for BuggyRecord {
    fn default() -> Self {
        Self {
            id: DEFAULT_BUGGY_ID,
            spec: BuggySpec::default(),
            total_cost: 0,
        }
    }
}

impl BuggyRecord {
    /// JSON summary with null and empty-string fields left out
    pub fn summary(&self) -> Map<String, Value> {
        let Ok(Value::Object(fields)) = serde_json::to_value(self) else {
            return Map::new();
        };

        fields
            .into_iter()
            .filter(|(_, value)| match value {
                Value::Null => false,
                Value::String(s) => !s.is_empty(),
                _ => true,
            })
            .collect()
    }
}
