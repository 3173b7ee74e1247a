//! Buggy pricing against a cost catalog

use std::fmt;
use thiserror::Error;

use crate::domain::buggy::BuggySpec;
use crate::domain::cost_catalog::CostCatalog;

/// Form fields whose value is looked up in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentField {
    PowerType,
    Tyres,
    Armour,
    Attack,
}

impl fmt::Display for ComponentField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::PowerType => "power type",
            Self::Tyres => "tyres",
            Self::Armour => "armour",
            Self::Attack => "attack",
        };
        f.write_str(label)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    #[error("The selected {field} '{item}' is not listed in the race server's specifications.")]
    UnknownComponent { field: ComponentField, item: String },

    #[error("The total cost of this buggy is too large to compute.")]
    Overflow,
}

/// Total cost of a buggy.
///
/// `cost(armour) + cost(attack) + power_units * cost(power_type) + qty_tyres * cost(tyres)`.
/// Components are looked up in that order and the first miss is returned.
pub fn total_cost(catalog: &CostCatalog, buggy: &BuggySpec) -> Result<u32, PricingError> {
    let armour = catalog.cost_of(ComponentField::Armour, &buggy.armour)?;
    let attack = catalog.cost_of(ComponentField::Attack, &buggy.attack)?;
    let power = catalog.cost_of(ComponentField::PowerType, &buggy.power_type)?;
    let tyres = catalog.cost_of(ComponentField::Tyres, &buggy.tyres)?;

    let power_total = buggy.power_units.checked_mul(power);
    let tyres_total = buggy.qty_tyres.checked_mul(tyres);

    [Some(armour), Some(attack), power_total, tyres_total]
        .into_iter()
        .try_fold(0_u32, |sum, part| part.and_then(|p| sum.checked_add(p)))
        .ok_or(PricingError::Overflow)
}
