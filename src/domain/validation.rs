//! Buggy form validation
//!
//! Checks run in a fixed order and the first failure is the one reported:
//! wheels, power units, tyre quantity, flag colours, tyres against wheels.
//! Pricing happens after validation and can add its own violation.

use serde::Deserialize;
use thiserror::Error;

use crate::domain::buggy::BuggySpec;
use crate::domain::constants::buggy::PLAIN_FLAG_PATTERN;
use crate::domain::cost_catalog::CatalogUnavailable;
use crate::domain::pricing::PricingError;

/// Raw form submission. Missing fields arrive as empty strings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BuggyForm {
    pub qty_wheels: String,
    pub power_type: String,
    pub power_units: String,
    pub qty_tyres: String,
    pub tyres: String,
    pub flag_color: String,
    pub flag_color_secondary: String,
    pub flag_pattern: String,
    pub armour: String,
    pub attack: String,
}

/// A user-facing reason a submission was refused
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    #[error("Quantity of wheels must be an even integer.")]
    WheelsNotEven,

    #[error("Power units must be an integer.")]
    PowerUnitsNotInteger,

    #[error("Quantity of tyres must be an integer.")]
    TyresNotInteger,

    #[error("The secondary flag color must be different from the primary color unless the pattern is plain.")]
    FlagColorsMatch,

    #[error("The number of tyres (includes spares) must be equal to or greater than the number of wheels.")]
    TooFewTyres,

    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error("Pricing data is unavailable from the race server, so the buggy cannot be costed.")]
    PricingUnavailable(#[source] CatalogUnavailable),
}

/// Parse a whole number made only of ASCII digits
fn parse_count(raw: &str) -> Option<u32> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

impl BuggyForm {
    /// Trim every field and check it, returning the validated spec
    pub fn validate(&self) -> Result<BuggySpec, Violation> {
        let qty_wheels = parse_count(self.qty_wheels.trim())
            .filter(|n| n % 2 == 0)
            .ok_or(Violation::WheelsNotEven)?;
        let power_units =
            parse_count(self.power_units.trim()).ok_or(Violation::PowerUnitsNotInteger)?;
        let qty_tyres = parse_count(self.qty_tyres.trim()).ok_or(Violation::TyresNotInteger)?;

        let flag_color = self.flag_color.trim();
        let flag_color_secondary = self.flag_color_secondary.trim();
        let flag_pattern = self.flag_pattern.trim();
        if flag_pattern != PLAIN_FLAG_PATTERN && flag_color == flag_color_secondary {
            return Err(Violation::FlagColorsMatch);
        }

        if qty_tyres < qty_wheels {
            return Err(Violation::TooFewTyres);
        }

        Ok(BuggySpec {
            qty_wheels,
            power_type: self.power_type.trim().to_string(),
            power_units,
            qty_tyres,
            tyres: self.tyres.trim().to_string(),
            flag_color: flag_color.to_string(),
            flag_color_secondary: flag_color_secondary.to_string(),
            flag_pattern: flag_pattern.to_string(),
            armour: self.armour.trim().to_string(),
            attack: self.attack.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn form() -> BuggyForm {
        BuggyForm {
            qty_wheels: " 4 ".to_string(),
            power_type: "petrol".to_string(),
            power_units: "2".to_string(),
            qty_tyres: "6".to_string(),
            tyres: "knobbly".to_string(),
            flag_color: "red".to_string(),
            flag_color_secondary: "white".to_string(),
            flag_pattern: "hstripe".to_string(),
            armour: "none".to_string(),
            attack: "spikes".to_string(),
        }
    }

    #[test]
    fn valid_form_is_trimmed_and_parsed() {
        let spec = form().validate().unwrap();

        assert_eq!(spec.qty_wheels, 4);
        assert_eq!(spec.power_units, 2);
        assert_eq!(spec.qty_tyres, 6);
        assert_eq!(spec.flag_pattern, "hstripe");
    }

    #[rstest]
    #[case("3")]
    #[case("four")]
    #[case("-4")]
    #[case("")]
    #[case("4.0")]
    fn wheels_must_be_even_digits(#[case] wheels: &str) {
        let form = BuggyForm {
            qty_wheels: wheels.to_string(),
            ..form()
        };
        assert_eq!(form.validate(), Err(Violation::WheelsNotEven));
    }

    #[test]
    fn power_units_must_be_digits() {
        let form = BuggyForm {
            power_units: "lots".to_string(),
            ..form()
        };
        assert_eq!(form.validate(), Err(Violation::PowerUnitsNotInteger));
    }

    #[test]
    fn matching_flag_colours_need_plain_pattern() {
        let clash = BuggyForm {
            flag_color_secondary: "red".to_string(),
            ..form()
        };
        assert_eq!(clash.validate(), Err(Violation::FlagColorsMatch));

        let plain = BuggyForm {
            flag_pattern: "plain".to_string(),
            ..clash
        };
        assert!(plain.validate().is_ok());
    }

    #[test]
    fn tyres_are_compared_as_numbers() {
        // "10" < "4" as strings, but ten tyres cover four wheels
        let form = BuggyForm {
            qty_tyres: "10".to_string(),
            ..form()
        };
        assert!(form.validate().is_ok());

        let too_few = BuggyForm {
            qty_tyres: "2".to_string(),
            ..form
        };
        assert_eq!(too_few.validate(), Err(Violation::TooFewTyres));
    }

    #[test]
    fn earlier_checks_take_precedence() {
        let form = BuggyForm {
            qty_wheels: "3".to_string(),
            power_units: "x".to_string(),
            qty_tyres: "y".to_string(),
            ..form()
        };
        assert_eq!(form.validate(), Err(Violation::WheelsNotEven));

        let form = BuggyForm {
            qty_wheels: "4".to_string(),
            ..form
        };
        assert_eq!(form.validate(), Err(Violation::PowerUnitsNotInteger));
    }
}
