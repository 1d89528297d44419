use serde::{Deserialize, Serialize};

use super::validation::ValidationErrors;
use crate::utils::format_money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountKind {
    Percent,
    Fixed,
}

/// A quote-wide discount. It is forwarded to the backend as
/// `global_discount`; the amount shown to the user always comes back in the
/// backend's pricing result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountSpec {
    #[serde(rename = "type")]
    pub kind: DiscountKind,
    pub value: f64,
    #[serde(default)]
    pub label: String,
}

impl DiscountSpec {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        if !self.value.is_finite() || self.value < 0.0 {
            errors.add("discount.value", "Discount must be zero or more");
        } else if self.kind == DiscountKind::Percent && self.value > 100.0 {
            errors.add("discount.value", "Percent discount cannot exceed 100");
        }
        errors.into_result(())
    }

    /// Label for summary tables, e.g. `Launch promo (20%)`.
    pub fn describe(&self, currency: &str) -> String {
        let amount = match self.kind {
            DiscountKind::Percent => format!("{}%", trim_number(self.value)),
            DiscountKind::Fixed => format_money(self.value, currency),
        };
        if self.label.trim().is_empty() {
            format!("Discount ({})", amount)
        } else {
            format!("{} ({})", self.label.trim(), amount)
        }
    }
}

fn trim_number(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{}", v as i64)
    } else {
        format!("{}", v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_shape() {
        let d: DiscountSpec =
            serde_json::from_str(r#"{"type":"percent","value":20,"label":"Launch"}"#).unwrap();
        assert_eq!(d.kind, DiscountKind::Percent);
        assert_eq!(d.value, 20.0);
        assert_eq!(d.describe("USD"), "Launch (20%)");
    }

    #[test]
    fn rejects_percent_over_hundred() {
        let d = DiscountSpec { kind: DiscountKind::Percent, value: 120.0, label: String::new() };
        let err = d.validate().unwrap_err();
        assert_eq!(err.get("discount.value"), Some("Percent discount cannot exceed 100"));
    }

    #[test]
    fn fixed_discount_describes_amount() {
        let d = DiscountSpec { kind: DiscountKind::Fixed, value: 15.0, label: String::new() };
        assert!(d.validate().is_ok());
        assert_eq!(d.describe("EUR"), "Discount (EUR 15.00)");
    }
}
