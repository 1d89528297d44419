use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::utils::number::{lenient_amount, lenient_opt_amount};

/// Object-storage sub-aggregate inside a backend pricing result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectStorageBlock {
    #[serde(default)]
    pub lines: Vec<Value>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub subtotal: f64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub tax: f64,
    /// When set, storage figures are already folded into the parent totals.
    #[serde(default)]
    pub included_in_totals: bool,
}

/// Quote aggregate computed by the backend, or approximated locally.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingResult {
    #[serde(default, deserialize_with = "lenient_amount")]
    pub subtotal: f64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub tax: f64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub discount: f64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub total: f64,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_amount")]
    pub pre_discount_subtotal: Option<f64>,
    #[serde(default)]
    pub lines: Vec<Value>,
    #[serde(default)]
    pub object_storage: Option<ObjectStorageBlock>,
}

impl PricingResult {
    /// The backend storage block, when it already carries the storage lines.
    pub fn included_storage(&self) -> Option<&ObjectStorageBlock> {
        self.object_storage
            .as_ref()
            .filter(|os| os.included_in_totals && !os.lines.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_numbers_read_as_zero() {
        let p: PricingResult = serde_json::from_value(json!({
            "subtotal": "100.00",
            "tax": null,
            "currency": "USD"
        }))
        .unwrap();
        assert_eq!(p.subtotal, 100.0);
        assert_eq!(p.tax, 0.0);
        assert_eq!(p.total, 0.0);
        assert_eq!(p.pre_discount_subtotal, None);
    }

    #[test]
    fn included_storage_requires_lines() {
        let p: PricingResult = serde_json::from_value(json!({
            "object_storage": {"included_in_totals": true, "lines": [], "subtotal": 5}
        }))
        .unwrap();
        assert!(p.included_storage().is_none());
    }
}
