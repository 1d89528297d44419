use serde::{Deserialize, Serialize};

use super::validation::ValidationErrors;
use crate::utils::number::{lenient_opt_count, lenient_opt_string};

/// Names shown in tables; never sent to the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageDisplay {
    #[serde(default)]
    pub tier_name: Option<String>,
    #[serde(default)]
    pub region_name: Option<String>,
}

/// An object-storage commitment with its resolved price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageItem {
    pub region: String,
    pub tier_id: String,
    #[serde(default)]
    pub productable_id: Option<String>,
    pub quantity: u32,
    pub months: u32,
    pub unit_price: f64,
    pub total_price: f64,
    pub currency: String,
    #[serde(rename = "_display", default, skip_serializing_if = "Option::is_none")]
    pub display: Option<StorageDisplay>,
}

/// Unvalidated storage form input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageDraft {
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default, alias = "productable_id", deserialize_with = "lenient_opt_string")]
    pub tier_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_count")]
    pub quantity: Option<u32>,
    #[serde(default, deserialize_with = "lenient_opt_count")]
    pub months: Option<u32>,
}

/// Validated storage request, ready for price resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct StorageRequest {
    pub region: String,
    pub tier_id: String,
    pub quantity: u32,
    pub months: u32,
}

impl StorageDraft {
    pub fn validate(&self) -> Result<StorageRequest, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let region = self.region.as_deref().map(str::trim).unwrap_or("");
        if region.is_empty() {
            errors.add("region", "Region is required");
        }
        let tier_id = self.tier_id.as_deref().map(str::trim).unwrap_or("");
        if tier_id.is_empty() {
            errors.add("tier_id", "Storage tier is required");
        }
        let quantity = self.quantity.unwrap_or(1);
        if quantity < 1 {
            errors.add("quantity", "Quantity must be at least 1");
        }
        let months = self.months.unwrap_or(1);
        if months < 1 {
            errors.add("months", "Months must be at least 1");
        }
        errors.into_result(StorageRequest {
            region: region.to_string(),
            tier_id: tier_id.to_string(),
            quantity,
            months,
        })
    }
}
