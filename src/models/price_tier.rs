use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::number::{lenient_opt_amount, lenient_opt_string};

/// Product categories understood by `GET /pricing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    ComputeInstance,
    OsImage,
    VolumeType,
    Bandwidth,
    Ip,
    CrossConnect,
    ObjectStorageConfiguration,
}

impl ProductCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCategory::ComputeInstance => "compute_instance",
            ProductCategory::OsImage => "os_image",
            ProductCategory::VolumeType => "volume_type",
            ProductCategory::Bandwidth => "bandwidth",
            ProductCategory::Ip => "ip",
            ProductCategory::CrossConnect => "cross_connect",
            ProductCategory::ObjectStorageConfiguration => "object_storage_configuration",
        }
    }

    pub fn from_str(s: &str) -> Option<ProductCategory> {
        let wanted = s.trim().to_lowercase();
        ProductCategory::all()
            .iter()
            .copied()
            .find(|c| c.as_str() == wanted)
    }

    /// Human-readable label used in summary tables.
    pub fn label(&self) -> &'static str {
        match self {
            ProductCategory::ComputeInstance => "Compute",
            ProductCategory::OsImage => "OS image",
            ProductCategory::VolumeType => "Volume",
            ProductCategory::Bandwidth => "Bandwidth",
            ProductCategory::Ip => "Floating IP",
            ProductCategory::CrossConnect => "Cross connect",
            ProductCategory::ObjectStorageConfiguration => "Object storage",
        }
    }

    pub fn all() -> &'static [ProductCategory] {
        &[
            ProductCategory::ComputeInstance,
            ProductCategory::OsImage,
            ProductCategory::VolumeType,
            ProductCategory::Bandwidth,
            ProductCategory::Ip,
            ProductCategory::CrossConnect,
            ProductCategory::ObjectStorageConfiguration,
        ]
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One price view (effective, tenant override or admin default).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceView {
    #[serde(default, deserialize_with = "lenient_opt_amount")]
    pub price_local: Option<f64>,
    #[serde(default, deserialize_with = "lenient_opt_amount")]
    pub price_usd: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TierPricing {
    #[serde(default)]
    pub effective: Option<PriceView>,
    #[serde(default)]
    pub tenant: Option<PriceView>,
    #[serde(default)]
    pub admin: Option<PriceView>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductDescriptor {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub productable_id: Option<String>,
}

/// A priced product offered for a region/category/country scope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceTierOption {
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub pricing: Option<TierPricing>,
    #[serde(default, deserialize_with = "lenient_opt_amount")]
    pub price_local: Option<f64>,
    #[serde(default, deserialize_with = "lenient_opt_amount")]
    pub price_usd: Option<f64>,
    #[serde(default, deserialize_with = "lenient_opt_amount")]
    pub unit_price: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub product: Option<ProductDescriptor>,
}

impl PriceTierOption {
    /// True when `tier_id` names this option by id or by its product's productable id.
    pub fn matches(&self, tier_id: &str) -> bool {
        let wanted = tier_id.trim();
        if wanted.is_empty() {
            return false;
        }
        let productable = self.product.as_ref().and_then(|p| p.productable_id.as_deref());
        [self.id.as_deref(), productable]
            .into_iter()
            .flatten()
            .any(|id| id == wanted)
    }

    pub fn productable_id(&self) -> Option<String> {
        self.product
            .as_ref()
            .and_then(|p| p.productable_id.clone())
            .or_else(|| self.id.clone())
    }

    pub fn display_name(&self) -> String {
        self.product
            .as_ref()
            .and_then(|p| p.name.clone())
            .or_else(|| self.name.clone())
            .or_else(|| self.id.clone())
            .unwrap_or_else(|| "Unnamed product".to_string())
    }
}
