//! Pure pricing logic: tier price resolution, quote aggregation, currency
//! lookup and the local estimate used when the backend aggregate is missing.
//!
//! Nothing in here touches the network; callers fetch price tables and
//! pricing results through [`crate::api`] and hand them in.

pub mod aggregator;
pub mod currency;
pub mod estimate;
pub mod resolver;

pub use aggregator::{aggregate, QuoteSummary, StorageSource};
pub use currency::{resolve_country_currency, CurrencyTracker};
pub use estimate::{estimate_pricing, PriceBook};
pub use resolver::{find_tier, resolve_tier_currency, resolve_unit_price};

/// Currency of last resort.
pub const FALLBACK_CURRENCY: &str = "USD";
