// Atomic API modules
pub mod client;
pub mod error;
pub mod regions;
pub mod countries;
pub mod pricing;
pub mod quotes;

// Re-export commonly used functions
pub use client::{api_call, set_silent, ApiContext};
pub use error::ApiError;
pub use regions::load_regions;
pub use countries::load_countries;
pub use pricing::load_price_options;
pub use quotes::{request_pricing, submit_quote};
