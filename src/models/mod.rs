pub mod app_state;
pub mod country;
pub mod discount;
pub mod price_tier;
pub mod pricing_result;
pub mod quote_file;
pub mod quote_line;
pub mod quote_request;
pub mod region;
pub mod storage_item;
pub mod validation;
pub mod workload_item;

pub use app_state::{AppState, CalculatorSession, SessionView};
pub use country::Country;
pub use discount::{DiscountKind, DiscountSpec};
pub use price_tier::{PriceTierOption, PriceView, ProductCategory, ProductDescriptor, TierPricing};
pub use pricing_result::{ObjectStorageBlock, PricingResult};
pub use quote_file::QuoteFile;
pub use quote_line::QuoteLine;
pub use quote_request::{GeneratedInvoice, InvoiceMeta, LeadMeta, QuoteResponse, QuoteSubmission};
pub use region::Region;
pub use storage_item::{StorageDisplay, StorageDraft, StorageItem, StorageRequest};
pub use validation::ValidationErrors;
pub use workload_item::{VolumeDraft, VolumeSpec, WorkloadDisplay, WorkloadDraft, WorkloadItem};
