pub mod calculator_service;
pub mod quote_service;
pub mod workload_service;

pub use calculator_service::{load_price_book, price_workload, resolve_storage_item, submit};
pub use quote_service::{build_pricing_payload, build_quote_payload, decode_pdf, save_invoices, strip_display_fields};
pub use workload_service::Workload;
