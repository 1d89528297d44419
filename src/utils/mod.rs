// Query string helpers
pub mod query_string;

// JSON helpers
pub mod json_converter;
pub mod number;

// Presentation helpers
pub mod money;
pub mod filename;

pub use query_string::build_query_string;
pub use json_converter::{first_present, value_to_short_string};
pub use number::{amount, amount_or_zero, to_decimal, to_f64};
pub use money::format_money;
pub use filename::safe_pdf_filename;
