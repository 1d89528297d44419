// Individual template files
pub mod summary_template;

pub use summary_template::{SummaryRow, SummaryTemplate};
