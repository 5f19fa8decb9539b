//! Run report rendering.

mod format;
mod report;

pub use format::OutputFormat;
pub use report::{print_report, report_json, report_text};
