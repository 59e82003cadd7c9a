//! Output formatting module
//!
//! Provides two output formats:
//! - Terminal tables with colors
//! - JSON export

pub mod json;
pub mod terminal;

pub use json::{print_json, to_json_output, write_json_file, JsonOutput};
pub use terminal::{
    create_progress_bar, findings_table, print_error, print_header, print_outcome, print_report,
    print_success, print_summary, print_warning,
};
