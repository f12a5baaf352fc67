//! CLI output: JSON envelope and human-readable run log.

mod response;
mod text;

pub use response::{map_cmd_result_to_json, print_json_result};
pub use text::{map_cmd_result_to_text, map_report_to_text, print_text_result};
