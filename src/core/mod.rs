pub mod config;
pub mod error;
pub mod presets;
pub mod report;
pub mod rewrite;

// Re-export common types for convenience
pub use error::{Error, ErrorCode, Result};
pub use report::{FileOutcome, OutcomeStatus, RunReport, RunSummary};
