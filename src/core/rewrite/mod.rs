//! Bulk text rewriting: apply an ordered rule table to a set of files.
//!
//! Each file is read, rewritten in memory, and written back only when the
//! text changed. A failure on one file is recorded in the report and the
//! run moves on to the next file.

mod files;
mod rule;
mod section;

pub use files::{expand_path, Discovery, FileSet};
pub use rule::{import_rules, ImportClass, ImportRename, Rule, RuleSpec, RuleTable};
pub use section::{RemovalRule, SectionRule};

use std::path::Path;

use crate::error::Result;
use crate::report::RunReport;
use crate::utils::io;

#[derive(Debug, Clone, Copy, Default)]
pub struct RewriteOptions {
    /// Compute outcomes without writing anything.
    pub dry_run: bool,
}

/// Run `table` over every file in `files`.
///
/// Only resolving a discovery root can fail the whole run; everything after
/// that is recorded per file.
pub fn run(
    action: &str,
    files: &FileSet,
    table: &RuleTable,
    options: RewriteOptions,
) -> Result<RunReport> {
    let mut report = RunReport::new(action, options.dry_run);

    match files {
        FileSet::Discover(discovery) => {
            for path in discovery.resolve()? {
                rewrite_into_report(&path, table, options, &mut report);
            }
        }
        FileSet::Fixed(paths) => {
            for path in paths {
                if !path.exists() {
                    log_status!("rewrite", "Not found: {}", path.display());
                    report.record_not_found(path.display().to_string());
                    continue;
                }
                rewrite_into_report(path, table, options, &mut report);
            }
        }
    }

    Ok(report)
}

fn rewrite_into_report(
    path: &Path,
    table: &RuleTable,
    options: RewriteOptions,
    report: &mut RunReport,
) {
    let display = path.display().to_string();

    match rewrite_file(path, table, options) {
        Ok(true) => {
            log_status!("rewrite", "Changed: {}", display);
            report.record_changed(display);
        }
        Ok(false) => report.record_unchanged(display),
        Err(e) => {
            log_status!("rewrite", "Error in {}: {}", display, e);
            report.record_error(display, e.to_string());
        }
    }
}

/// Rewrite one file. Returns whether the text changed.
pub fn rewrite_file(path: &Path, table: &RuleTable, options: RewriteOptions) -> Result<bool> {
    let original = io::read_file(path, &format!("read {}", path.display()))?;
    let rewritten = table.apply(&original);

    if rewritten == original {
        return Ok(false);
    }

    if !options.dry_run {
        io::write_file(path, &rewritten, &format!("write {}", path.display()))?;
    }

    Ok(true)
}
