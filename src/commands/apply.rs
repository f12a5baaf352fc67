use clap::Args;

use bulkedit::config::RuleFile;
use bulkedit::Error;
use bulkedit::log_status;
use bulkedit::presets;
use bulkedit::report::RunReport;
use bulkedit::rewrite::{self, expand_path, Discovery, FileSet};

use crate::commands::{CmdResult, GlobalArgs, RunFlags};

#[derive(Args)]
pub struct ApplyArgs {
    /// JSON rule file
    #[arg(long, value_name = "FILE")]
    rules: String,

    /// Source root to scan
    #[arg(long, conflicts_with = "files")]
    path: Option<String>,

    /// File suffix to scan, repeatable (overrides the rule file's list)
    #[arg(long = "ext", value_name = "EXT", conflicts_with = "files")]
    extensions: Vec<String>,

    /// Glob (relative to the root) of files to skip, repeatable
    #[arg(long, value_name = "GLOB", conflicts_with = "files")]
    exclude: Vec<String>,

    /// Rewrite only these files, repeatable
    #[arg(long = "file", value_name = "PATH")]
    files: Vec<String>,

    #[command(flatten)]
    flags: RunFlags,
}

pub fn run(args: ApplyArgs, _global: &GlobalArgs) -> CmdResult<RunReport> {
    let rule_file = RuleFile::load(&expand_path(&args.rules))?;
    let table = rule_file.to_table()?;

    let files = if !args.files.is_empty() {
        FileSet::fixed(&args.files)
    } else if let Some(root) = args.path.as_deref() {
        let discovery = if !args.extensions.is_empty() {
            Discovery::new(root, &args.extensions)
        } else if !rule_file.extensions.is_empty() {
            Discovery::new(root, &rule_file.extensions)
        } else {
            Discovery::new(root, presets::DEFAULT_EXTENSIONS)
        };

        let mut exclude = args.exclude;
        exclude.extend(rule_file.exclude.iter().cloned());
        FileSet::Discover(discovery.with_exclude(exclude))
    } else {
        return Err(
            Error::validation_missing_argument(vec!["path".to_string(), "file".to_string()])
                .with_hint("Pass --path <root> to scan a tree or --file <path> for a fixed list"),
        );
    };

    log_status!("apply", "Applying {} rules from {}", table.len(), args.rules);

    let report = rewrite::run(&table.name, &files, &table, args.flags.options())?;
    Ok((report, 0))
}

pub fn is_json(args: &ApplyArgs) -> bool {
    args.flags.json
}
