use clap::Args;

use bulkedit::log_status;
use bulkedit::presets;
use bulkedit::report::RunReport;
use bulkedit::rewrite::{self, Discovery, FileSet, ImportRename};

use crate::commands::{CmdResult, GlobalArgs, RunFlags};

#[derive(Args)]
pub struct ImportsArgs {
    /// Source root to scan [default: src]
    #[arg(long, conflicts_with_all = ["files", "known_files"])]
    path: Option<String>,

    /// File suffix to scan, repeatable [default: tsx, ts, jsx, js]
    #[arg(long = "ext", value_name = "EXT", conflicts_with_all = ["files", "known_files"])]
    extensions: Vec<String>,

    /// Glob (relative to the root) of files to skip, repeatable
    #[arg(long, value_name = "GLOB", conflicts_with_all = ["files", "known_files"])]
    exclude: Vec<String>,

    /// Rewrite only these files, repeatable (only `/UI/` imports are fixed)
    #[arg(long = "file", value_name = "PATH")]
    files: Vec<String>,

    /// Rewrite the built-in list of files known to import UI components
    #[arg(long)]
    known_files: bool,

    /// Component rename as From=to, repeatable (replaces the default map)
    #[arg(long = "map", value_name = "FROM=TO")]
    map: Vec<String>,

    #[command(flatten)]
    flags: RunFlags,
}

pub fn run(args: ImportsArgs, _global: &GlobalArgs) -> CmdResult<RunReport> {
    let fixed = !args.files.is_empty() || args.known_files;

    let renames = if args.map.is_empty() {
        presets::renames(if fixed {
            presets::FIXED_LIST_RENAMES
        } else {
            presets::COMPONENT_RENAMES
        })
    } else {
        args.map
            .iter()
            .map(|raw| ImportRename::parse(raw))
            .collect::<bulkedit::Result<Vec<_>>>()?
    };

    let (files, table) = if fixed {
        let mut paths = args.files;
        if args.known_files {
            paths.extend(presets::KNOWN_IMPORT_FILES.iter().map(|p| p.to_string()));
        }
        (FileSet::fixed(&paths), presets::ui_imports(&renames)?)
    } else {
        let root = args.path.as_deref().unwrap_or(presets::DEFAULT_ROOT);
        let discovery = if args.extensions.is_empty() {
            Discovery::new(root, presets::DEFAULT_EXTENSIONS)
        } else {
            Discovery::new(root, &args.extensions)
        };
        (
            FileSet::Discover(discovery.with_exclude(args.exclude)),
            presets::component_imports(&renames)?,
        )
    };

    log_status!(
        "imports",
        "Applying {} rules for {} component(s)",
        table.len(),
        renames.len()
    );

    let report = rewrite::run("imports", &files, &table, args.flags.options())?;
    Ok((report, 0))
}

pub fn is_json(args: &ImportsArgs) -> bool {
    args.flags.json
}
