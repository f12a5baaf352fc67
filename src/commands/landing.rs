use clap::Args;

use bulkedit::presets;
use bulkedit::report::RunReport;
use bulkedit::rewrite::{self, FileSet};

use crate::commands::{CmdResult, GlobalArgs, RunFlags};

#[derive(Args)]
pub struct LandingArgs {
    /// Landing page source file
    #[arg(default_value = presets::LANDING_PAGE_PATH)]
    file: String,

    #[command(flatten)]
    flags: RunFlags,
}

pub fn run(args: LandingArgs, _global: &GlobalArgs) -> CmdResult<RunReport> {
    let table = presets::landing_page()?;
    let files = FileSet::fixed([args.file.as_str()]);

    let report = rewrite::run("landing", &files, &table, args.flags.options())?;
    Ok((report, 0))
}

pub fn is_json(args: &LandingArgs) -> bool {
    args.flags.json
}
