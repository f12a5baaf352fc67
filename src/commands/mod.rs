use clap::Args;

pub type CmdResult<T> = bulkedit::Result<(T, i32)>;

pub(crate) struct GlobalArgs {}

/// Flags shared by every command that rewrites files.
#[derive(Args, Default, Debug, Clone)]
pub struct RunFlags {
    /// Report what would change without writing files
    #[arg(long)]
    pub dry_run: bool,

    /// Print the run report as a JSON envelope instead of text
    #[arg(long)]
    pub json: bool,
}

impl RunFlags {
    pub fn options(&self) -> bulkedit::rewrite::RewriteOptions {
        bulkedit::rewrite::RewriteOptions {
            dry_run: self.dry_run,
        }
    }
}

pub mod apply;
pub mod imports;
pub mod landing;
pub mod presets;

/// Dispatch a command to its handler and map result to JSON.
macro_rules! dispatch {
    ($args:expr, $global:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run($args, $global))
    };
}

/// Dispatch a rewrite command and render its report as text.
macro_rules! dispatch_text {
    ($args:expr, $global:expr, $module:ident) => {
        crate::output::map_report_to_text($module::run($args, $global))
    };
}

pub(crate) fn run_json(
    command: crate::Commands,
    global: &GlobalArgs,
) -> (bulkedit::Result<serde_json::Value>, i32) {
    crate::tty::status("bulkedit is working...");

    match command {
        crate::Commands::Imports(args) => dispatch!(args, global, imports),
        crate::Commands::Landing(args) => dispatch!(args, global, landing),
        crate::Commands::Apply(args) => dispatch!(args, global, apply),
        crate::Commands::Presets(args) => dispatch!(args, global, presets),
    }
}

pub(crate) fn run_text(
    command: crate::Commands,
    global: &GlobalArgs,
) -> (bulkedit::Result<String>, i32) {
    crate::tty::status("bulkedit is working...");

    match command {
        crate::Commands::Imports(args) => dispatch_text!(args, global, imports),
        crate::Commands::Landing(args) => dispatch_text!(args, global, landing),
        crate::Commands::Apply(args) => dispatch_text!(args, global, apply),
        crate::Commands::Presets(args) => crate::output::map_cmd_result_to_text(
            presets::run(args, global).map(|(output, code)| (output.render_text(), code)),
        ),
    }
}
