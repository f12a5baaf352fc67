use clap::{Parser, Subcommand};

use commands::GlobalArgs;

#[derive(Debug, Clone, Copy)]
enum ResponseMode {
    Json,
    Text,
}

mod commands;
mod output;
mod tty;

use commands::{apply, imports, landing, presets};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "bulkedit")]
#[command(version = VERSION)]
#[command(about = "Bulk pattern rewrites across front-end source files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite UI component imports to lower-case file names
    Imports(imports::ImportsArgs),
    /// Rename landing page buttons and hide unfinished sections
    Landing(landing::LandingArgs),
    /// Run a rule table from a JSON file
    Apply(apply::ApplyArgs),
    /// List the built-in rule tables
    Presets(presets::PresetsArgs),
}

fn response_mode(command: &Commands) -> ResponseMode {
    match command {
        Commands::Imports(args) if imports::is_json(args) => ResponseMode::Json,
        Commands::Landing(args) if landing::is_json(args) => ResponseMode::Json,
        Commands::Apply(args) if apply::is_json(args) => ResponseMode::Json,
        Commands::Presets(args) if presets::is_json(args) => ResponseMode::Json,
        _ => ResponseMode::Text,
    }
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    let global = GlobalArgs {};

    let exit_code = match response_mode(&cli.command) {
        ResponseMode::Json => {
            let (json_result, exit_code) = commands::run_json(cli.command, &global);
            if let Err(err) = output::print_json_result(json_result) {
                eprintln!("{}", err);
            }
            exit_code
        }
        ResponseMode::Text => {
            let (text_result, exit_code) = commands::run_text(cli.command, &global);
            if let Err(err) = output::print_text_result(text_result) {
                eprintln!("{}", err);
            }
            exit_code
        }
    };

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
