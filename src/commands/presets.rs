use clap::Args;
use serde::Serialize;

use bulkedit::presets;
use bulkedit::rewrite::RuleSpec;

use crate::commands::{CmdResult, GlobalArgs};

#[derive(Args)]
pub struct PresetsArgs {
    /// Print every rule of every table as a JSON envelope
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum PresetsOutput {
    #[serde(rename = "presets.list")]
    List {
        default_root: String,
        default_extensions: Vec<String>,
        known_import_files: Vec<String>,
        landing_page: String,
        tables: Vec<TableSummary>,
    },
}

#[derive(Serialize)]
pub struct TableSummary {
    pub name: String,
    pub rules: Vec<RuleSpec>,
}

pub fn run(_args: PresetsArgs, _global: &GlobalArgs) -> CmdResult<PresetsOutput> {
    let tables = presets::all()?
        .iter()
        .map(|table| TableSummary {
            name: table.name.clone(),
            rules: table.specs(),
        })
        .collect();

    Ok((
        PresetsOutput::List {
            default_root: presets::DEFAULT_ROOT.to_string(),
            default_extensions: to_strings(presets::DEFAULT_EXTENSIONS),
            known_import_files: to_strings(presets::KNOWN_IMPORT_FILES),
            landing_page: presets::LANDING_PAGE_PATH.to_string(),
            tables,
        },
        0,
    ))
}

pub fn is_json(args: &PresetsArgs) -> bool {
    args.json
}

impl PresetsOutput {
    /// Short listing: defaults, known files, and each table's rule count.
    pub fn render_text(&self) -> String {
        let PresetsOutput::List {
            default_root,
            default_extensions,
            known_import_files,
            landing_page,
            tables,
        } = self;

        let mut out = String::new();
        out.push_str(&format!("root:        {}\n", default_root));
        out.push_str(&format!("extensions:  {}\n", default_extensions.join(" ")));
        out.push_str(&format!("landing:     {}\n", landing_page));
        out.push_str("known files:\n");
        for path in known_import_files {
            out.push_str(&format!("  {}\n", path));
        }
        out.push_str("tables:\n");
        for table in tables {
            out.push_str(&format!("  {} ({} rules)\n", table.name, table.rules.len()));
        }
        out
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_listing_names_every_table() {
        let (output, code) = run(PresetsArgs { json: false }, &GlobalArgs {}).unwrap();
        let text = output.render_text();

        assert_eq!(code, 0);
        assert!(text.starts_with("root:        src\n"));
        assert!(text.contains("  landing-page (6 rules)\n"));
        assert_eq!(text.matches(" rules)").count(), presets::all().unwrap().len());
    }
}
