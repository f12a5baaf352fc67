//! External rule tables loaded from JSON.
//!
//! ```json
//! {
//!   "name": "hide-pricing",
//!   "extensions": ["tsx"],
//!   "rules": [
//!     { "kind": "literal", "find": "Get Started Free", "replace": "Sign In" },
//!     { "kind": "regex", "pattern": "from '\\./Card'", "replacement": "from './card'" },
//!     { "kind": "section", "label": "Pricing", "marker": "{/* Pricing */}", "end": "</section>" },
//!     { "kind": "remove", "marker": "// legacy nav", "end": "\\}, \\[\\]\\);" },
//!     { "kind": "insert_after", "anchor": "useState(false);", "text": "\n  const ready = true;" }
//!   ]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::rewrite::{Rule, RuleSpec, RuleTable};
use crate::utils::io;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleFile {
    #[serde(default)]
    pub name: Option<String>,
    /// Discovery extensions, used when the command line gives none.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extensions: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
    pub rules: Vec<RuleSpec>,
}

impl RuleFile {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = io::read_file(path, &format!("read rule file {}", path.display()))?;
        Self::parse(&raw, &path.display().to_string())
    }

    pub fn parse(raw: &str, source: &str) -> Result<Self> {
        let file: RuleFile =
            serde_json::from_str(raw).map_err(|e| Error::config_invalid_json(source, e))?;

        if file.rules.is_empty() {
            return Err(Error::config_invalid_value(
                "rules",
                None,
                format!("{} defines no rules", source),
            ));
        }

        Ok(file)
    }

    /// Compile every rule, failing on the first invalid one.
    pub fn to_table(&self) -> Result<RuleTable> {
        let name = self.name.clone().unwrap_or_else(|| "rules".to_string());
        let mut table = RuleTable::new(name);
        for (index, spec) in self.rules.iter().enumerate() {
            let rule = Rule::from_spec(spec)
                .map_err(|e| e.with_hint(format!("Check rule #{} in the rule file", index + 1)))?;
            table.push(rule);
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_rule_kinds() {
        let raw = r#"{
            "name": "mixed",
            "extensions": ["tsx"],
            "rules": [
                {"kind": "literal", "find": "Get Started Free", "replace": "Sign In"},
                {"kind": "regex", "pattern": "from '\\./Card'", "replacement": "from './card'"},
                {"kind": "section", "label": "Pricing", "marker": "{/* Pricing */}", "end": "</section>"}
            ]
        }"#;

        let file = RuleFile::parse(raw, "inline").unwrap();
        assert_eq!(file.extensions, vec!["tsx"]);

        let table = file.to_table().unwrap();
        assert_eq!(table.name, "mixed");
        assert_eq!(table.len(), 3);
        assert_eq!(
            table.apply("import Card from './Card';"),
            "import Card from './card';"
        );
    }

    #[test]
    fn invalid_json_is_config_error() {
        let err = RuleFile::parse("{ rules: [", "broken.json").unwrap_err();
        assert_eq!(err.code.as_str(), "config.invalid_json");
        assert_eq!(err.details["path"], "broken.json");
    }

    #[test]
    fn unknown_kind_is_config_error() {
        let raw = r#"{"rules": [{"kind": "shell", "cmd": "rm"}]}"#;
        let err = RuleFile::parse(raw, "x.json").unwrap_err();
        assert_eq!(err.code.as_str(), "config.invalid_json");
    }

    #[test]
    fn empty_rules_rejected() {
        let err = RuleFile::parse(r#"{"rules": []}"#, "x.json").unwrap_err();
        assert_eq!(err.code.as_str(), "config.invalid_value");
    }

    #[test]
    fn bad_regex_points_at_rule_index() {
        let raw = r#"{"rules": [
            {"kind": "literal", "find": "a", "replace": "b"},
            {"kind": "regex", "pattern": "(", "replacement": "x"}
        ]}"#;
        let err = RuleFile::parse(raw, "x.json").unwrap().to_table().unwrap_err();
        assert_eq!(err.code.as_str(), "config.invalid_value");
        assert!(err.hints.iter().any(|h| h.message.contains("#2")));
    }

    #[test]
    fn load_reads_from_disk() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("rules.json");
        std::fs::write(
            &path,
            r#"{"rules": [{"kind": "literal", "find": "Beta", "replace": "GA"}]}"#,
        )
        .unwrap();

        let table = RuleFile::load(&path).unwrap().to_table().unwrap();
        assert_eq!(table.apply("Beta build"), "GA build");
    }
}
