//! Rewrite rules and ordered rule tables.
//!
//! A rule turns text into text. Tables apply their rules in order, each
//! rule seeing the output of the previous one.

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::section::{RemovalRule, SectionRule};
use crate::error::{Error, Result};

// ============================================================================
// Rules
// ============================================================================

/// A single rewrite step.
#[derive(Debug, Clone)]
pub enum Rule {
    /// Regex pattern with a `$1` / `${name}` replacement template.
    Regex {
        pattern: Regex,
        replacement: String,
    },
    /// Exact substring replacement.
    Literal { find: String, replace: String },
    /// Hide a marked section behind comment delimiters.
    Section(SectionRule),
    /// Delete a marked span.
    Remove(RemovalRule),
    /// Insert `text` after the first `anchor`, unless `text` is already present.
    InsertAfter { anchor: String, text: String },
}

impl Rule {
    pub fn regex(pattern: &str, replacement: &str) -> Result<Self> {
        let compiled = Regex::new(pattern).map_err(|e| {
            Error::config_invalid_value("pattern", Some(pattern.to_string()), e.to_string())
        })?;

        Ok(Rule::Regex {
            pattern: compiled,
            replacement: replacement.to_string(),
        })
    }

    /// Literal replacement. Rejected when a replacement could form the search
    /// text again: one containing the other, or an edge of the replacement
    /// overlapping an edge of the search text. An empty replacement is a
    /// deletion and may still join its neighbours into a new match.
    pub fn literal(find: &str, replace: &str) -> Result<Self> {
        if find.is_empty() {
            return Err(Error::config_invalid_value(
                "find",
                None,
                "literal search text is empty",
            ));
        }
        if replace.contains(find) {
            return Err(Error::config_invalid_value(
                "replace",
                Some(replace.to_string()),
                format!("replacement contains the search text '{}'", find),
            ));
        }
        if !replace.is_empty() && (find.contains(replace) || edges_overlap(find, replace)) {
            return Err(Error::config_invalid_value(
                "replace",
                Some(replace.to_string()),
                format!("replacement can recombine into the search text '{}'", find),
            ));
        }

        Ok(Rule::Literal {
            find: find.to_string(),
            replace: replace.to_string(),
        })
    }

    pub fn section(label: &str, marker: &str, end: &str) -> Result<Self> {
        Ok(Rule::Section(SectionRule::new(label, marker, end)?))
    }

    pub fn remove(marker: &str, end: &str) -> Result<Self> {
        Ok(Rule::Remove(RemovalRule::new(marker, end)?))
    }

    pub fn insert_after(anchor: &str, text: &str) -> Result<Self> {
        if anchor.is_empty() {
            return Err(Error::config_invalid_value("anchor", None, "insert anchor is empty"));
        }
        if text.is_empty() {
            return Err(Error::config_invalid_value("text", None, "inserted text is empty"));
        }

        Ok(Rule::InsertAfter {
            anchor: anchor.to_string(),
            text: text.to_string(),
        })
    }

    pub fn from_spec(spec: &RuleSpec) -> Result<Self> {
        match spec {
            RuleSpec::Regex {
                pattern,
                replacement,
            } => Rule::regex(pattern, replacement),
            RuleSpec::Literal { find, replace } => Rule::literal(find, replace),
            RuleSpec::Section { label, marker, end } => Rule::section(label, marker, end),
            RuleSpec::Remove { marker, end } => Rule::remove(marker, end),
            RuleSpec::InsertAfter { anchor, text } => Rule::insert_after(anchor, text),
        }
    }

    pub fn apply(&self, text: &str) -> String {
        match self {
            Rule::Regex {
                pattern,
                replacement,
            } => pattern
                .replace_all(text, replacement.as_str())
                .into_owned(),
            Rule::Literal { find, replace } => text.replace(find.as_str(), replace),
            Rule::Section(section) => section.apply(text),
            Rule::Remove(removal) => removal.apply(text),
            Rule::InsertAfter { anchor, text: insert } => {
                if text.contains(insert.as_str()) {
                    return text.to_string();
                }
                match text.find(anchor.as_str()) {
                    Some(at) => {
                        let split = at + anchor.len();
                        let mut out = String::with_capacity(text.len() + insert.len());
                        out.push_str(&text[..split]);
                        out.push_str(insert);
                        out.push_str(&text[split..]);
                        out
                    }
                    None => text.to_string(),
                }
            }
        }
    }

    /// Serializable description, in the same shape rule files use.
    pub fn spec(&self) -> RuleSpec {
        match self {
            Rule::Regex {
                pattern,
                replacement,
            } => RuleSpec::Regex {
                pattern: pattern.as_str().to_string(),
                replacement: replacement.clone(),
            },
            Rule::Literal { find, replace } => RuleSpec::Literal {
                find: find.clone(),
                replace: replace.clone(),
            },
            Rule::Section(section) => RuleSpec::Section {
                label: section.label().to_string(),
                marker: section.marker().to_string(),
                end: section.end_pattern().to_string(),
            },
            Rule::Remove(removal) => RuleSpec::Remove {
                marker: removal.marker().to_string(),
                end: removal.end_pattern().to_string(),
            },
            Rule::InsertAfter { anchor, text } => RuleSpec::InsertAfter {
                anchor: anchor.clone(),
                text: text.clone(),
            },
        }
    }
}

/// On-disk / on-wire form of a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleSpec {
    Regex {
        pattern: String,
        replacement: String,
    },
    Literal {
        find: String,
        replace: String,
    },
    Section {
        label: String,
        marker: String,
        end: String,
    },
    Remove {
        marker: String,
        end: String,
    },
    InsertAfter {
        anchor: String,
        text: String,
    },
}

/// Whether a proper suffix of one string is a prefix of the other.
fn edges_overlap(find: &str, replace: &str) -> bool {
    let suffix_is_prefix = |a: &str, b: &str| {
        a.char_indices()
            .skip(1)
            .any(|(i, _)| b.starts_with(&a[i..]))
    };
    suffix_is_prefix(find, replace) || suffix_is_prefix(replace, find)
}

// ============================================================================
// Rule tables
// ============================================================================

/// Ordered list of rules applied to each file's text.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    pub name: String,
    rules: Vec<Rule>,
}

impl RuleTable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rules: Vec::new(),
        }
    }

    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    pub fn extend(&mut self, rules: impl IntoIterator<Item = Rule>) {
        self.rules.extend(rules);
    }

    pub fn with_rules(mut self, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.extend(rules);
        self
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn apply(&self, text: &str) -> String {
        let mut content = text.to_string();
        for rule in &self.rules {
            content = rule.apply(&content);
        }
        content
    }

    pub fn specs(&self) -> Vec<RuleSpec> {
        self.rules.iter().map(Rule::spec).collect()
    }
}

// ============================================================================
// Import rules
// ============================================================================

/// A component file rename: `Button` → `button`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportRename {
    pub from: String,
    pub to: String,
}

impl ImportRename {
    pub fn new(from: &str, to: &str) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    /// Parse `From=to`.
    pub fn parse(raw: &str) -> Result<Self> {
        let Some((from, to)) = raw.split_once('=') else {
            return Err(Error::validation_invalid_argument(
                "map",
                format!("expected From=to, got '{}'", raw),
                None,
                None,
            ));
        };

        let (from, to) = (from.trim(), to.trim());
        if from.is_empty() || to.is_empty() {
            return Err(Error::validation_invalid_argument(
                "map",
                format!("empty component name in '{}'", raw),
                None,
                None,
            ));
        }
        if from == to {
            return Err(Error::validation_invalid_argument(
                "map",
                format!("'{}' maps to itself", from),
                None,
                None,
            ));
        }

        Ok(Self::new(from, to))
    }
}

/// Where an import path may carry a component name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportClass {
    /// `from '<prefix>/UI/Name'`
    UiDirectory,
    /// `from './Name'`
    SameDirectory,
}

const QUOTES: [char; 2] = ['\'', '"'];

/// Build import rules name by name, each name emitting its classes in the
/// order given and one rule per quote style.
///
/// The `regex` crate has no backreferences, so "closing quote equals
/// opening quote" is expressed by emitting a separate rule per quote.
pub fn import_rules(renames: &[ImportRename], classes: &[ImportClass]) -> Result<Vec<Rule>> {
    let mut rules = Vec::new();

    for rename in renames {
        let from = regex::escape(&rename.from);
        let to = rename.to.replace('$', "$$");

        for class in classes {
            for quote in QUOTES {
                let rule = match class {
                    ImportClass::UiDirectory => Rule::regex(
                        &format!(r#"from {q}([^'"\n]*/UI/){from}{q}"#, q = quote, from = from),
                        &format!("from {q}${{1}}{to}{q}", q = quote, to = to),
                    )?,
                    ImportClass::SameDirectory => Rule::regex(
                        &format!(r#"from {q}\./{from}{q}"#, q = quote, from = from),
                        &format!("from {q}./{to}{q}", q = quote, to = to),
                    )?,
                };
                rules.push(rule);
            }
        }
    }

    Ok(rules)
}

// ============================================================================
// Tests
// ============================================================================
