//! Marked spans: hide them behind a JSX comment or delete them.
//!
//! A span starts at a literal marker and ends at the first match of an end
//! pattern after it. Hiding replaces the marker line with an annotated
//! marker; removal deletes the marker. Either way a repeated run finds no
//! marker and leaves the text alone.

use regex::Regex;

use crate::error::{Error, Result};

const HIDDEN_NOTE: &str = "Hidden for deployment";

#[derive(Debug, Clone)]
pub struct SectionRule {
    label: String,
    marker: String,
    end_source: String,
    end: Regex,
}

impl SectionRule {
    /// `end` is compiled with dot-matches-newline so it can span lines.
    pub fn new(label: &str, marker: &str, end: &str) -> Result<Self> {
        if marker.trim().is_empty() {
            return Err(Error::config_invalid_value(
                "marker",
                None,
                "section marker is empty",
            ));
        }

        let compiled = compile_end(end)?;

        let rule = Self {
            label: label.to_string(),
            marker: marker.to_string(),
            end_source: end.to_string(),
            end: compiled,
        };

        if rule.annotation().contains(marker) {
            return Err(Error::config_invalid_value(
                "label",
                Some(label.to_string()),
                format!("annotated marker would still contain '{}'", marker),
            ));
        }

        Ok(rule)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    pub fn end_pattern(&self) -> &str {
        &self.end_source
    }

    fn annotation(&self) -> String {
        format!("{{/* {} - {} */}}", self.label, HIDDEN_NOTE)
    }

    /// Wrap every section found. Text with no marker, or a marker with no
    /// end match after it, comes back unchanged from that point on.
    pub fn apply(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len() + 64);
        let mut cursor = 0;

        while let Some(found) = text[cursor..].find(&self.marker) {
            let marker_at = cursor + found;
            let body_start = marker_at + self.marker.len();

            let Some(end) = self.end.find(&text[body_start..]) else {
                break;
            };
            let span_end = body_start + end.end();

            let (span_start, indent) = marker_line_prefix(text, cursor, marker_at);
            let newline = line_ending_after(text, body_start);

            out.push_str(&text[cursor..span_start]);
            if span_start != marker_at {
                out.push_str(indent);
            }
            out.push_str(&self.annotation());
            out.push_str(newline);
            out.push_str(indent);
            out.push_str("{/*");
            out.push_str(&strip_stray_delimiters(&text[body_start..span_end]));
            out.push_str(newline);
            out.push_str(indent);
            out.push_str("*/}");

            cursor = span_end;
        }

        out.push_str(&text[cursor..]);
        out
    }
}

/// Deletes every span from a marker through the first end match after it.
#[derive(Debug, Clone)]
pub struct RemovalRule {
    marker: String,
    end_source: String,
    end: Regex,
}

impl RemovalRule {
    pub fn new(marker: &str, end: &str) -> Result<Self> {
        if marker.trim().is_empty() {
            return Err(Error::config_invalid_value(
                "marker",
                None,
                "removal marker is empty",
            ));
        }

        Ok(Self {
            marker: marker.to_string(),
            end_source: end.to_string(),
            end: compile_end(end)?,
        })
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    pub fn end_pattern(&self) -> &str {
        &self.end_source
    }

    /// A marker alone on its line takes the whole line with it, including
    /// the line break after the end match.
    pub fn apply(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut cursor = 0;

        while let Some(found) = text[cursor..].find(&self.marker) {
            let marker_at = cursor + found;
            let body_start = marker_at + self.marker.len();

            let Some(end) = self.end.find(&text[body_start..]) else {
                break;
            };
            let mut span_end = body_start + end.end();

            let (span_start, _) = marker_line_prefix(text, cursor, marker_at);
            if span_start == 0 || text[..span_start].ends_with('\n') {
                span_end += trailing_line_break(&text[span_end..]);
            }

            out.push_str(&text[cursor..span_start]);
            cursor = span_end;
        }

        out.push_str(&text[cursor..]);
        out
    }
}

fn compile_end(end: &str) -> Result<Regex> {
    Regex::new(&format!("(?s){}", end))
        .map_err(|e| Error::config_invalid_value("end", Some(end.to_string()), e.to_string()))
}

/// Line ending used by the line containing `at`; `\n` when there is none.
fn line_ending_after(text: &str, at: usize) -> &'static str {
    match text[at..].find('\n') {
        Some(i) if text[..at + i].ends_with('\r') => "\r\n",
        _ => "\n",
    }
}

/// Length of a line break (plus trailing spaces before it) at the start of `rest`.
fn trailing_line_break(rest: &str) -> usize {
    let spaces = rest.len() - rest.trim_start_matches([' ', '\t']).len();
    let after = &rest[spaces..];
    if after.starts_with("\r\n") {
        spaces + 2
    } else if after.starts_with('\n') {
        spaces + 1
    } else {
        0
    }
}

/// Where the replaced span starts and the indentation to reuse.
///
/// When only whitespace precedes the marker on its line, the span starts at
/// the line start and that whitespace is the indent. Otherwise the span
/// starts at the marker and the line's leading whitespace is the indent for
/// the following lines only.
fn marker_line_prefix(text: &str, floor: usize, marker_at: usize) -> (usize, &str) {
    let line_start = text[..marker_at]
        .rfind('\n')
        .map(|i| i + 1)
        .unwrap_or(0)
        .max(floor);
    let before = &text[line_start..marker_at];

    if before.trim().is_empty() {
        (line_start, before)
    } else {
        let indent_len = before.len() - before.trim_start().len();
        (marker_at, &before[..indent_len])
    }
}

/// Drop lines that are only `/*` or `*/`, left behind by earlier edits.
fn strip_stray_delimiters(body: &str) -> String {
    body.split_inclusive('\n')
        .filter(|line| !matches!(line.trim(), "/*" | "*/"))
        .collect()
}
