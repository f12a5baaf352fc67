//! Run report: per-file outcomes plus a summary for one invocation.

use serde::Serialize;

/// What happened to a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    Changed,
    Unchanged,
    NotFound,
    Error,
}

impl OutcomeStatus {
    /// Status marker used in the text log.
    pub fn marker(&self) -> &'static str {
        match self {
            OutcomeStatus::Changed => "changed",
            OutcomeStatus::Unchanged => "no-change",
            OutcomeStatus::NotFound => "not-found",
            OutcomeStatus::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileOutcome {
    pub path: String,
    pub status: OutcomeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub total: usize,
    pub changed: usize,
    pub unchanged: usize,
    pub not_found: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub action: String,
    pub dry_run: bool,
    pub results: Vec<FileOutcome>,
    pub summary: RunSummary,
}

impl RunReport {
    pub fn new(action: impl Into<String>, dry_run: bool) -> Self {
        Self {
            action: action.into(),
            dry_run,
            results: Vec::new(),
            summary: RunSummary::default(),
        }
    }

    pub fn record_changed(&mut self, path: String) {
        self.summary.changed += 1;
        self.push(path, OutcomeStatus::Changed, None);
    }

    pub fn record_unchanged(&mut self, path: String) {
        self.summary.unchanged += 1;
        self.push(path, OutcomeStatus::Unchanged, None);
    }

    pub fn record_not_found(&mut self, path: String) {
        self.summary.not_found += 1;
        self.push(path, OutcomeStatus::NotFound, None);
    }

    pub fn record_error(&mut self, path: String, error: String) {
        self.summary.failed += 1;
        self.push(path, OutcomeStatus::Error, Some(error));
    }

    fn push(&mut self, path: String, status: OutcomeStatus, error: Option<String>) {
        self.summary.total += 1;
        self.results.push(FileOutcome {
            path,
            status,
            error,
        });
    }

    /// One-line run summary.
    pub fn summary_line(&self) -> String {
        let changed = self.summary.changed;
        if changed == 0 {
            return "Nothing changed".to_string();
        }

        let noun = if changed == 1 { "file" } else { "files" };
        let verb = if self.dry_run { "would change" } else { "changed" };
        let mut line = format!("{} {} {}", changed, noun, verb);
        if self.summary.failed > 0 {
            line.push_str(&format!(" ({} failed)", self.summary.failed));
        }
        line
    }
}
