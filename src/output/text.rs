//! Human-readable run log: one line per file, then a summary line.

use std::io::{self, Write};

use bulkedit::report::RunReport;
use bulkedit::{Error, Result};

use super::response::exit_code_for_error;

const MARKER_WIDTH: usize = 9;

pub fn render_report(report: &RunReport) -> String {
    let mut out = String::new();

    for outcome in &report.results {
        let marker = outcome.status.marker();
        match &outcome.error {
            Some(error) => out.push_str(&format!(
                "{:<width$}  {}: {}\n",
                marker,
                outcome.path,
                error,
                width = MARKER_WIDTH
            )),
            None => out.push_str(&format!(
                "{:<width$}  {}\n",
                marker,
                outcome.path,
                width = MARKER_WIDTH
            )),
        }
    }

    if !report.results.is_empty() {
        out.push('\n');
    }
    out.push_str(&report.summary_line());
    out.push('\n');
    out
}

pub fn map_report_to_text(result: Result<(RunReport, i32)>) -> (Result<String>, i32) {
    map_cmd_result_to_text(result.map(|(report, exit_code)| (render_report(&report), exit_code)))
}

pub fn map_cmd_result_to_text(result: Result<(String, i32)>) -> (Result<String>, i32) {
    match result {
        Ok((text, exit_code)) => (Ok(text), exit_code),
        Err(err) => {
            let exit_code = exit_code_for_error(err.code);
            (Err(err), exit_code)
        }
    }
}

pub fn print_text_result(result: Result<String>) -> Result<()> {
    match result {
        Ok(text) => write_stdout(text.trim_end_matches('\n')),
        Err(err) => {
            eprintln!("error[{}]: {}", err.code.as_str(), err.message);
            for hint in &err.hints {
                eprintln!("  hint: {}", hint.message);
            }
            Ok(())
        }
    }
}

pub(super) fn write_stdout(payload: &str) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = writeln!(handle, "{}", payload) {
        if e.kind() == io::ErrorKind::BrokenPipe {
            return Ok(()); // Exit gracefully on SIGPIPE
        }
        return Err(Error::internal_io(
            e.to_string(),
            Some("write stdout".to_string()),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_markers_and_summary() {
        let mut report = RunReport::new("imports", false);
        report.record_changed("src/a.tsx".to_string());
        report.record_unchanged("src/b.tsx".to_string());
        report.record_not_found("src/c.tsx".to_string());
        report.record_error("src/d.tsx".to_string(), "read src/d.tsx: denied".to_string());

        let text = render_report(&report);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "changed    src/a.tsx");
        assert_eq!(lines[1], "no-change  src/b.tsx");
        assert_eq!(lines[2], "not-found  src/c.tsx");
        assert_eq!(lines[3], "error      src/d.tsx: read src/d.tsx: denied");
        assert_eq!(lines[4], "");
        assert_eq!(lines[5], "1 file changed (1 failed)");
    }

    #[test]
    fn empty_report_is_just_the_summary() {
        let report = RunReport::new("imports", false);
        assert_eq!(render_report(&report), "Nothing changed\n");
    }

    #[test]
    fn validation_error_keeps_exit_code() {
        let err = Error::validation_invalid_argument("map", "bad", None, None);
        let (text, exit_code) = map_report_to_text(Err(err));
        assert!(text.is_err());
        assert_eq!(exit_code, 2);
    }
}
