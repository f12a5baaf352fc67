//! CLI response formatting and output.
//!
//! Provides JSON envelope, printing, and exit code mapping.

use bulkedit::error::Hint;
use bulkedit::{Error, ErrorCode, Result};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct CliResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<CliError>,
}

#[derive(Debug, Serialize)]
pub struct CliError {
    pub code: String,
    pub message: String,
    pub details: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hints: Option<Vec<Hint>>,
}

impl<T: Serialize> CliResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            Error::internal_json(e.to_string(), Some("serialize response".to_string()))
        })
    }
}

impl CliResponse<()> {
    pub fn from_error(err: &Error) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(CliError {
                code: err.code.as_str().to_string(),
                message: err.message.clone(),
                details: err.details.clone(),
                hints: if err.hints.is_empty() {
                    None
                } else {
                    Some(err.hints.clone())
                },
            }),
        }
    }
}

fn print_response<T: Serialize>(response: &CliResponse<T>) -> Result<()> {
    let payload = response.to_json()?;
    super::text::write_stdout(&payload)
}

pub fn print_json_result(result: Result<serde_json::Value>) -> Result<()> {
    match result {
        Ok(data) => print_response(&CliResponse::success(data)),
        Err(err) => print_response(&CliResponse::<()>::from_error(&err)),
    }
}

pub fn map_cmd_result_to_json<T: Serialize>(
    result: Result<(T, i32)>,
) -> (Result<serde_json::Value>, i32) {
    match result {
        Ok((data, exit_code)) => match serde_json::to_value(data) {
            Ok(value) => (Ok(value), exit_code),
            Err(err) => (
                Err(Error::internal_json(
                    err.to_string(),
                    Some("serialize response".to_string()),
                )),
                1,
            ),
        },
        Err(err) => {
            let exit_code = exit_code_for_error(err.code);
            (Err(err), exit_code)
        }
    }
}

pub(crate) fn exit_code_for_error(code: ErrorCode) -> i32 {
    match code {
        ErrorCode::ConfigInvalidJson
        | ErrorCode::ConfigInvalidValue
        | ErrorCode::ValidationMissingArgument
        | ErrorCode::ValidationInvalidArgument => 2,

        ErrorCode::InternalIoError | ErrorCode::InternalJsonError => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bulkedit::report::RunReport;

    #[test]
    fn report_maps_to_success_value() {
        let mut report = RunReport::new("imports", false);
        report.record_changed("src/App.tsx".to_string());

        let (value, exit_code) = map_cmd_result_to_json(Ok((report, 0)));
        let value = value.unwrap();

        assert_eq!(exit_code, 0);
        assert_eq!(value["action"], "imports");
        assert_eq!(value["results"][0]["status"], "changed");
        assert_eq!(value["summary"]["changed"], 1);
    }

    #[test]
    fn config_errors_exit_with_2() {
        let err = Error::config_invalid_value("pattern", None, "unclosed group");
        let (value, exit_code) = map_cmd_result_to_json::<serde_json::Value>(Err(err));
        assert!(value.is_err());
        assert_eq!(exit_code, 2);
    }

    #[test]
    fn io_errors_exit_with_1() {
        let err = Error::internal_io("denied", Some("read rules.json".to_string()));
        let (_value, exit_code) = map_cmd_result_to_json::<serde_json::Value>(Err(err));
        assert_eq!(exit_code, 1);
    }

    #[test]
    fn error_envelope_carries_code_and_hints() {
        let err = Error::validation_missing_argument(vec!["path".to_string()])
            .with_hint("Pass --path <root>");
        let json = CliResponse::<()>::from_error(&err).to_json().unwrap();

        assert!(json.contains("\"success\": false"));
        assert!(json.contains("\"code\": \"validation.missing_argument\""));
        assert!(json.contains("Pass --path <root>"));
    }
}
