//! Shared helpers for command handlers.

use std::io::IsTerminal;
use std::path::Path;

use bytes::Bytes;

use backoffice_core::{ImportCandidate, LoadState};

use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
///
/// Without a terminal there is nobody to ask, so the action is refused.
pub fn confirm(message: &str, action: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Parse a `--data` argument that must be a JSON object.
pub fn parse_json_object(field: &str, raw: &str) -> Result<serde_json::Value, CliError> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    if value.is_object() {
        Ok(value)
    } else {
        Err(CliError::Validation {
            field: field.into(),
            reason: "expected a JSON object".into(),
        })
    }
}

/// Read a file from disk into an import candidate named after the file.
pub async fn read_candidate(path: &Path) -> Result<ImportCandidate, CliError> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| CliError::Validation {
            field: "file".into(),
            reason: format!("'{}' is not a file path", path.display()),
        })?;
    let contents = tokio::fs::read(path).await?;
    Ok(ImportCandidate::new(name, Bytes::from(contents)))
}

/// Turn a collection's failed load into a command error.
///
/// A collection keeps its last good items when a fetch fails, so the
/// failure is only visible through its state.
pub fn ensure_loaded(state: LoadState) -> Result<(), CliError> {
    match state {
        LoadState::Failed(message) => Err(CliError::ApiError {
            message,
            status: None,
        }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_object_is_required() {
        assert!(parse_json_object("data", r#"{"status":"closed"}"#).is_ok());
        assert!(matches!(
            parse_json_object("data", "[1,2]"),
            Err(CliError::Validation { .. })
        ));
        assert!(matches!(
            parse_json_object("data", "{oops"),
            Err(CliError::Json(_))
        ));
    }

    #[test]
    fn failed_state_becomes_an_error() {
        assert!(ensure_loaded(LoadState::Loaded).is_ok());
        assert!(ensure_loaded(LoadState::Failed("Failed to load categories".into())).is_err());
    }

    #[test]
    fn yes_flag_skips_the_prompt() {
        assert!(matches!(confirm("Delete?", "delete", true), Ok(true)));
    }

    #[tokio::test]
    async fn candidate_takes_the_file_name() {
        let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("{e}"));
        let path = dir.path().join("products.CSV");
        std::fs::write(&path, "name\nLamp\n").unwrap_or_else(|e| panic!("{e}"));

        let candidate = read_candidate(&path)
            .await
            .unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(candidate.name(), "products.CSV");
        assert_eq!(candidate.size(), 10);
    }
}
