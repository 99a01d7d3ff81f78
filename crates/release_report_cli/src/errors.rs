use std::io;

use release_report_core::{FetchError, ReportError};
use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur in the release report CLI.
///
/// Every variant ends the process with exit code 1. [`Error::user_message`]
/// gives the text shown to the user.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error occurred while loading, validating or saving configuration.
    ///
    /// Covers a missing or unreadable file, invalid TOML, and missing connection
    /// values such as the organization URL or the `ADO_PAT` token.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid command-line arguments were provided.
    ///
    /// Returned for a release that is not configured or an unknown folder label.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The Azure DevOps client could not be created from the configured settings.
    #[error("Invalid connection settings: {0}")]
    Client(#[from] ado_client::Error),

    /// The fetch cycle failed before producing a result.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The spreadsheet export could not be rendered.
    #[error(transparent)]
    Report(#[from] ReportError),

    /// The export file could not be written.
    #[error("Failed to write export file: {0}")]
    WriteExport(io::Error),

    /// The result could not be rendered as JSON.
    #[error("Failed to serialize result: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl Error {
    /// Text shown to the user when a command fails.
    pub fn user_message(&self) -> String {
        match self {
            Error::Fetch(FetchError::Connectivity(_)) => {
                "Could not connect to Azure DevOps. Check your configuration.".to_string()
            }
            other => other.to_string(),
        }
    }
}
