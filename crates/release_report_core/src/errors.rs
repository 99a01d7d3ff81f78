//! Error types of the release report pipeline.

use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Failures that abort a fetch before any result is produced.
///
/// Only the listing step can raise these; enrichment problems are recorded per
/// entry and never surface here.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Azure DevOps answered the listing request with a non-success status.
    #[error("Azure DevOps API error: {status} - {body}")]
    RemoteApi { status: u16, body: String },

    /// Azure DevOps could not be reached.
    #[error("Could not connect to Azure DevOps: {0}")]
    Connectivity(String),

    /// Any other failure while listing, filtering or sorting.
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl From<ado_client::Error> for FetchError {
    fn from(e: ado_client::Error) -> Self {
        match e {
            ado_client::Error::RemoteApi { status, body } => FetchError::RemoteApi { status, body },
            ado_client::Error::Connection(msg) => FetchError::Connectivity(msg),
            other => FetchError::Unexpected(other.to_string()),
        }
    }
}

/// Failures while rendering the spreadsheet export.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to build the spreadsheet export: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),
}
