//! Error types for Azure DevOps client operations.
//!
//! This module defines the error types that can occur when talking to the Azure DevOps
//! Git REST API through the ado_client crate. The variants separate transport failures
//! (the host could not be reached) from API failures (the host answered with a non-2xx
//! status) so that callers can report them differently.

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Maximum number of characters of a response body kept in [`Error::RemoteApi`].
pub const MAX_ERROR_BODY_CHARS: usize = 300;

/// Errors that can occur during Azure DevOps client operations.
///
/// ## Examples
///
/// ```rust,ignore
/// use ado_client::Error;
///
/// match client.list_files("db/scripts").await {
///     Ok(entries) => println!("Found {} entries", entries.len()),
///     Err(Error::RemoteApi { status, body }) => eprintln!("API error {status}: {body}"),
///     Err(Error::Connection(msg)) => eprintln!("Host unreachable: {msg}"),
///     Err(err) => eprintln!("Other error: {err}"),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The Azure DevOps API answered with a non-success status code.
    ///
    /// The body is truncated to [`MAX_ERROR_BODY_CHARS`] characters.
    #[error("Azure DevOps API returned status {status}: {body}")]
    RemoteApi { status: u16, body: String },

    /// The remote host could not be reached, or the request timed out.
    #[error("Failed to connect to Azure DevOps: {0}")]
    Connection(String),

    /// Error deserializing the response from Azure DevOps.
    ///
    /// This may indicate an API version change or a proxy answering in place
    /// of the real service.
    #[error("Failed to deserialize Azure DevOps response: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// The connection settings cannot be used to build requests.
    ///
    /// Raised for an unparsable organization URL, a missing project or repository
    /// name, or a personal access token that is empty.
    #[error("Invalid Azure DevOps configuration: {0}")]
    InvalidConfiguration(String),

    /// The request failed for a reason that is neither a status code nor connectivity.
    #[error("Azure DevOps request failed: {0}")]
    Request(String),
}

impl Error {
    /// Builds a [`Error::RemoteApi`], truncating the body to [`MAX_ERROR_BODY_CHARS`].
    pub fn remote_api(status: u16, body: &str) -> Self {
        Error::RemoteApi {
            status,
            body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            Error::Connection(e.to_string())
        } else if let Some(status) = e.status() {
            Error::remote_api(status.as_u16(), "")
        } else {
            Error::Request(e.to_string())
        }
    }
}
