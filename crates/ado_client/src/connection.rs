//! Connection settings for a single Azure DevOps repository and branch.
//!
//! [`ConnectionSettings`] is built once at start-up and handed to
//! [`AdoClient::new`](crate::AdoClient::new). It owns the personal access token as a
//! [`SecretString`] so that the token never shows up in `Debug` output or logs.

use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::Error;

#[cfg(test)]
#[path = "connection_tests.rs"]
mod tests;

/// API version sent with every request unless overridden.
pub const DEFAULT_API_VERSION: &str = "7.1-preview.1";

/// Deadline for a folder listing request.
pub const DEFAULT_LIST_TIMEOUT: Duration = Duration::from_secs(30);

/// Deadline for a single commit history page request.
pub const DEFAULT_HISTORY_TIMEOUT: Duration = Duration::from_secs(20);

/// Number of commits requested per history page.
pub const DEFAULT_COMMIT_PAGE_SIZE: u32 = 100;

/// Everything needed to talk to one repository on one branch.
#[derive(Debug)]
pub struct ConnectionSettings {
    /// Organization URL, e.g. "https://dev.azure.com/contoso"
    pub organization_url: String,

    /// Project name as shown in the portal (may contain spaces)
    pub project: String,

    /// Repository name or id
    pub repository: String,

    /// Branch all listing and history queries are scoped to
    pub branch: String,

    /// Value of the `api-version` query parameter
    pub api_version: String,

    /// Personal access token
    pub token: SecretString,

    pub list_timeout: Duration,

    pub history_timeout: Duration,

    pub commit_page_size: u32,
}

impl ConnectionSettings {
    /// Creates settings with the default API version, timeouts and page size.
    pub fn new(
        organization_url: &str,
        project: &str,
        repository: &str,
        branch: &str,
        token: SecretString,
    ) -> Self {
        Self {
            organization_url: organization_url.trim_end_matches('/').to_string(),
            project: project.to_string(),
            repository: repository.to_string(),
            branch: branch.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            token,
            list_timeout: DEFAULT_LIST_TIMEOUT,
            history_timeout: DEFAULT_HISTORY_TIMEOUT,
            commit_page_size: DEFAULT_COMMIT_PAGE_SIZE,
        }
    }

    /// Checks that the settings can be used to build requests.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfiguration` if a required value is empty, the
    /// organization URL does not parse, or its scheme is not http(s).
    pub fn validate(&self) -> Result<(), Error> {
        let required = [
            ("organization URL", self.organization_url.as_str()),
            ("project", self.project.as_str()),
            ("repository", self.repository.as_str()),
            ("branch", self.branch.as_str()),
            ("api version", self.api_version.as_str()),
        ];
        for (label, value) in required {
            if value.trim().is_empty() {
                return Err(Error::InvalidConfiguration(format!(
                    "{label} must not be empty"
                )));
            }
        }

        if self.token.expose_secret().trim().is_empty() {
            return Err(Error::InvalidConfiguration(
                "personal access token must not be empty".to_string(),
            ));
        }

        if self.commit_page_size == 0 {
            return Err(Error::InvalidConfiguration(
                "commit page size must be greater than zero".to_string(),
            ));
        }

        let url = Url::parse(&self.organization_url).map_err(|e| {
            Error::InvalidConfiguration(format!(
                "organization URL '{}' is not valid: {e}",
                self.organization_url
            ))
        })?;
        if url.scheme() != "https" && url.scheme() != "http" {
            return Err(Error::InvalidConfiguration(format!(
                "organization URL must use http or https, found '{}'",
                url.scheme()
            )));
        }

        Ok(())
    }

    /// Value of the `Authorization` header: Basic auth with an empty user name.
    pub fn authorization_header(&self) -> String {
        let credentials = format!(":{}", self.token.expose_secret());
        format!("Basic {}", STANDARD.encode(credentials))
    }

    /// Base of all Git API endpoints for the configured repository.
    pub fn repository_api_url(&self) -> String {
        format!(
            "{}/{}/_apis/git/repositories/{}",
            self.organization_url,
            urlencoding::encode(&self.project),
            urlencoding::encode(&self.repository),
        )
    }

    /// Endpoint of the Items API.
    pub fn items_url(&self) -> String {
        format!("{}/items", self.repository_api_url())
    }

    /// Endpoint of the Commits API.
    pub fn commits_url(&self) -> String {
        format!("{}/commits", self.repository_api_url())
    }

    /// Browsable URL of `path` on the configured branch.
    ///
    /// Each path segment is percent-encoded while the `/` separators are kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use ado_client::ConnectionSettings;
    ///
    /// let settings = ConnectionSettings::new(
    ///     "https://dev.azure.com/contoso",
    ///     "Data Platform",
    ///     "db",
    ///     "main",
    ///     "token".to_string().into(),
    /// );
    /// assert_eq!(
    ///     settings.web_url_for("/db/V1 draft.sql"),
    ///     "https://dev.azure.com/contoso/Data%20Platform/_git/db?path=/db/V1%20draft.sql&version=GBmain"
    /// );
    /// ```
    pub fn web_url_for(&self, path: &str) -> String {
        let encoded_path = path
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/");

        format!(
            "{}/{}/_git/{}?path={}&version=GB{}",
            self.organization_url,
            urlencoding::encode(&self.project),
            urlencoding::encode(&self.repository),
            encoded_path,
            urlencoding::encode(&self.branch),
        )
    }
}
