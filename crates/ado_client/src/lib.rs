//! Crate for reading from the Azure DevOps Git REST API.
//!
//! This crate provides a read-only client for one repository and branch,
//! authenticated with a personal access token. It can list every item below a
//! folder and fetch the commit history of an individual file.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, instrument, warn};

pub mod connection;
pub use connection::ConnectionSettings;

pub mod contents;
pub use contents::{FileEntry, ItemRecord};

pub mod errors;
pub use errors::Error;

pub mod models;
pub use models::{Commit, CommitIdentity};

/// Upper bound on history pages fetched for a single file.
pub const MAX_COMMIT_PAGES: usize = 1000;

// Reference the tests module in the separate file
#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Read operations against a single repository and branch.
///
/// The release pipeline only depends on this trait so that tests can substitute
/// an in-memory repository for the HTTP client.
#[async_trait]
pub trait RepositoryReader: Send + Sync {
    /// Lists every file and folder below `folder_path`, recursively.
    ///
    /// # Errors
    ///
    /// Returns `Error::RemoteApi` for a non-2xx response and `Error::Connection`
    /// when the host cannot be reached or the request times out.
    async fn list_files(&self, folder_path: &str) -> Result<Vec<FileEntry>, Error>;

    /// Returns every commit that touched `file_path`, newest first.
    ///
    /// The order is the one the API returns; callers must not re-sort it.
    ///
    /// # Errors
    ///
    /// Same as [`RepositoryReader::list_files`].
    async fn fetch_commit_history(&self, file_path: &str) -> Result<Vec<Commit>, Error>;
}

/// A client for the Azure DevOps Git API, authenticated with a personal access token.
#[derive(Debug)]
pub struct AdoClient {
    client: reqwest::Client,
    settings: ConnectionSettings,
}

impl AdoClient {
    /// Creates a new `AdoClient` for the repository described by `settings`.
    ///
    /// The Basic-auth header is attached to the underlying HTTP client once and
    /// marked sensitive so that it is never printed.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfiguration` if the settings are incomplete or the
    /// HTTP client cannot be built.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use ado_client::{AdoClient, ConnectionSettings, RepositoryReader};
    ///
    /// # async fn example() -> Result<(), ado_client::Error> {
    /// let settings = ConnectionSettings::new(
    ///     "https://dev.azure.com/contoso",
    ///     "Data Platform",
    ///     "db-migrations",
    ///     "main",
    ///     std::env::var("ADO_PAT").unwrap_or_default().into(),
    /// );
    /// let client = AdoClient::new(settings)?;
    ///
    /// for entry in client.list_files("db/scripts").await? {
    ///     println!("{}", entry.path);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(settings: ConnectionSettings) -> Result<Self, Error> {
        settings.validate()?;

        let mut authorization =
            HeaderValue::from_str(&settings.authorization_header()).map_err(|_| {
                Error::InvalidConfiguration(
                    "personal access token contains characters that are not valid in a header"
                        .to_string(),
                )
            })?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(concat!("release-report/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                error!(error = %e, "Failed to build the HTTP client");
                Error::InvalidConfiguration(format!("Failed to build HTTP client: {e}"))
            })?;

        info!(
            organization_url = settings.organization_url,
            project = settings.project,
            repository = settings.repository,
            branch = settings.branch,
            "Created Azure DevOps client"
        );

        Ok(Self { client, settings })
    }

    /// The settings this client was created with.
    pub fn settings(&self) -> &ConnectionSettings {
        &self.settings
    }

    /// Sends a GET request and deserializes a successful JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
        timeout: Duration,
        operation: &str,
    ) -> Result<T, Error> {
        debug!(url = url, "Making API call");

        let response = self
            .client
            .get(url)
            .query(query)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| {
                log_request_error(operation, &e);
                Error::from(e)
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            log_request_error(operation, &e);
            Error::from(e)
        })?;

        if !status.is_success() {
            error!(
                status = status.as_u16(),
                "{}. Received an error from Azure DevOps", operation
            );
            return Err(Error::remote_api(status.as_u16(), &body));
        }

        serde_json::from_str(&body).map_err(|e| {
            error!(
                error_message = e.to_string(),
                "{}. The response could not be parsed", operation
            );
            Error::Deserialization(e)
        })
    }
}

#[async_trait]
impl RepositoryReader for AdoClient {
    #[instrument(skip(self), fields(branch = %self.settings.branch))]
    async fn list_files(&self, folder_path: &str) -> Result<Vec<FileEntry>, Error> {
        let scope_path = format!("/{}", folder_path.trim_start_matches('/'));
        let query = [
            ("scopePath", scope_path),
            ("recursionLevel", "Full".to_string()),
            ("versionDescriptor.version", self.settings.branch.clone()),
            ("versionDescriptor.versionType", "branch".to_string()),
            ("api-version", self.settings.api_version.clone()),
        ];

        let response: models::ListResponse<ItemRecord> = self
            .get_json(
                &self.settings.items_url(),
                &query,
                self.settings.list_timeout,
                "Failed to list repository items",
            )
            .await?;

        let entries: Vec<FileEntry> = response
            .value
            .into_iter()
            .map(|record| {
                let web_url = self.settings.web_url_for(&record.path);
                FileEntry::new(&record.path, &record.url, record.is_folder, &web_url)
            })
            .collect();

        info!(
            folder_path = folder_path,
            item_count = entries.len(),
            "Listed repository items"
        );

        Ok(entries)
    }

    #[instrument(skip(self), fields(branch = %self.settings.branch))]
    async fn fetch_commit_history(&self, file_path: &str) -> Result<Vec<Commit>, Error> {
        let page_size = self.settings.commit_page_size as usize;
        let mut commits: Vec<Commit> = Vec::new();
        let mut previous_first: Option<String> = None;

        for page_number in 1..=MAX_COMMIT_PAGES {
            let query = [
                ("searchCriteria.itemPath", file_path.to_string()),
                ("searchCriteria.itemVersion.version", self.settings.branch.clone()),
                ("searchCriteria.itemVersion.versionType", "branch".to_string()),
                ("searchCriteria.$top", page_size.to_string()),
                ("searchCriteria.$skip", commits.len().to_string()),
                ("api-version", self.settings.api_version.clone()),
            ];

            let page: models::ListResponse<Commit> = self
                .get_json(
                    &self.settings.commits_url(),
                    &query,
                    self.settings.history_timeout,
                    "Failed to fetch commit history",
                )
                .await?;

            // A server that ignores $skip keeps answering with the first page.
            let first = page.value.first().map(|c| c.commit_id.clone());
            if first.is_some() && first == previous_first {
                warn!(
                    file_path = file_path,
                    page_number = page_number,
                    "History page repeats the previous page, stopping"
                );
                break;
            }

            let received = page.value.len();
            commits.extend(page.value);

            // A page that is not exactly full is the last one.
            if received != page_size {
                break;
            }
            if page_number == MAX_COMMIT_PAGES {
                warn!(
                    file_path = file_path,
                    commit_count = commits.len(),
                    "History page limit reached, stopping"
                );
            }
            previous_first = first;
        }

        debug!(
            file_path = file_path,
            commit_count = commits.len(),
            "Fetched commit history"
        );

        Ok(commits)
    }
}

fn log_request_error(message: &str, e: &reqwest::Error) {
    if e.is_timeout() {
        error!(
            error_message = e.to_string(),
            "{}. The request timed out.", message
        )
    } else if e.is_connect() {
        error!(
            error_message = e.to_string(),
            "{}. Could not connect to the host.", message
        )
    } else if e.is_decode() || e.is_body() {
        error!(
            error_message = e.to_string(),
            "{}. Failed to read the response body.", message
        )
    } else {
        error!(error_message = e.to_string(), "{}", message)
    }
}
