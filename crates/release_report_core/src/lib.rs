//! # Release Report Core
//!
//! This crate turns a raw Azure DevOps folder listing into an ordered, annotated
//! list of release scripts, and renders that list as a spreadsheet.
//!
//! ## Overview
//!
//! A fetch runs as a single linear cycle:
//! 1. List every item below the scripts folder ([`RepositoryReader::list_files`])
//! 2. Keep the files named `V{release}.*` ([`selection::filter_by_release`])
//! 3. Order them naturally ([`selection::natural_sort`])
//! 4. Attach first/last commit authorship ([`enrichment::enrich`])
//! 5. Render the result ([`ReleaseScripts::export`])
//!
//! Listing failures abort the cycle with a [`FetchError`]. Enrichment failures
//! only leave the affected entry without authorship.
//!
//! ## Examples
//!
//! ```no_run
//! use ado_client::{AdoClient, ConnectionSettings};
//! use release_report_core::{fetch_release_scripts, ReleaseQuery};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = ConnectionSettings::new(
//!     "https://dev.azure.com/contoso",
//!     "Data Platform",
//!     "db-migrations",
//!     "main",
//!     std::env::var("ADO_PAT")?.into(),
//! );
//! let client = AdoClient::new(settings)?;
//!
//! let query = ReleaseQuery::new("1.2.0", "folder1", "folder1/scripts");
//! let scripts = fetch_release_scripts(&client, &query).await?;
//!
//! match scripts.export()? {
//!     Some(artifact) => std::fs::write(&artifact.filename, &artifact.bytes)?,
//!     None => println!("{}", scripts.empty_notice("main")),
//! }
//! # Ok(())
//! # }
//! ```

use ado_client::{FileEntry, RepositoryReader};
use serde::Serialize;
use tracing::{info, instrument};

pub mod enrichment;
pub mod errors;
pub mod report;
pub mod selection;

pub use enrichment::{EnrichmentOutcome, EnrichmentSummary};
pub use errors::{FetchError, ReportError};

#[cfg(test)]
mod test_support;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// What to fetch: a release identifier and the folder to look in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseQuery {
    /// Release identifier, e.g. "1.2.0"
    pub release: String,

    /// Display label of the folder, used in notices and the export name
    pub folder_label: String,

    /// Repository-relative path the label resolves to
    pub scripts_path: String,
}

impl ReleaseQuery {
    pub fn new(release: &str, folder_label: &str, scripts_path: &str) -> Self {
        Self {
            release: release.to_string(),
            folder_label: folder_label.to_string(),
            scripts_path: scripts_path.to_string(),
        }
    }
}

/// A generated export, ready to be written or offered for download.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// The ordered, enriched scripts of one release.
#[derive(Debug, Clone, Serialize)]
pub struct ReleaseScripts {
    pub query: ReleaseQuery,
    pub entries: Vec<FileEntry>,
}

impl ReleaseScripts {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Message shown instead of a table when nothing matched.
    pub fn empty_notice(&self, branch: &str) -> String {
        format!(
            "No scripts found matching {}* in '{}' on branch {}.",
            selection::release_prefix(&self.query.release),
            self.query.scripts_path,
            branch
        )
    }

    /// Renders the spreadsheet export.
    ///
    /// Returns `Ok(None)` when there are no entries: an empty result is reported
    /// through [`ReleaseScripts::empty_notice`] rather than an empty workbook.
    ///
    /// # Errors
    ///
    /// Returns `ReportError` if the workbook cannot be built.
    pub fn export(&self) -> Result<Option<ExportArtifact>, ReportError> {
        if self.is_empty() {
            return Ok(None);
        }

        let bytes = report::build_export(
            &self.entries,
            &self.query.release,
            &self.query.folder_label,
        )?;

        Ok(Some(ExportArtifact {
            filename: report::build_export_filename(&self.query.release, &self.query.folder_label),
            content_type: report::XLSX_CONTENT_TYPE,
            bytes,
        }))
    }
}

/// Runs one fetch cycle: list, filter, sort and enrich.
///
/// Enrichment is skipped when nothing matched the release.
///
/// # Errors
///
/// Returns `FetchError::RemoteApi` or `FetchError::Connectivity` when the listing
/// fails, and `FetchError::Unexpected` for any other listing failure. No partial
/// result is returned in those cases.
#[instrument(
    skip(reader, query),
    fields(release = %query.release, scripts_path = %query.scripts_path)
)]
pub async fn fetch_release_scripts(
    reader: &dyn RepositoryReader,
    query: &ReleaseQuery,
) -> Result<ReleaseScripts, FetchError> {
    let listing = reader.list_files(&query.scripts_path).await?;
    let listed = listing.len();

    let matched = selection::filter_by_release(listing, &query.release);
    let mut entries = selection::natural_sort(matched);

    info!(
        listed = listed,
        matched = entries.len(),
        "Selected release scripts"
    );

    if !entries.is_empty() {
        enrichment::enrich(reader, &mut entries).await;
    }

    Ok(ReleaseScripts {
        query: query.clone(),
        entries,
    })
}
