//! Repository contents domain types.
//!
//! This module contains the types produced when listing a folder of an Azure DevOps
//! Git repository: the raw item records returned by the Items API and the
//! [`FileEntry`] values the rest of the workspace works with.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "contents_tests.rs"]
mod tests;

/// A single item record as returned by the Azure DevOps Items API.
///
/// Only the fields the listing needs are kept; the API sends more (object id,
/// commit id, git object type) which are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    /// Full path within the repository, with a leading slash (e.g. "/db/scripts/V1.0.0.1.sql")
    #[serde(default)]
    pub path: String,

    /// API locator of the item
    #[serde(default)]
    pub url: String,

    /// Whether the item is a folder. Absent for plain files.
    #[serde(default)]
    pub is_folder: bool,
}

/// A single entry in a repository folder listing.
///
/// Entries are built fresh for every listing. The enrichment fields start empty and
/// are filled in place from commit history; they stay empty when the history lookup
/// fails or returns no commits.
///
/// # Examples
///
/// ```rust
/// use ado_client::FileEntry;
///
/// let entry = FileEntry::new(
///     "/db/scripts/V1.0.0.1.sql",
///     "https://dev.azure.com/contoso/_apis/git/repositories/db/items?path=/db/scripts/V1.0.0.1.sql",
///     false,
///     "https://dev.azure.com/contoso/Data/_git/db?path=/db/scripts/V1.0.0.1.sql&version=GBmain",
/// );
///
/// assert_eq!(entry.name, "V1.0.0.1.sql");
/// assert!(entry.added_by.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Leaf name, always the last segment of `path`
    pub name: String,

    /// Full path relative to the repository root
    pub path: String,

    /// API locator for the item
    pub remote_uri: String,

    /// Folders appear in raw listings but never in filtered results
    pub is_folder: bool,

    /// Browsable URL of the item in the Azure DevOps web UI
    pub web_url: String,

    /// Author of the first commit touching this path
    pub added_by: String,

    /// Calendar date (YYYY-MM-DD) of the first commit touching this path
    pub added_date: String,

    /// Author of the latest commit, only set when the path has more than one commit
    pub updated_by: String,

    /// Calendar date (YYYY-MM-DD) of the latest commit, only set with more than one commit
    pub updated_date: String,
}

impl FileEntry {
    /// Creates an entry with empty enrichment fields, deriving `name` from `path`.
    pub fn new(path: &str, remote_uri: &str, is_folder: bool, web_url: &str) -> Self {
        Self {
            name: leaf_name(path).to_string(),
            path: path.to_string(),
            remote_uri: remote_uri.to_string(),
            is_folder,
            web_url: web_url.to_string(),
            ..Default::default()
        }
    }

    /// Returns true once any commit metadata has been attached.
    pub fn has_history(&self) -> bool {
        !self.added_by.is_empty() || !self.added_date.is_empty()
    }
}

/// Returns the last `/`-separated segment of a repository path.
///
/// A trailing slash is ignored, so "db/scripts/" yields "scripts".
pub fn leaf_name(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rsplit_once('/') {
        Some((_, name)) => name,
        None => trimmed,
    }
}
