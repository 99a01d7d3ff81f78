//! # Models
//!
//! Wire models for the Azure DevOps Git REST API responses used by this crate.
//!
//! Azure DevOps wraps collections in a `{ "count": n, "value": [...] }` envelope;
//! [`ListResponse`] models that envelope for any item type.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;

/// Collection envelope returned by Azure DevOps list endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ListResponse<T> {
    /// Items of the collection. Missing `value` deserializes as empty.
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
}

/// The author or committer identity recorded on a commit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CommitIdentity {
    /// Display name
    #[serde(default)]
    pub name: String,
    /// E-mail address
    #[serde(default)]
    pub email: String,
    /// ISO-8601 timestamp as sent by the API (e.g. "2024-02-14T09:30:00Z")
    #[serde(default)]
    pub date: String,
}

impl CommitIdentity {
    /// Returns the calendar-date part of the timestamp (its first 10 characters).
    ///
    /// # Examples
    ///
    /// ```
    /// use ado_client::models::CommitIdentity;
    ///
    /// let author = CommitIdentity {
    ///     name: "Ada".to_string(),
    ///     email: String::new(),
    ///     date: "2024-02-14T09:30:00Z".to_string(),
    /// };
    /// assert_eq!(author.calendar_date(), "2024-02-14");
    /// ```
    pub fn calendar_date(&self) -> String {
        self.date.chars().take(10).collect()
    }
}

/// A single commit from the Commits API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Commit {
    /// Commit SHA
    #[serde(default)]
    pub commit_id: String,
    /// Who authored the change
    #[serde(default)]
    pub author: CommitIdentity,
    /// Commit message, possibly truncated by the API
    #[serde(default)]
    pub comment: String,
}
