//! In-memory repository used by the unit tests of this crate.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use ado_client::{Commit, CommitIdentity, Error, FileEntry, RepositoryReader};
use async_trait::async_trait;

/// How `list_files` should fail, if at all.
#[derive(Debug, Clone, Copy)]
pub enum ListingFailure {
    Status(u16),
    Unreachable,
    Garbage,
}

#[derive(Default)]
pub struct FakeRepository {
    pub entries: Vec<FileEntry>,
    pub listing_failure: Option<ListingFailure>,
    pub histories: HashMap<String, Vec<Commit>>,
    pub failing_paths: HashSet<String>,
    pub history_calls: Mutex<Vec<String>>,
}

impl FakeRepository {
    pub fn with_entries(entries: Vec<FileEntry>) -> Self {
        Self {
            entries,
            ..Default::default()
        }
    }

    pub fn with_history(mut self, path: &str, commits: Vec<Commit>) -> Self {
        self.histories.insert(path.to_string(), commits);
        self
    }

    pub fn with_failing_history(mut self, path: &str) -> Self {
        self.failing_paths.insert(path.to_string());
        self
    }

    pub fn history_calls(&self) -> Vec<String> {
        self.history_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RepositoryReader for FakeRepository {
    async fn list_files(&self, _folder_path: &str) -> Result<Vec<FileEntry>, Error> {
        match self.listing_failure {
            Some(ListingFailure::Status(status)) => {
                Err(Error::remote_api(status, "listing failed"))
            }
            Some(ListingFailure::Unreachable) => {
                Err(Error::Connection("host unreachable".to_string()))
            }
            Some(ListingFailure::Garbage) => Err(Error::Deserialization(
                serde_json::from_str::<serde_json::Value>("<html>").unwrap_err(),
            )),
            None => Ok(self.entries.clone()),
        }
    }

    async fn fetch_commit_history(&self, file_path: &str) -> Result<Vec<Commit>, Error> {
        self.history_calls
            .lock()
            .unwrap()
            .push(file_path.to_string());

        if self.failing_paths.contains(file_path) {
            return Err(Error::remote_api(500, "history failed"));
        }
        Ok(self.histories.get(file_path).cloned().unwrap_or_default())
    }
}

pub fn file(name: &str) -> FileEntry {
    let path = format!("/db/scripts/{name}");
    FileEntry::new(&path, "api", false, &format!("https://web{path}"))
}

pub fn folder(name: &str) -> FileEntry {
    let path = format!("/db/scripts/{name}");
    FileEntry::new(&path, "api", true, &format!("https://web{path}"))
}

pub fn commit(id: &str, author: &str, date: &str) -> Commit {
    Commit {
        commit_id: id.to_string(),
        author: CommitIdentity {
            name: author.to_string(),
            email: format!("{}@contoso.com", author.to_lowercase()),
            date: date.to_string(),
        },
        comment: format!("commit {id}"),
    }
}
