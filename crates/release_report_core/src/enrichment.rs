//! Commit-history enrichment of selected file entries.
//!
//! Each file gets the author and date of its first commit ("added") and, when it
//! was changed afterwards, of its latest commit ("updated"). A failed lookup only
//! degrades the entry it belongs to: the outcome is recorded as
//! [`EnrichmentOutcome::Unknown`] and the remaining entries are still processed.

use ado_client::{Commit, FileEntry, RepositoryReader};
use tracing::{debug, info};

#[cfg(test)]
#[path = "enrichment_tests.rs"]
mod tests;

/// What happened when a single entry was enriched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnrichmentOutcome {
    /// Commit metadata was attached.
    Annotated { commit_count: usize },

    /// The lookup succeeded but returned no commits.
    NoHistory,

    /// The entry is a folder and was not looked up.
    Skipped,

    /// The lookup failed; the entry keeps empty metadata.
    Unknown { reason: String },
}

/// Per-outcome counts for one enrichment run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrichmentSummary {
    pub annotated: usize,
    pub no_history: usize,
    pub skipped: usize,
    pub unknown: usize,
}

impl EnrichmentSummary {
    fn record(&mut self, outcome: &EnrichmentOutcome) {
        match outcome {
            EnrichmentOutcome::Annotated { .. } => self.annotated += 1,
            EnrichmentOutcome::NoHistory => self.no_history += 1,
            EnrichmentOutcome::Skipped => self.skipped += 1,
            EnrichmentOutcome::Unknown { .. } => self.unknown += 1,
        }
    }
}

/// Copies commit metadata onto `entry`.
///
/// `commits` must be ordered newest first, as the Commits API returns them. The
/// last commit supplies `added_by`/`added_date`; the first supplies
/// `updated_by`/`updated_date`, but only when there is more than one commit.
/// A file with a single commit therefore has no "updated" values.
pub fn apply_history(entry: &mut FileEntry, commits: &[Commit]) -> EnrichmentOutcome {
    let (Some(latest), Some(oldest)) = (commits.first(), commits.last()) else {
        return EnrichmentOutcome::NoHistory;
    };

    entry.added_by = oldest.author.name.clone();
    entry.added_date = oldest.author.calendar_date();

    if commits.len() > 1 {
        entry.updated_by = latest.author.name.clone();
        entry.updated_date = latest.author.calendar_date();
    }

    EnrichmentOutcome::Annotated {
        commit_count: commits.len(),
    }
}

/// Looks up the history of one entry and applies it.
///
/// Never fails: lookup errors become [`EnrichmentOutcome::Unknown`].
pub async fn enrich_entry(
    reader: &dyn RepositoryReader,
    entry: &mut FileEntry,
) -> EnrichmentOutcome {
    if entry.is_folder {
        return EnrichmentOutcome::Skipped;
    }

    match reader.fetch_commit_history(&entry.path).await {
        Ok(commits) => apply_history(entry, &commits),
        Err(e) => {
            debug!(
                path = entry.path,
                error = %e,
                "Commit history lookup failed, leaving entry without authorship"
            );
            EnrichmentOutcome::Unknown {
                reason: e.to_string(),
            }
        }
    }
}

/// Enriches every entry in place, one lookup at a time, in slice order.
pub async fn enrich(reader: &dyn RepositoryReader, entries: &mut [FileEntry]) -> EnrichmentSummary {
    let mut summary = EnrichmentSummary::default();

    for entry in entries.iter_mut() {
        let outcome = enrich_entry(reader, entry).await;
        summary.record(&outcome);
    }

    info!(
        annotated = summary.annotated,
        no_history = summary.no_history,
        skipped = summary.skipped,
        unknown = summary.unknown,
        "Enriched entries with commit history"
    );

    summary
}
