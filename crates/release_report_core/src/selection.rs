//! Release selection: prefix filtering and natural ordering of file entries.
//!
//! Release scripts follow the `V{release}.{sequence}...` naming convention, so a
//! release is selected by file-name prefix and the result is ordered so that
//! embedded numbers compare by value (`V1.29.0.2` before `V1.29.0.10`).

use std::cmp::Ordering;

use ado_client::FileEntry;
use once_cell::sync::Lazy;
use regex::Regex;

#[cfg(test)]
#[path = "selection_tests.rs"]
mod tests;

static DIGIT_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new("[0-9]+").expect("digit run pattern is valid"));

/// File-name prefix that selects the scripts of `release`, e.g. `V1.2.0.`.
pub fn release_prefix(release: &str) -> String {
    format!("V{release}.")
}

/// Keeps the non-folder entries whose name starts with `V{release}.`.
///
/// The comparison upper-cases both the prefix and the candidate name, so
/// `v1.0.0.1.SQL` is selected for release `1.0.0`. Folders are always dropped,
/// whatever their name. Relative order is preserved.
pub fn filter_by_release(entries: Vec<FileEntry>, release: &str) -> Vec<FileEntry> {
    let prefix = release_prefix(release).to_uppercase();
    entries
        .into_iter()
        .filter(|entry| !entry.is_folder && entry.name.to_uppercase().starts_with(&prefix))
        .collect()
}

/// Sorts entries by name in natural order.
///
/// The sort is stable: names whose segments compare equal (for example `V1.01`
/// and `V1.1`) keep their original relative order.
pub fn natural_sort(mut entries: Vec<FileEntry>) -> Vec<FileEntry> {
    entries.sort_by_cached_key(|entry| NaturalKey::new(&entry.name));
    entries
}

/// Compares two names in natural order.
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use release_report_core::selection::natural_cmp;
///
/// assert_eq!(natural_cmp("V1.29.0.2", "V1.29.0.10"), Ordering::Less);
/// assert_eq!(natural_cmp("a10", "A9"), Ordering::Greater);
/// ```
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    NaturalKey::new(a).cmp(&NaturalKey::new(b))
}

/// One run of a tokenized name.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    /// Non-digit run, lower-cased.
    Text(String),

    /// Digit run with leading zeros removed.
    Number(String),
}

impl Ord for Segment {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Segment::Text(a), Segment::Text(b)) => a.cmp(b),
            // Digit runs can exceed any integer type; with leading zeros gone the
            // longer run is the larger number.
            (Segment::Number(a), Segment::Number(b)) => {
                a.len().cmp(&b.len()).then_with(|| a.cmp(b))
            }
            (Segment::Text(_), Segment::Number(_)) => Ordering::Less,
            (Segment::Number(_), Segment::Text(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for Segment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Sort key of a name: alternating text and number segments.
///
/// The sequence always starts and ends with a text segment (possibly empty), so
/// two keys always hold segments of the same kind at the same index.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct NaturalKey(Vec<Segment>);

impl NaturalKey {
    fn new(name: &str) -> Self {
        let mut segments = Vec::new();
        let mut text_start = 0;

        for digits in DIGIT_RUN.find_iter(name) {
            segments.push(Segment::Text(
                name[text_start..digits.start()].to_lowercase(),
            ));
            let value = digits.as_str().trim_start_matches('0');
            segments.push(Segment::Number(value.to_string()));
            text_start = digits.end();
        }
        segments.push(Segment::Text(name[text_start..].to_lowercase()));

        NaturalKey(segments)
    }
}
