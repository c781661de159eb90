//! Diff Engine - Compare two loaded credential tables
//!
//! Identifies conflicting, left-only and right-only entries. A conflict
//! is the same (site, account) key carrying different passwords in the
//! two files. Keys present in both tables with equal passwords produce
//! no output and are only counted in the summary.

use serde::Serialize;

use crate::loader::{CredentialEntry, CredentialKey, CredentialTable};

/// Engine for comparing two credential tables
pub struct DiffEngine;

impl DiffEngine {
    /// Compare `left` against `right`.
    ///
    /// Pure: no side effects beyond the returned result. Output
    /// collections follow the sorted key order of the input tables, so
    /// rendering is deterministic.
    pub fn diff(left: &CredentialTable, right: &CredentialTable) -> DiffResult {
        let mut conflicts = Vec::new();
        let mut left_only = Vec::new();
        let mut matching = 0;

        for (key, secret) in left.iter() {
            match right.get(key) {
                Some(other) if other != secret => conflicts.push(Conflict {
                    site: key.site.clone(),
                    account: key.account.clone(),
                    left_secret: secret.to_string(),
                    right_secret: other.to_string(),
                }),
                Some(_) => matching += 1,
                None => left_only.push(entry(key, secret)),
            }
        }

        let right_only: Vec<_> = right
            .iter()
            .filter(|(key, _)| !left.contains_key(key))
            .map(|(key, secret)| entry(key, secret))
            .collect();

        let summary = DiffSummary {
            total_left: left.len(),
            total_right: right.len(),
            conflict_count: conflicts.len(),
            left_only_count: left_only.len(),
            right_only_count: right_only.len(),
            matching,
        };

        DiffResult {
            conflicts,
            left_only,
            right_only,
            summary,
        }
    }
}

fn entry(key: &CredentialKey, secret: &str) -> CredentialEntry {
    CredentialEntry {
        site: key.site.clone(),
        account: key.account.clone(),
        secret: secret.to_string(),
    }
}

/// Same key, different password in each file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conflict {
    pub site: String,
    pub account: String,
    pub left_secret: String,
    pub right_secret: String,
}

/// Result of diffing two credential tables
#[derive(Debug, Clone, Serialize)]
pub struct DiffResult {
    /// Keys in both files with differing passwords
    pub conflicts: Vec<Conflict>,
    /// Entries present only in the first file
    pub left_only: Vec<CredentialEntry>,
    /// Entries present only in the second file
    pub right_only: Vec<CredentialEntry>,
    /// Summary statistics
    pub summary: DiffSummary,
}

impl DiffResult {
    /// True when the two files agree completely
    pub fn is_empty(&self) -> bool {
        self.conflicts.is_empty() && self.left_only.is_empty() && self.right_only.is_empty()
    }

    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }
}

/// Summary statistics for a table diff
#[derive(Debug, Clone, Serialize)]
pub struct DiffSummary {
    /// Total entries in the first file
    pub total_left: usize,
    /// Total entries in the second file
    pub total_right: usize,
    /// Number of conflicting entries
    pub conflict_count: usize,
    /// Entries only in the first file
    pub left_only_count: usize,
    /// Entries only in the second file
    pub right_only_count: usize,
    /// Entries identical in both files (omitted from output)
    pub matching: usize,
}
