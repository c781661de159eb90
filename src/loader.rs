//! Loader - Read a credential export CSV into a normalized table
//!
//! Each export is a UTF-8 CSV with a header row. The three columns `url`,
//! `username` and `password` must be present (exact names, any order,
//! extra columns ignored). Rows are keyed by a normalized
//! (site, account) pair; passwords are kept verbatim.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, error};

use crate::errors::LoadError;

/// Column names a valid export header must contain (case-sensitive)
pub const REQUIRED_COLUMNS: [&str; 3] = ["url", "username", "password"];

/// Normalized identity of a credential: which site, which account.
///
/// Both fields are lowercased and stripped of surrounding whitespace so
/// that `Example.com / Bob ` and `example.com / bob` compare equal.
/// Ordered so tables and diff output iterate in a stable sorted order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct CredentialKey {
    pub site: String,
    pub account: String,
}

impl CredentialKey {
    /// Build a key from raw field values, applying normalization
    pub fn new(site: &str, account: &str) -> Self {
        Self {
            site: site.trim().to_lowercase(),
            account: account.trim().to_lowercase(),
        }
    }
}

/// A single credential as loaded from one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CredentialEntry {
    pub site: String,
    pub account: String,
    /// Stored verbatim, never normalized
    pub secret: String,
}

/// Outcome of classifying one data row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    /// Row carried all three required fields
    Parsed(CredentialEntry),
    /// Row was too short to supply every required field; dropped
    SkippedMissingField,
}

/// One loaded export: normalized key -> verbatim password.
///
/// Duplicate normalized keys within a file resolve last-write-wins. That
/// is documented policy inherited from the exports themselves (browsers
/// emit the freshest entry last), not an error condition.
#[derive(Debug, Clone, Default)]
pub struct CredentialTable {
    entries: BTreeMap<CredentialKey, String>,
    skipped: usize,
}

impl CredentialTable {
    /// Insert or overwrite the entry for `key`
    pub fn insert(&mut self, key: CredentialKey, secret: String) {
        self.entries.insert(key, secret);
    }

    /// Password for `key`, if present
    pub fn get(&self, key: &CredentialKey) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &CredentialKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Entries in sorted key order
    pub fn iter(&self) -> impl Iterator<Item = (&CredentialKey, &str)> {
        self.entries.iter().map(|(k, v)| (k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Data rows dropped because they lacked a required field
    pub fn skipped_rows(&self) -> usize {
        self.skipped
    }
}

/// Resolved positions of the required columns within one header row
#[derive(Debug, Clone, Copy)]
struct ColumnIndices {
    url: usize,
    username: usize,
    password: usize,
}

impl ColumnIndices {
    /// Locate the required columns, or report which ones are absent
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, Vec<String>> {
        let find = |name: &str| headers.iter().position(|h| h == name);

        match (find("url"), find("username"), find("password")) {
            (Some(url), Some(username), Some(password)) => Ok(Self {
                url,
                username,
                password,
            }),
            (url, username, password) => {
                let mut missing = Vec::new();
                if url.is_none() {
                    missing.push("url".to_string());
                }
                if username.is_none() {
                    missing.push("username".to_string());
                }
                if password.is_none() {
                    missing.push("password".to_string());
                }
                Err(missing)
            }
        }
    }
}

/// Classify one data row against the resolved column positions.
///
/// Short rows (fewer fields than a required column index) are tagged
/// `SkippedMissingField` rather than treated as malformed input.
fn classify_row(record: &csv::StringRecord, cols: ColumnIndices) -> RowOutcome {
    match (
        record.get(cols.url),
        record.get(cols.username),
        record.get(cols.password),
    ) {
        (Some(site), Some(account), Some(secret)) => {
            let key = CredentialKey::new(site, account);
            RowOutcome::Parsed(CredentialEntry {
                site: key.site,
                account: key.account,
                secret: secret.to_string(),
            })
        }
        _ => RowOutcome::SkippedMissingField,
    }
}

/// Load a credential export from disk.
///
/// Fails with [`LoadError::NotFound`] if `path` does not exist, with
/// [`LoadError::MissingColumns`] if the header lacks a required column,
/// and with [`LoadError::Malformed`] if the file is not parsable CSV.
/// Each failure is logged with context at the point of detection before
/// it propagates.
pub fn load(path: &Path) -> Result<CredentialTable, LoadError> {
    if !path.exists() {
        error!("input file not found: '{}'", path.display());
        return Err(LoadError::NotFound {
            path: path.to_path_buf(),
        });
    }

    // Flexible: data rows may be shorter than the header. Short rows are
    // skipped per-row instead of aborting the whole load.
    let reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|source| {
            error!(
                "could not open '{}' as CSV: {source}. Expected columns: {}",
                path.display(),
                REQUIRED_COLUMNS.join(", ")
            );
            LoadError::Malformed {
                path: path.to_path_buf(),
                source,
            }
        })?;

    read_table(reader, path)
}

/// Consume a CSV reader into a table. Split from [`load`] so tests can
/// feed in-memory input.
fn read_table<R: Read>(
    mut reader: csv::Reader<R>,
    path: &Path,
) -> Result<CredentialTable, LoadError> {
    let headers = reader.headers().map_err(|source| {
        error!("could not read header row of '{}': {source}", path.display());
        LoadError::Malformed {
            path: path.to_path_buf(),
            source,
        }
    })?;

    let cols = ColumnIndices::from_headers(headers).map_err(|missing| {
        error!(
            "'{}' is missing required column(s): {}. Expected: {}",
            path.display(),
            missing.join(", "),
            REQUIRED_COLUMNS.join(", ")
        );
        LoadError::missing_columns(path, missing)
    })?;

    let mut table = CredentialTable::default();

    for record in reader.records() {
        let record = record.map_err(|source| {
            error!("could not parse a row of '{}': {source}", path.display());
            LoadError::Malformed {
                path: path.to_path_buf(),
                source,
            }
        })?;

        match classify_row(&record, cols) {
            RowOutcome::Parsed(entry) => {
                let key = CredentialKey {
                    site: entry.site,
                    account: entry.account,
                };
                table.insert(key, entry.secret);
            }
            RowOutcome::SkippedMissingField => table.skipped += 1,
        }
    }

    debug!(
        "loaded {} entries from '{}' ({} rows skipped)",
        table.len(),
        path.display(),
        table.skipped_rows()
    );

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn table_from(input: &str) -> Result<CredentialTable, LoadError> {
        let reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(input.as_bytes());
        read_table(reader, &PathBuf::from("test.csv"))
    }

    #[test]
    fn loads_rows_with_extra_columns_in_any_order() {
        let table = table_from(
            "name,password,url,username,note\n\
             Work,hunter2,Example.com,alice,ignored\n",
        )
        .unwrap();

        assert_eq!(table.len(), 1);
        let key = CredentialKey::new("example.com", "alice");
        assert_eq!(table.get(&key), Some("hunter2"));
    }

    #[test]
    fn missing_columns_are_reported_by_name() {
        let err = table_from("url,username\na.com,u1\n").unwrap_err();

        match err {
            LoadError::MissingColumns { missing, .. } => {
                assert_eq!(missing, vec!["password".to_string()]);
            }
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn header_match_is_case_sensitive() {
        let err = table_from("URL,Username,Password\na.com,u1,p1\n").unwrap_err();
        assert!(matches!(err, LoadError::MissingColumns { .. }));
    }

    #[test]
    fn keys_normalize_and_duplicates_resolve_last_write_wins() {
        let table = table_from(
            "url,username,password\n\
             Example.com,  Bob ,first\n\
             example.com,bob,second\n",
        )
        .unwrap();

        assert_eq!(table.len(), 1);
        let key = CredentialKey::new("example.com", "bob");
        assert_eq!(table.get(&key), Some("second"));
    }

    #[test]
    fn secrets_are_stored_verbatim() {
        let table = table_from("url,username,password\na.com,u1,  PaSs  \n").unwrap();

        let key = CredentialKey::new("a.com", "u1");
        assert_eq!(table.get(&key), Some("  PaSs  "));
    }

    #[test]
    fn short_rows_are_skipped_and_counted() {
        let table = table_from(
            "url,username,password\n\
             a.com,u1\n\
             b.com,u2,p2\n",
        )
        .unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.skipped_rows(), 1);
        assert!(table.contains_key(&CredentialKey::new("b.com", "u2")));
    }

    #[test]
    fn header_only_file_yields_empty_table() {
        let table = table_from("url,username,password\n").unwrap();
        assert!(table.is_empty());
        assert_eq!(table.skipped_rows(), 0);
    }

    #[test]
    fn load_reports_not_found_for_absent_path() {
        let err = load(&PathBuf::from("does-not-exist.csv")).unwrap_err();
        assert!(matches!(err, LoadError::NotFound { .. }));
    }
}
