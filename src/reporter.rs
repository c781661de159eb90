//! Reporter - Render a diff result as plain text
//!
//! Output layout matches the classic password-export comparison report:
//! a conflicts section, then the entries unique to each file, each
//! section present only when non-empty and separated by a blank line.
//! Two fully matching files render as a single "no differences" line.

use crate::diff::DiffResult;
use crate::loader::CredentialEntry;

/// Printed when the two files agree completely
pub const NO_DIFFERENCES: &str = "No conflicts or differences found between the two files.";

/// Render `result` as the report text, labeling each side with the
/// file name it was loaded from. Deterministic; never fails.
pub fn render(result: &DiffResult, left_label: &str, right_label: &str) -> String {
    if result.is_empty() {
        return NO_DIFFERENCES.to_string();
    }

    let mut sections = Vec::new();

    if !result.conflicts.is_empty() {
        let mut section = String::new();
        section.push_str("--- Conflicts (same url and username, different password) ---");
        for conflict in &result.conflicts {
            section.push_str(&format!(
                "\nURL: {}, Username: {}\n  Password in {}: {}\n  Password in {}: {}",
                conflict.site,
                conflict.account,
                left_label,
                conflict.left_secret,
                right_label,
                conflict.right_secret
            ));
        }
        sections.push(section);
    }

    if !result.left_only.is_empty() {
        sections.push(unique_section(&result.left_only, left_label));
    }

    if !result.right_only.is_empty() {
        sections.push(unique_section(&result.right_only, right_label));
    }

    sections.join("\n\n")
}

fn unique_section(entries: &[CredentialEntry], label: &str) -> String {
    let mut section = format!("--- Unique entries in {label} ---");
    for entry in entries {
        section.push_str(&format!(
            "\nURL: {}, Username: {}, Password: {}",
            entry.site, entry.account, entry.secret
        ));
    }
    section
}
