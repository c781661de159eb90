//! passdiff - Compare two password-manager CSV exports
//!
//! Loads two credential exports (CSV files with `url`, `username` and
//! `password` columns), normalizes the (site, account) keys, and
//! reports conflicts and entries unique to either file.
//!
//! # Modules
//!
//! - `loader` - CSV parsing into normalized credential tables
//! - `diff` - Set comparison of two loaded tables
//! - `reporter` - Plain-text report rendering
//! - `errors` - Typed load errors with diagnostics

pub mod diff;
pub mod errors;
pub mod loader;
pub mod reporter;

// Re-export commonly used types
pub use diff::{Conflict, DiffEngine, DiffResult, DiffSummary};
pub use errors::LoadError;
pub use loader::{load, CredentialEntry, CredentialKey, CredentialTable};
pub use reporter::render;
