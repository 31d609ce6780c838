//! URL handling module for ouxml-linkcheck
//!
//! This module provides proxy-suffix stripping, which turns a raw href
//! into its normalized URL, and filename sanitizing for per-URL artifacts.

mod filename;
mod proxy;

// Re-export main functions
pub use filename::{sanitize_filename, MAX_FILENAME_LEN};
pub use proxy::strip_proxy_suffix;

/// Returns true if a status code counts as a successful response
///
/// Success and redirect classes (anything below 400) are treated as ok.
/// This rule applies to every resolution hop and to archive responses.
pub fn is_ok_status(status: u16) -> bool {
    status < 400
}
