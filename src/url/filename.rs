use sha2::{Digest, Sha256};
use unicode_normalization::UnicodeNormalization;

/// Longest file stem we will produce
pub const MAX_FILENAME_LEN: usize = 255;

/// Length of the hash suffix appended to truncated names
const HASH_SUFFIX_LEN: usize = 16;

/// Turns a URL into a filesystem-safe file stem
///
/// # Rules
///
/// 1. Drop everything up to and including the last `://`
/// 2. Replace spaces and `.` with `_`
/// 3. NFKD-normalize, then drop anything that is not ASCII
/// 4. Keep only letters, digits and `-_.() `
/// 5. Cap the length at [`MAX_FILENAME_LEN`]; a truncated name ends
///    with a hash of the full URL so distinct URLs stay distinct
///
/// # Examples
///
/// ```
/// use ouxml_linkcheck::url::sanitize_filename;
///
/// assert_eq!(sanitize_filename("https://www.example.com/a b?x=1"), "www_example_coma_bx1");
/// ```
pub fn sanitize_filename(url: &str) -> String {
    let without_scheme = url.rsplit("://").next().unwrap_or(url);
    let replaced = without_scheme.replace([' ', '.'], "_");

    let cleaned: String = replaced
        .nfkd()
        .filter(|c| c.is_ascii_alphanumeric() || "-_.() ".contains(*c))
        .collect();

    if cleaned.len() <= MAX_FILENAME_LEN {
        return cleaned;
    }

    tracing::warn!(
        "Filename for {} truncated to {} characters",
        url,
        MAX_FILENAME_LEN
    );

    let digest = hex::encode(Sha256::digest(url.as_bytes()));
    let keep = MAX_FILENAME_LEN - HASH_SUFFIX_LEN - 1;
    format!("{}-{}", &cleaned[..keep], &digest[..HASH_SUFFIX_LEN])
}
