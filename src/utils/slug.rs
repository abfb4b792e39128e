//! URL slugification.
//!
//! Converts human-readable names to the lowercase, hyphen-delimited form used
//! in product page paths.

use regex::Regex;
use std::sync::LazyLock;

/// Maximal runs of characters that may not appear in a slug
static NON_SLUG_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new("[^a-z0-9]+").unwrap());

// ============================================================================
// Slugification
// ============================================================================

/// Convert text to a URL slug.
///
/// Lowercases the input, collapses every run of characters outside
/// `[a-z0-9]` into a single `-`, then strips leading and trailing hyphens.
///
/// | Input | Output |
/// |-------|--------|
/// | `"City Bus"` | `"city-bus"` |
/// | `"  CaDA!! "` | `"cada"` |
/// | `"Ünïcode Set"` | `"n-code-set"` |
pub fn slugify(text: &str) -> String {
    let lower = text.to_lowercase();
    let collapsed = NON_SLUG_RUN.replace_all(&lower, "-");
    collapsed.trim_matches('-').to_owned()
}

/// Check whether `text` is already a valid slug.
#[cfg(test)]
pub fn is_slug(text: &str) -> bool {
    !text.starts_with('-')
        && !text.ends_with('-')
        && !text.contains("--")
        && text
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}
