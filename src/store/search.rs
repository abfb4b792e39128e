//! Client-side filtering of autocomplete suggestions.

use crate::api::ProductAutocomplete;

/// Suggestions whose `"{manufacturer} {name}"` contains every query term,
/// case-insensitively, in their original order.
///
/// An empty or whitespace-only query matches nothing.
pub fn search<'a>(
    entries: &'a [ProductAutocomplete],
    query: &str,
    limit: usize,
) -> Vec<&'a ProductAutocomplete> {
    let terms: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
    if terms.is_empty() {
        return Vec::new();
    }

    entries
        .iter()
        .filter(|entry| {
            let haystack = format!("{} {}", entry.manufacturer, entry.name).to_lowercase();
            terms.iter().all(|term| haystack.contains(term.as_str()))
        })
        .take(limit)
        .collect()
}
