use std::collections::{BTreeSet, HashSet};

use crate::Listing;

/// Spellings that all refer to the Make automation platform.
const MAKE_ALIASES: &[&str] = &["make", "make.com"];
const MAKE_LABEL: &str = "Make";

/// Lower-cased union of `tools` and `tags`, empty entries dropped.
pub fn extract_tool_signals(listing: &Listing) -> HashSet<String> {
    listing
        .tools
        .iter()
        .chain(listing.tags.iter())
        .map(|value| value.trim().to_lowercase())
        .filter(|value| !value.is_empty())
        .collect()
}

fn is_make_alias(value: &str) -> bool {
    MAKE_ALIASES.contains(&value)
}

/// Does a user-selected tool match any of the listing's signals?
///
/// "Make" and "make.com" are interchangeable on both sides.
pub fn tool_matches(selected: &str, signals: &HashSet<String>) -> bool {
    let wanted = selected.trim().to_lowercase();
    if wanted.is_empty() {
        return false;
    }

    if is_make_alias(&wanted) {
        return MAKE_ALIASES.iter().any(|alias| signals.contains(*alias));
    }

    signals.contains(&wanted)
}

/// Label used when rendering a tool chip.
pub fn tool_display_label(signal: &str) -> String {
    let trimmed = signal.trim();
    if is_make_alias(&trimmed.to_lowercase()) {
        MAKE_LABEL.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Sorted, de-duplicated chip labels across all listings.
pub fn available_tools(listings: &[Listing]) -> Vec<String> {
    listings
        .iter()
        .flat_map(extract_tool_signals)
        .map(|signal| tool_display_label(&signal))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
