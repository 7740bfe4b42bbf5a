use serde::{Deserialize, Serialize};
use strum::AsRefStr;

use super::Inferred;
use crate::Listing;

/// Only the head of the description is scanned.
pub const DESCRIPTION_SCAN_CHARS: usize = 1200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TimezoneRegion {
    Eu,
    Us,
}

pub const EU_HINTS: &[&str] = &[
    "europe",
    "emea",
    "eu ",
    "uk",
    "gmt",
    "cet",
    "cest",
    "eet",
    "bst",
    "london",
    "berlin",
    "paris",
    "amsterdam",
    "madrid",
    "barcelona",
    "lisbon",
    "dublin",
    "stockholm",
    "copenhagen",
    "warsaw",
    "prague",
    "vienna",
    "zurich",
    "brussels",
    "milan",
    "rome",
];

pub const US_HINTS: &[&str] = &[
    "united states",
    "usa",
    "us ",
    "america",
    "est",
    "edt",
    "pst",
    "pdt",
    "cst",
    "cdt",
    "mst",
    "mdt",
    " et",
    " pt",
    "new york",
    "san francisco",
    "los angeles",
    "chicago",
    "austin",
    "seattle",
    "boston",
    "denver",
    "miami",
    "atlanta",
];

/// Infer which working-hours region a listing targets. EU hints are tested
/// before US hints.
pub fn infer_timezone(listing: &Listing) -> Inferred<TimezoneRegion> {
    let description_head: String = listing
        .description
        .chars()
        .take(DESCRIPTION_SCAN_CHARS)
        .collect();
    let haystack = format!(
        "{} {} {}",
        listing.location, listing.remote_policy, description_head
    )
    .to_lowercase();

    infer_timezone_from_text(&haystack)
}

/// `haystack` must already be lower-cased.
pub fn infer_timezone_from_text(haystack: &str) -> Inferred<TimezoneRegion> {
    if EU_HINTS.iter().any(|hint| haystack.contains(hint)) {
        return Inferred::Known(TimezoneRegion::Eu);
    }
    if US_HINTS.iter().any(|hint| haystack.contains(hint)) {
        return Inferred::Known(TimezoneRegion::Us);
    }

    Inferred::Unknown
}
