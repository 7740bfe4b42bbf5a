use std::collections::HashSet;

use super::filter_state::FilterState;
use crate::corrections::{tools::tool_matches, DerivedSignals};
use crate::Listing;

/// Listing plus the caller's saved-id set, everything a predicate may look at.
pub struct Candidate<'a> {
    pub listing: &'a Listing,
    pub signals: &'a DerivedSignals,
    pub saved_ids: &'a HashSet<String>,
}

type Predicate = fn(&FilterState, &Candidate<'_>) -> bool;

/// Evaluated in order; cheap string/flag checks first.
const PREDICATES: &[(&str, Predicate)] = &[
    ("verified", check_verified),
    ("saved", check_saved),
    ("category", check_category),
    ("employment_type", check_employment_type),
    ("work_mode", check_work_mode),
    ("salary_min", check_salary_min),
    ("salary_max", check_salary_max),
    ("query", check_query),
    ("location", check_location),
    ("tools", check_tools),
    ("timezone", check_timezone),
    ("seniority", check_seniority),
];

/// True when the listing satisfies every active filter.
pub fn passes_all(filter: &FilterState, candidate: &Candidate<'_>) -> bool {
    PREDICATES
        .iter()
        .all(|(_, predicate)| predicate(filter, candidate))
}

/// Name of the first predicate that rejects the listing, if any.
pub fn first_rejection(filter: &FilterState, candidate: &Candidate<'_>) -> Option<&'static str> {
    PREDICATES
        .iter()
        .find(|(_, predicate)| !predicate(filter, candidate))
        .map(|(name, _)| *name)
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

pub fn check_query(filter: &FilterState, candidate: &Candidate<'_>) -> bool {
    let query = filter.query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }

    let listing = candidate.listing;
    contains_ci(&listing.title, &query)
        || contains_ci(&listing.company, &query)
        || listing.tags.iter().any(|tag| contains_ci(tag, &query))
}

pub fn check_location(filter: &FilterState, candidate: &Candidate<'_>) -> bool {
    let wanted = filter.location.trim().to_lowercase();
    wanted.is_empty() || contains_ci(&candidate.listing.location, &wanted)
}

pub fn check_category(filter: &FilterState, candidate: &Candidate<'_>) -> bool {
    filter.category.admits(&candidate.listing.category)
}

pub fn check_work_mode(filter: &FilterState, candidate: &Candidate<'_>) -> bool {
    filter.work_mode.admits(&candidate.signals.work_mode)
}

pub fn check_employment_type(filter: &FilterState, candidate: &Candidate<'_>) -> bool {
    filter
        .employment_type
        .admits(&candidate.listing.employment_type)
}

pub fn check_salary_min(filter: &FilterState, candidate: &Candidate<'_>) -> bool {
    filter.salary_min == 0 || candidate.signals.salary_range.max >= filter.salary_min
}

pub fn check_salary_max(filter: &FilterState, candidate: &Candidate<'_>) -> bool {
    filter.salary_max == 0 || candidate.signals.salary_range.min <= filter.salary_max
}

pub fn check_saved(filter: &FilterState, candidate: &Candidate<'_>) -> bool {
    !filter.saved_only || candidate.saved_ids.contains(&candidate.listing.id)
}

pub fn check_tools(filter: &FilterState, candidate: &Candidate<'_>) -> bool {
    let selected: Vec<&String> = filter
        .selected_tools
        .iter()
        .filter(|tool| !tool.trim().is_empty())
        .collect();

    selected.is_empty()
        || selected
            .iter()
            .any(|tool| tool_matches(tool, &candidate.signals.tool_signals))
}

pub fn check_timezone(filter: &FilterState, candidate: &Candidate<'_>) -> bool {
    match filter.timezone.region() {
        None => true,
        Some(region) => candidate.signals.timezone.admits(&region),
    }
}

pub fn check_seniority(filter: &FilterState, candidate: &Candidate<'_>) -> bool {
    match filter.seniority.level() {
        None => true,
        Some(level) => candidate.signals.seniority.admits(&level),
    }
}

pub fn check_verified(filter: &FilterState, candidate: &Candidate<'_>) -> bool {
    !filter.verified_only || candidate.listing.company_verified
}
