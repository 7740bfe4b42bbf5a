use std::cmp::Ordering;

use super::{
    filter_state::{FilterState, SortMode},
    weights::{PlanTier, RelevanceBonuses},
};
use crate::corrections::{tools::tool_matches, DerivedSignals};
use crate::Listing;

/// Composite relevance score used by [`SortMode::Relevant`].
///
/// `matchScore` (0 when absent) plus a bonus per query token found in the
/// listing's title/company/tags/tools, per selected tool the listing carries,
/// and for a seniority filter that equals the inferred bucket. Listings whose
/// seniority is unknown get no seniority bonus.
pub fn relevance_score(
    listing: &Listing,
    signals: &DerivedSignals,
    filter: &FilterState,
    bonuses: &RelevanceBonuses,
) -> f64 {
    let mut score = listing.match_score_or_zero();

    let tokens = filter.query_tokens();
    if !tokens.is_empty() {
        let haystack = keyword_haystack(listing);
        let hits = tokens
            .iter()
            .filter(|token| haystack.contains(token.as_str()))
            .count();
        score += hits as f64 * bonuses.keyword_hit;
    }

    let tool_hits = filter
        .selected_tools
        .iter()
        .filter(|tool| tool_matches(tool, &signals.tool_signals))
        .count();
    score += tool_hits as f64 * bonuses.tool_match;

    if let Some(level) = filter.seniority.level() {
        if signals.seniority.is_known(&level) {
            score += bonuses.seniority_match;
        }
    }

    score
}

fn keyword_haystack(listing: &Listing) -> String {
    let mut parts: Vec<&str> = vec![listing.title.as_str(), listing.company.as_str()];
    parts.extend(listing.tags.iter().map(String::as_str));
    parts.extend(listing.tools.iter().map(String::as_str));
    parts.join(" ").to_lowercase()
}

/// Sort inputs for one listing, computed before ordering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SortKey {
    pub plan_weight: u8,
    pub timestamp: i64,
    pub salary_max: u64,
    pub relevance: f64,
}

impl SortKey {
    pub fn new(listing: &Listing, signals: &DerivedSignals, relevance: f64) -> Self {
        Self {
            plan_weight: PlanTier::from_plan_type(listing.plan_type.as_deref()).weight(),
            timestamp: listing.timestamp_or_zero(),
            salary_max: signals.salary_range.max,
            relevance,
        }
    }
}

/// Descending order: plan weight, then the `sort_by` key, then timestamp.
pub fn compare_keys(a: &SortKey, b: &SortKey, sort_by: SortMode) -> Ordering {
    let by_mode = match sort_by {
        SortMode::Newest => Ordering::Equal,
        SortMode::Salary => b.salary_max.cmp(&a.salary_max),
        SortMode::Relevant => b.relevance.total_cmp(&a.relevance),
    };

    b.plan_weight
        .cmp(&a.plan_weight)
        .then(by_mode)
        .then_with(|| b.timestamp.cmp(&a.timestamp))
}

/// Stable sort of `items` by their [`SortKey`].
pub fn sort_by_key<T>(items: &mut [T], sort_by: SortMode, key: impl Fn(&T) -> SortKey) {
    items.sort_by(|a, b| compare_keys(&key(a), &key(b), sort_by));
}
