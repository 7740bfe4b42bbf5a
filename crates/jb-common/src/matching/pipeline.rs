use std::collections::HashSet;

use tracing::debug;

use super::{
    filter_state::FilterState,
    predicates::{passes_all, Candidate},
    ranking::{relevance_score, sort_by_key, SortKey},
    weights::RelevanceBonuses,
};
use crate::{corrections::DerivedSignals, Listing};

#[derive(Debug, Clone, Default)]
pub struct BoardEngineConfig {
    pub bonuses: RelevanceBonuses,
}

impl BoardEngineConfig {
    pub fn from_env() -> Self {
        Self {
            bonuses: RelevanceBonuses::from_env(),
        }
    }
}

/// One listing in the board view, with the values it was filtered and sorted by.
#[derive(Debug, Clone)]
pub struct RankedListing<'a> {
    pub listing: &'a Listing,
    pub signals: DerivedSignals,
    pub relevance: f64,
    pub sort_key: SortKey,
}

#[derive(Debug, Clone, Default)]
pub struct FilteredResult<'a> {
    pub ordered: Vec<RankedListing<'a>>,
}

impl<'a> FilteredResult<'a> {
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Item shown in the detail panel when nothing is selected.
    pub fn top(&self) -> Option<&RankedListing<'a>> {
        self.ordered.first()
    }

    pub fn ids(&self) -> Vec<&'a str> {
        self.ordered.iter().map(|r| r.listing.id.as_str()).collect()
    }

    pub fn listings(&self) -> Vec<&'a Listing> {
        self.ordered.iter().map(|r| r.listing).collect()
    }
}

/// Filter + rank engine for the job board.
///
/// Stateless apart from its config: every call derives signals afresh from the
/// given listings, so it can be re-run on any filter change.
#[derive(Debug, Clone)]
pub struct BoardEngine {
    config: BoardEngineConfig,
}

impl Default for BoardEngine {
    fn default() -> Self {
        Self::new(BoardEngineConfig::default())
    }
}

impl BoardEngine {
    pub fn new(config: BoardEngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BoardEngineConfig {
        &self.config
    }

    /// Filter `listings` by `filter` and order what is left.
    pub fn compute<'a>(
        &self,
        listings: &'a [Listing],
        filter: &FilterState,
        saved_ids: &HashSet<String>,
    ) -> FilteredResult<'a> {
        let mut ordered: Vec<RankedListing<'a>> = listings
            .iter()
            .filter_map(|listing| self.evaluate(listing, filter, saved_ids))
            .collect();

        sort_by_key(&mut ordered, filter.sort_by, |ranked| ranked.sort_key);

        debug!(
            total = listings.len(),
            matched = ordered.len(),
            sort_by = filter.sort_by.as_ref(),
            "board view computed"
        );

        FilteredResult { ordered }
    }

    /// Signals, predicate and sort key for a single listing; `None` when
    /// a filter rejects it.
    pub fn evaluate<'a>(
        &self,
        listing: &'a Listing,
        filter: &FilterState,
        saved_ids: &HashSet<String>,
    ) -> Option<RankedListing<'a>> {
        let signals = DerivedSignals::derive(listing);
        let candidate = Candidate {
            listing,
            signals: &signals,
            saved_ids,
        };
        if !passes_all(filter, &candidate) {
            return None;
        }

        let relevance = relevance_score(listing, &signals, filter, &self.config.bonuses);
        let sort_key = SortKey::new(listing, &signals, relevance);

        Some(RankedListing {
            listing,
            signals,
            relevance,
            sort_key,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::filter_state::SortMode;

    fn listing(id: &str, plan: Option<&str>, salary: &str, timestamp: i64) -> Listing {
        Listing {
            id: id.into(),
            plan_type: plan.map(str::to_string),
            salary: salary.into(),
            timestamp: Some(timestamp),
            ..Listing::default()
        }
    }

    #[test]
    fn newest_first_within_a_tier() {
        let listings = vec![
            listing("old", None, "", 1),
            listing("new", None, "", 3),
            listing("mid", None, "", 2),
        ];
        let result = BoardEngine::default().compute(
            &listings,
            &FilterState::default(),
            &HashSet::new(),
        );
        assert_eq!(result.ids(), vec!["new", "mid", "old"]);
    }

    #[test]
    fn missing_timestamps_sort_last() {
        let mut undated = listing("undated", None, "", 0);
        undated.timestamp = None;
        let listings = vec![undated, listing("dated", None, "", 5)];
        let result = BoardEngine::default().compute(
            &listings,
            &FilterState::default(),
            &HashSet::new(),
        );
        assert_eq!(result.ids(), vec!["dated", "undated"]);
    }

    #[test]
    fn salary_sort_uses_annualized_max() {
        let listings = vec![
            listing("hourly", None, "$60/hr", 1),
            listing("annual", None, "$100k - $110k", 1),
        ];
        let filter = FilterState {
            sort_by: SortMode::Salary,
            ..FilterState::default()
        };
        let result = BoardEngine::default().compute(&listings, &filter, &HashSet::new());
        // 60 * 2080 = 124_800
        assert_eq!(result.ids(), vec!["hourly", "annual"]);
        assert_eq!(result.top().map(|r| r.signals.salary_range.max), Some(124_800));
    }

    #[test]
    fn saved_only_uses_caller_ids() {
        let listings = vec![listing("a", None, "", 1), listing("b", None, "", 2)];
        let filter = FilterState {
            saved_only: true,
            ..FilterState::default()
        };
        let saved = HashSet::from(["a".to_string()]);
        let result = BoardEngine::default().compute(&listings, &filter, &saved);
        assert_eq!(result.ids(), vec!["a"]);
    }

    #[test]
    fn input_is_left_untouched() {
        let listings = vec![listing("a", None, "", 1), listing("b", Some("Elite"), "", 2)];
        let before = listings.clone();
        let _ = BoardEngine::default().compute(&listings, &FilterState::default(), &HashSet::new());
        assert_eq!(listings, before);
    }

    #[test]
    fn empty_input_yields_empty_result() {
        let result = BoardEngine::default().compute(&[], &FilterState::default(), &HashSet::new());
        assert!(result.is_empty());
        assert!(result.top().is_none());
    }
}
