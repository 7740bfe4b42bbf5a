use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::corrections::{
    salary::SalaryRange,
    seniority::Seniority,
    timezone::TimezoneRegion,
    tools::tool_display_label,
    work_mode::WorkMode,
    Inferred,
};
use crate::matching::{pipeline::RankedListing, weights::PlanTier};
use crate::Listing;

/// Listing as rendered on the board: the stored record plus what the engine
/// derived from it.
#[derive(Debug, Clone, Serialize)]
pub struct ListingView {
    #[serde(flatten)]
    pub listing: Listing,
    pub derived: DerivedView,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedView {
    pub salary_range: SalaryRange,
    pub work_mode: WorkMode,
    pub seniority: Inferred<Seniority>,
    pub timezone: Inferred<TimezoneRegion>,
    pub plan_tier: PlanTier,
    pub plan_weight: u8,
    pub relevance: f64,
    /// Chip labels, sorted.
    pub tool_labels: Vec<String>,
    pub posted_at: Option<DateTime<Utc>>,
}

impl From<&RankedListing<'_>> for ListingView {
    fn from(ranked: &RankedListing<'_>) -> Self {
        let listing = ranked.listing;
        let signals = &ranked.signals;

        let mut tool_labels: Vec<String> = signals
            .tool_signals
            .iter()
            .map(|signal| tool_display_label(signal))
            .collect();
        tool_labels.sort();
        tool_labels.dedup();

        let plan_tier = PlanTier::from_plan_type(listing.plan_type.as_deref());

        Self {
            listing: listing.clone(),
            derived: DerivedView {
                salary_range: signals.salary_range,
                work_mode: signals.work_mode,
                seniority: signals.seniority,
                timezone: signals.timezone,
                plan_tier,
                plan_weight: plan_tier.weight(),
                relevance: ranked.relevance,
                tool_labels,
                posted_at: listing
                    .timestamp
                    .and_then(DateTime::<Utc>::from_timestamp_millis),
            },
        }
    }
}
