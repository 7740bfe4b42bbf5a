pub mod filter_state;
pub mod pipeline;
pub mod predicates;
pub mod ranking;
pub mod weights;

pub use filter_state::{
    Facet, FilterState, SalaryBound, SeniorityFilter, SortMode, TimezoneFilter,
};
pub use pipeline::{BoardEngine, BoardEngineConfig, FilteredResult, RankedListing};
pub use weights::{PlanTier, RelevanceBonuses};
