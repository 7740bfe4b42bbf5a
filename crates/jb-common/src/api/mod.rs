pub mod board_query;
pub mod listing_view;

pub use board_query::{BoardQuery, RankRequest};
pub use listing_view::{DerivedView, ListingView};
