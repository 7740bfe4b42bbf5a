use std::collections::HashSet;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use jb_common::api::{BoardQuery, ListingView, RankRequest};
use jb_common::corrections::tools::available_tools;
use jb_common::matching::FilterState;
use serde::Serialize;
use tracing::debug;

use crate::SharedState;
use crate::error::ApiError;
use crate::handlers::pagination::{PageParams, validate_pagination};

#[derive(Debug, Serialize)]
pub struct JobListResponse {
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
    /// Canonical form of the filter that was applied.
    pub filter: BoardQuery,
    pub items: Vec<ListingView>,
}

#[derive(Debug, Serialize)]
pub struct RankResponse {
    pub total: usize,
    pub filter: BoardQuery,
    pub items: Vec<ListingView>,
}

pub async fn list_jobs(
    State(state): State<SharedState>,
    Query(query): Query<BoardQuery>,
    Query(page): Query<PageParams>,
) -> Result<Json<JobListResponse>, ApiError> {
    let (limit, offset) = validate_pagination(page.limit, page.offset)?;

    let filter = query.to_filter_state();
    let saved_ids = query.saved_id_set();
    let result = state.engine.compute(&state.listings, &filter, &saved_ids);

    let items = result
        .ordered
        .iter()
        .skip(offset)
        .take(limit)
        .map(ListingView::from)
        .collect::<Vec<_>>();

    debug!(total = result.len(), returned = items.len(), "jobs listed");

    Ok(Json(JobListResponse {
        total: result.len(),
        limit,
        offset,
        filter: BoardQuery::from_filter(&filter),
        items,
    }))
}

/// Rank caller-supplied listings without touching the loaded snapshot.
pub async fn rank_jobs(
    State(state): State<SharedState>,
    Json(request): Json<RankRequest>,
) -> Result<Json<RankResponse>, ApiError> {
    let filter = request.filter.to_filter_state();
    let saved_ids: HashSet<String> = request
        .saved_ids
        .into_iter()
        .chain(request.filter.saved_id_set())
        .collect();

    let result = state.engine.compute(&request.listings, &filter, &saved_ids);
    let items = result
        .ordered
        .iter()
        .map(ListingView::from)
        .collect::<Vec<_>>();

    Ok(Json(RankResponse {
        total: items.len(),
        filter: BoardQuery::from_filter(&filter),
        items,
    }))
}

pub async fn get_job(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<ListingView>, ApiError> {
    let listing = state
        .listings
        .iter()
        .find(|listing| listing.id == id)
        .ok_or_else(|| ApiError::NotFound(format!("job {id} not found")))?;

    let ranked = state
        .engine
        .evaluate(listing, &FilterState::default(), &HashSet::new())
        .ok_or_else(|| ApiError::NotFound(format!("job {id} not found")))?;

    Ok(Json(ListingView::from(&ranked)))
}

/// Tool chip labels offered by the board's tool filter.
pub async fn list_tools(State(state): State<SharedState>) -> Json<Vec<String>> {
    Json(available_tools(&state.listings))
}
