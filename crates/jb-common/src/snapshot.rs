use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::Listing;

/// Statuses that may be shown on the public board. A missing status counts as
/// published.
pub const PUBLISHED_STATUSES: &[&str] = &["active", "published", "approved", "live"];

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to read listing snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse listing snapshot {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Parse a JSON array of listings exported from the store.
pub fn parse_listings(raw: &str) -> Result<Vec<Listing>, serde_json::Error> {
    serde_json::from_str(raw)
}

/// Load a listing snapshot from disk.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_listings(path: impl AsRef<Path>) -> Result<Vec<Listing>, SnapshotError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let listings = parse_listings(&raw).map_err(|source| SnapshotError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    info!(count = listings.len(), "listing snapshot loaded");
    Ok(listings)
}

pub fn is_published(listing: &Listing) -> bool {
    match listing.status.as_deref().map(str::trim) {
        None | Some("") => true,
        Some(status) => PUBLISHED_STATUSES
            .iter()
            .any(|published| status.eq_ignore_ascii_case(published)),
    }
}

/// Drop drafts, expired and other non-public listings.
pub fn published_only(listings: Vec<Listing>) -> Vec<Listing> {
    let before = listings.len();
    let kept: Vec<Listing> = listings.into_iter().filter(is_published).collect();

    if kept.len() < before {
        warn!(
            dropped = before - kept.len(),
            kept = kept.len(),
            "unpublished listings removed from snapshot"
        );
    }

    kept
}
