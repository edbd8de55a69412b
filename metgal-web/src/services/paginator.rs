//! Page window fetching
//!
//! Fetches the object records for one page window concurrently. Each fetch is
//! isolated: a missing or failing object is logged and dropped, the rest of
//! the page is unaffected. Output order follows the window, not completion.

use futures::stream::{self, StreamExt};
use metgal_common::{ObjectId, ObjectRecord};
use std::sync::Arc;

use super::collection_client::CollectionApi;
use crate::pagination::PageWindow;

/// Result of fetching one object
#[derive(Debug)]
pub enum FetchOutcome {
    Found(ObjectRecord),
    NotFound(ObjectId),
    Failed { id: ObjectId, reason: String },
}

impl FetchOutcome {
    pub fn into_record(self) -> Option<ObjectRecord> {
        match self {
            FetchOutcome::Found(record) => Some(record),
            FetchOutcome::NotFound(_) | FetchOutcome::Failed { .. } => None,
        }
    }
}

/// Fetches object records for page windows
#[derive(Clone)]
pub struct Paginator {
    collection: Arc<dyn CollectionApi>,
    max_concurrency: Option<usize>,
}

impl Paginator {
    /// `max_concurrency` of `None` launches the whole window at once
    pub fn new(collection: Arc<dyn CollectionApi>, max_concurrency: Option<usize>) -> Self {
        Self {
            collection,
            max_concurrency,
        }
    }

    /// Fetch the records of `window` over `ids`, in window order
    pub async fn paginate(&self, ids: &[ObjectId], window: PageWindow) -> Vec<ObjectRecord> {
        self.fetch_window(ids, window)
            .await
            .into_iter()
            .filter_map(FetchOutcome::into_record)
            .collect()
    }

    /// Per-identifier outcomes for `window`, index-aligned with the window
    pub async fn fetch_window(&self, ids: &[ObjectId], window: PageWindow) -> Vec<FetchOutcome> {
        let page_ids = window.slice(ids);
        if page_ids.is_empty() {
            tracing::debug!(
                page = window.page,
                limit = window.limit,
                total = ids.len(),
                "Empty page window"
            );
            return Vec::new();
        }

        let concurrency = self
            .max_concurrency
            .unwrap_or(page_ids.len())
            .clamp(1, page_ids.len());

        // `buffered` keeps input order regardless of completion order
        let outcomes: Vec<FetchOutcome> = stream::iter(page_ids.iter().copied())
            .map(|id| self.fetch_one(id))
            .buffered(concurrency)
            .collect()
            .await;

        let found = outcomes
            .iter()
            .filter(|o| matches!(o, FetchOutcome::Found(_)))
            .count();
        tracing::debug!(
            page = window.page,
            requested = page_ids.len(),
            found,
            "Fetched page window"
        );

        outcomes
    }

    async fn fetch_one(&self, id: ObjectId) -> FetchOutcome {
        match self.collection.fetch_object(id).await {
            Ok(Some(record)) => FetchOutcome::Found(record),
            Ok(None) => {
                tracing::warn!(id, "Object not found");
                FetchOutcome::NotFound(id)
            }
            Err(e) => {
                tracing::error!(id, error = %e, "Object fetch failed");
                FetchOutcome::Failed {
                    id,
                    reason: e.to_string(),
                }
            }
        }
    }
}
