//! Filter resolution
//!
//! Maps [`FilterCriteria`] to an identifier list. Empty criteria use the
//! unfiltered "has images" search; anything else uses the filtered search.
//! Upstream failures degrade to an empty list so the gallery renders empty
//! instead of failing the page.

use metgal_common::{FilterCriteria, ObjectId};
use std::sync::Arc;

use super::collection_client::CollectionApi;

/// Identifiers produced by a resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub ids: Vec<ObjectId>,
    /// Upstream failure that forced an empty result, if any
    pub degraded: Option<String>,
}

impl Resolution {
    fn resolved(ids: Vec<ObjectId>) -> Self {
        Self { ids, degraded: None }
    }

    fn degraded(reason: String) -> Self {
        Self {
            ids: Vec::new(),
            degraded: Some(reason),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded.is_some()
    }
}

#[derive(Clone)]
pub struct FilterResolver {
    collection: Arc<dyn CollectionApi>,
}

impl FilterResolver {
    pub fn new(collection: Arc<dyn CollectionApi>) -> Self {
        Self { collection }
    }

    pub async fn resolve(&self, criteria: &FilterCriteria) -> Resolution {
        let result = if criteria.is_empty() {
            tracing::debug!("No filter criteria, using unfiltered listing");
            self.collection.search_all_with_images().await
        } else {
            tracing::debug!(?criteria, "Resolving filtered search");
            self.collection.search(criteria).await
        };

        match result {
            Ok(ids) => {
                tracing::info!(matches = ids.len(), "Filter resolved");
                Resolution::resolved(ids)
            }
            Err(e) => {
                tracing::error!(error = %e, ?criteria, "Search failed, showing empty gallery");
                Resolution::degraded(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::collection_client::CollectionError;
    use async_trait::async_trait;
    use metgal_common::{Department, ObjectRecord};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingCollection {
        all_calls: AtomicUsize,
        search_calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl CollectionApi for CountingCollection {
        async fn list_departments(&self) -> Result<Vec<Department>, CollectionError> {
            Ok(Vec::new())
        }

        async fn search_all_with_images(&self) -> Result<Vec<ObjectId>, CollectionError> {
            self.all_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(CollectionError::ApiError(500, "boom".to_string()));
            }
            Ok(vec![1, 2, 3])
        }

        async fn search(
            &self,
            _criteria: &FilterCriteria,
        ) -> Result<Vec<ObjectId>, CollectionError> {
            self.search_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(CollectionError::NetworkError("timed out".to_string()));
            }
            Ok(vec![42])
        }

        async fn fetch_object(
            &self,
            _id: ObjectId,
        ) -> Result<Option<ObjectRecord>, CollectionError> {
            Ok(None)
        }
    }

    #[tokio::test]
    async fn test_empty_criteria_uses_unfiltered_search() {
        let collection = Arc::new(CountingCollection::default());
        let resolver = FilterResolver::new(collection.clone());

        let resolution = resolver
            .resolve(&FilterCriteria::new(
                Some(String::new()),
                Some(String::new()),
                Some(String::new()),
            ))
            .await;

        assert_eq!(resolution.ids, vec![1, 2, 3]);
        assert!(!resolution.is_degraded());
        assert_eq!(collection.all_calls.load(Ordering::SeqCst), 1);
        assert_eq!(collection.search_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_criteria_use_filtered_search() {
        let collection = Arc::new(CountingCollection::default());
        let resolver = FilterResolver::new(collection.clone());

        let resolution = resolver
            .resolve(&FilterCriteria::new(Some("1".into()), Some("vase".into()), None))
            .await;

        assert_eq!(resolution.ids, vec![42]);
        assert_eq!(collection.all_calls.load(Ordering::SeqCst), 0);
        assert_eq!(collection.search_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_search_failure_degrades_to_empty() {
        let collection = Arc::new(CountingCollection {
            fail: true,
            ..Default::default()
        });
        let resolver = FilterResolver::new(collection);

        let resolution = resolver
            .resolve(&FilterCriteria::new(None, Some("vase".into()), None))
            .await;

        assert!(resolution.ids.is_empty());
        assert!(resolution.is_degraded());
    }

    #[tokio::test]
    async fn test_unfiltered_failure_degrades_to_empty() {
        let collection = Arc::new(CountingCollection {
            fail: true,
            ..Default::default()
        });
        let resolver = FilterResolver::new(collection);

        let resolution = resolver.resolve(&FilterCriteria::default()).await;
        assert!(resolution.ids.is_empty());
        assert!(resolution.degraded.unwrap().contains("500"));
    }
}
