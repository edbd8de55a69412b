//! Gallery request pipeline
//!
//! identifier source → [`Paginator`] → [`FieldTranslator`] → page data.
//! The listing and filter flows differ only in where identifiers come from;
//! the detail flow runs the same pipeline on a single identifier.

use metgal_common::{Department, DisplayRecord, FilterCriteria, ObjectId};
use std::sync::Arc;

use super::collection_client::{CollectionApi, CollectionError};
use super::field_translator::FieldTranslator;
use super::filter_resolver::FilterResolver;
use super::paginator::Paginator;
use crate::pagination::PageWindow;
use crate::session::{IdList, SessionId, SessionStore};

/// Everything a gallery page renders
#[derive(Debug, Clone)]
pub struct GalleryPage {
    pub departments: Vec<Department>,
    pub records: Vec<DisplayRecord>,
    pub window: PageWindow,
    /// Length of the identifier list the window was taken from
    pub total: usize,
    /// Criteria of a filter submission, empty for the default listing
    pub criteria: FilterCriteria,
    /// Set when the search failed and the gallery is empty because of it
    pub degraded: Option<String>,
}

#[derive(Clone)]
pub struct GalleryService {
    collection: Arc<dyn CollectionApi>,
    resolver: FilterResolver,
    paginator: Paginator,
    fields: FieldTranslator,
    sessions: Arc<dyn SessionStore>,
}

impl GalleryService {
    pub fn new(
        collection: Arc<dyn CollectionApi>,
        fields: FieldTranslator,
        sessions: Arc<dyn SessionStore>,
        max_concurrent_fetches: Option<usize>,
    ) -> Self {
        Self {
            resolver: FilterResolver::new(collection.clone()),
            paginator: Paginator::new(collection.clone(), max_concurrent_fetches),
            collection,
            fields,
            sessions,
        }
    }

    /// Default listing: the session's last filter result, else every object with images
    pub async fn listing(
        &self,
        session: &SessionId,
        window: PageWindow,
    ) -> Result<GalleryPage, CollectionError> {
        let departments = self.collection.list_departments().await?;

        let ids: IdList = match self.sessions.get(session).await {
            Some(ids) => {
                tracing::debug!(
                    session = %session,
                    ids = ids.len(),
                    "Reusing session identifier list"
                );
                ids
            }
            None => self.collection.search_all_with_images().await?.into(),
        };

        let records = self.load_page(&ids, window).await;
        Ok(GalleryPage {
            departments,
            records,
            window,
            total: ids.len(),
            criteria: FilterCriteria::default(),
            degraded: None,
        })
    }

    /// Filter submission: resolve, remember in the session, render the window
    pub async fn filter(
        &self,
        session: SessionId,
        criteria: FilterCriteria,
        window: PageWindow,
    ) -> Result<GalleryPage, CollectionError> {
        let departments = self.collection.list_departments().await?;

        let resolution = self.resolver.resolve(&criteria).await;
        if resolution.is_degraded() {
            // Degraded searches leave no list behind
            self.sessions.remove(&session).await;
        } else {
            self.sessions.put(session, resolution.ids.clone()).await;
        }

        let records = self.load_page(&resolution.ids, window).await;
        Ok(GalleryPage {
            departments,
            records,
            window,
            total: resolution.ids.len(),
            criteria,
            degraded: resolution.degraded,
        })
    }

    /// Detail view of one object; empty when the object cannot be fetched
    pub async fn detail(&self, id: ObjectId, page_size: usize) -> Vec<DisplayRecord> {
        self.load_page(&[id], PageWindow::new(1, page_size)).await
    }

    async fn load_page(&self, ids: &[ObjectId], window: PageWindow) -> Vec<DisplayRecord> {
        let records = self.paginator.paginate(ids, window).await;
        self.fields.translate(&records).await
    }
}
