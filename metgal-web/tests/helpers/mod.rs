//! Shared fakes for metgal-web integration tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use metgal_common::{Department, FilterCriteria, GalleryConfig, ObjectId, ObjectRecord};
use metgal_web::services::{CollectionApi, CollectionError, TranslateError, Translator};
use metgal_web::session::InMemorySessionStore;
use metgal_web::{build_router, AppState};

/// In-memory collection with call counters and switchable failures
#[derive(Default)]
pub struct FakeCollection {
    pub departments: Vec<Department>,
    pub all_ids: Vec<ObjectId>,
    pub search_ids: Vec<ObjectId>,
    pub objects: HashMap<ObjectId, ObjectRecord>,
    pub fail_departments: bool,
    pub fail_search_all: bool,
    pub fail_search: bool,
    pub search_all_calls: AtomicUsize,
    pub search_calls: AtomicUsize,
    pub fetch_calls: AtomicUsize,
}

impl FakeCollection {
    /// Departments 1 and 6, objects 1..=5 with images, object 5 with extra images
    pub fn sample() -> Self {
        let mut objects = HashMap::new();
        for id in 1..=5u64 {
            objects.insert(
                id,
                ObjectRecord {
                    object_id: id,
                    title: Some(format!("Object {}", id)),
                    culture: Some("Japan".to_string()),
                    dynasty: None,
                    primary_image: Some(format!("https://images.metmuseum.org/{}.jpg", id)),
                    primary_image_small: None,
                    additional_images: (id == 5).then(|| {
                        vec![
                            "https://images.metmuseum.org/5b.jpg".to_string(),
                            "https://images.metmuseum.org/5c.jpg".to_string(),
                        ]
                    }),
                    object_date: Some(format!("{}00", 16 + id)),
                },
            );
        }

        Self {
            departments: vec![
                Department {
                    department_id: 1,
                    display_name: "American Decorative Arts".to_string(),
                },
                Department {
                    department_id: 6,
                    display_name: "Asian Art".to_string(),
                },
            ],
            all_ids: vec![1, 2, 3, 4, 5],
            search_ids: vec![4, 5, 3],
            objects,
            ..Default::default()
        }
    }
}

#[async_trait]
impl CollectionApi for FakeCollection {
    async fn list_departments(&self) -> Result<Vec<Department>, CollectionError> {
        if self.fail_departments {
            return Err(CollectionError::ApiError(503, "unavailable".to_string()));
        }
        Ok(self.departments.clone())
    }

    async fn search_all_with_images(&self) -> Result<Vec<ObjectId>, CollectionError> {
        self.search_all_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_search_all {
            return Err(CollectionError::NetworkError("connection refused".to_string()));
        }
        Ok(self.all_ids.clone())
    }

    async fn search(&self, _criteria: &FilterCriteria) -> Result<Vec<ObjectId>, CollectionError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_search {
            return Err(CollectionError::NetworkError("connection reset".to_string()));
        }
        Ok(self.search_ids.clone())
    }

    async fn fetch_object(&self, id: ObjectId) -> Result<Option<ObjectRecord>, CollectionError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.objects.get(&id).cloned())
    }
}

/// Translator that tags text with the target language
pub struct TaggingTranslator;

#[async_trait]
impl Translator for TaggingTranslator {
    async fn translate(
        &self,
        text: &str,
        _source: &str,
        target: &str,
    ) -> Result<String, TranslateError> {
        Ok(format!("[{}] {}", target, text))
    }
}

/// Test helper: router over `collection` with default settings
pub fn setup_app(collection: Arc<FakeCollection>) -> axum::Router {
    let config = GalleryConfig {
        default_page_size: 2,
        ..GalleryConfig::default()
    };
    let sessions = Arc::new(InMemorySessionStore::new(Duration::from_secs(3600)));
    let state = AppState::new(config, collection, Arc::new(TaggingTranslator), sessions);
    build_router(state)
}

/// Test helper: GET request, optionally carrying a cookie
pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header("cookie", cookie);
    }
    builder.body(Body::empty()).unwrap()
}

/// Test helper: read the response body as text
pub async fn body_text(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    String::from_utf8(bytes.to_vec()).expect("Body should be UTF-8")
}
