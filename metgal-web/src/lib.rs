//! metgal-web library - Met collection gallery
//!
//! Server-rendered gallery over the Met collection API with machine
//! translated object fields. Exposed as a library for integration testing.

use axum::http::{header, HeaderValue};
use axum::Router;
use metgal_common::GalleryConfig;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;
pub mod pagination;
pub mod services;
pub mod session;

pub use crate::error::{ApiError, ApiResult};

use services::{CollectionApi, FieldTranslator, GalleryService, Translator};
use session::SessionStore;

/// Same policy the gallery has always sent: own origin, plus Met image hosts
const CONTENT_SECURITY_POLICY: &str =
    "default-src 'self'; img-src 'self' data: https://images.metmuseum.org";

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Page pipeline
    pub gallery: GalleryService,
    /// Loaded configuration
    pub settings: Arc<GalleryConfig>,
}

impl AppState {
    /// Wire the pipeline from its collaborators
    pub fn new(
        config: GalleryConfig,
        collection: Arc<dyn CollectionApi>,
        translator: Arc<dyn Translator>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        let fields = FieldTranslator::new(translator, &config.source_lang, &config.target_lang);
        let gallery = GalleryService::new(
            collection,
            fields,
            sessions,
            config.max_concurrent_fetches,
        );

        Self {
            gallery,
            settings: Arc::new(config),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/", get(api::index))
        .route("/filtrar", get(api::filter))
        .route("/moreImg/:id", get(api::more_images))
        .merge(api::ui_routes())
        .merge(api::health_routes())
        .fallback(api::not_found)
        .with_state(state)
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static(CONTENT_SECURITY_POLICY),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("SAMEORIGIN"),
        ))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
