//! Gallery routes
//!
//! - `GET /` default listing (session identifiers if present)
//! - `GET /filtrar` filter submission (re-resolves and updates the session)
//! - `GET /moreImg/:id` detail view with additional images

use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Response},
};
use metgal_common::{FilterCriteria, ObjectId};
use serde::Deserialize;

use super::ui::{self, pages};
use crate::pagination::PageWindow;
use crate::session::Session;
use crate::{ApiResult, AppState};

/// Query parameters for the default listing
///
/// Kept as raw strings: unparseable values fall back to defaults instead of
/// rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct ListingQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Query parameters for a filter submission
#[derive(Debug, Default, Deserialize)]
pub struct FilterQuery {
    pub department: Option<String>,
    pub keyword: Option<String>,
    pub location: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

fn window_for(state: &AppState, page: Option<&str>, limit: Option<&str>) -> PageWindow {
    PageWindow::from_query(
        page,
        limit,
        state.settings.default_page_size,
        state.settings.max_page_size,
    )
}

/// GET /?page=N&limit=M
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ListingQuery>,
) -> ApiResult<Response> {
    let window = window_for(&state, query.page.as_deref(), query.limit.as_deref());

    let page = state.gallery.listing(&session.id, window).await?;

    let mut response = Html(pages::gallery_page(&page)).into_response();
    session.attach_cookie(&mut response);
    Ok(response)
}

/// GET /filtrar?department=&keyword=&location=&page=&limit=
pub async fn filter(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<FilterQuery>,
) -> ApiResult<Response> {
    let window = window_for(&state, query.page.as_deref(), query.limit.as_deref());
    let criteria = FilterCriteria::new(query.department, query.keyword, query.location);

    tracing::info!(session = %session.id, ?criteria, page = window.page, "Filter submitted");
    let page = state.gallery.filter(session.id, criteria, window).await?;

    let mut response = Html(pages::gallery_page(&page)).into_response();
    session.attach_cookie(&mut response);
    Ok(response)
}

/// GET /moreImg/:id
///
/// A non-numeric id is treated as an unknown route.
pub async fn more_images(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let Ok(id) = id.trim().parse::<ObjectId>() else {
        return ui::not_found().await.into_response();
    };

    let records = state
        .gallery
        .detail(id, state.settings.detail_page_size)
        .await;

    Html(pages::detail_page(id, &records)).into_response()
}
