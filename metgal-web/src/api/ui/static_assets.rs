//! Static asset handlers - CSS and JS served from the binary

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

const MAIN_JS: &str = include_str!("../../../ui/main.js");
const GALLERY_CSS: &str = include_str!("../../../ui/gallery.css");

/// GET /static/main.js
///
/// Shows an object's date while its image is hovered
pub async fn serve_main_js() -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/javascript")],
        MAIN_JS,
    )
        .into_response()
}

/// GET /static/gallery.css
pub async fn serve_gallery_css() -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/css")],
        GALLERY_CSS,
    )
        .into_response()
}
