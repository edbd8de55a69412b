//! UI routes - HTML pages and static assets
//!
//! - **Pages** (`pages`): gallery, detail and 404 markup
//! - **Static assets** (`static_assets`): stylesheet and hover script

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
    Router,
};

use crate::AppState;

pub mod pages;
mod static_assets;

use static_assets::{serve_gallery_css, serve_main_js};

/// Build static asset routes
pub fn ui_routes() -> Router<AppState> {
    Router::new()
        .route("/static/main.js", get(serve_main_js))
        .route("/static/gallery.css", get(serve_gallery_css))
}

/// Fallback for unmatched routes
pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Html(pages::error_page(
            "error 404 Not Found",
            "la ruta que estas buscando no existe",
        )),
    )
}

/// Escape text for use in HTML element content and quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
        assert_eq!(escape_html("Dinastía Ming"), "Dinastía Ming");
    }
}
