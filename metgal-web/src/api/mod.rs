//! HTTP handlers for metgal-web

pub mod gallery;
pub mod health;
pub mod ui;

pub use gallery::{filter, index, more_images};
pub use health::health_routes;
pub use ui::{not_found, ui_routes};
