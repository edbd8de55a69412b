//! # metgal Common Library
//!
//! Shared code for the metgal gallery service:
//! - Collection domain model (objects, departments, display records)
//! - Filter criteria
//! - Configuration loading and resolution
//! - Common error type

pub mod collection;
pub mod config;
pub mod error;

pub use collection::{Department, DisplayRecord, FilterCriteria, ObjectId, ObjectRecord};
pub use config::GalleryConfig;
pub use error::{Error, Result};
