//! Gallery services
//!
//! Remote collection access, translation and the page pipeline built on them.

pub mod collection_client;
pub mod field_translator;
pub mod filter_resolver;
pub mod gallery;
pub mod paginator;
pub mod translator;

pub use collection_client::{CollectionApi, CollectionError, MetCollectionClient};
pub use field_translator::FieldTranslator;
pub use filter_resolver::{FilterResolver, Resolution};
pub use gallery::{GalleryPage, GalleryService};
pub use paginator::{FetchOutcome, Paginator};
pub use translator::{GoogleTranslator, PassthroughTranslator, TranslateError, Translator};
