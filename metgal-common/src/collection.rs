//! Collection domain model
//!
//! Types mirroring the Met collection API payloads, plus the request-scoped
//! projections the gallery renders.

use serde::{Deserialize, Serialize};

/// Handle into the remote catalog
pub type ObjectId = u64;

/// Curatorial department, used as an optional search filter
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub department_id: u32,
    pub display_name: String,
}

/// Raw object detail payload as returned by `/objects/{id}`
///
/// The remote API reports missing text as `""`; use the accessors below
/// rather than the raw fields when absence matters.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectRecord {
    #[serde(rename = "objectID")]
    pub object_id: ObjectId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub culture: Option<String>,
    #[serde(default)]
    pub dynasty: Option<String>,
    #[serde(default)]
    pub primary_image: Option<String>,
    #[serde(default)]
    pub primary_image_small: Option<String>,
    #[serde(default)]
    pub additional_images: Option<Vec<String>>,
    #[serde(default)]
    pub object_date: Option<String>,
}

impl ObjectRecord {
    /// Title, if the record carries a non-blank one
    pub fn title_text(&self) -> Option<&str> {
        present(&self.title)
    }

    /// Culture, if the record carries a non-blank one
    pub fn culture_text(&self) -> Option<&str> {
        present(&self.culture)
    }

    /// Dynasty, if the record carries a non-blank one
    pub fn dynasty_text(&self) -> Option<&str> {
        present(&self.dynasty)
    }

    /// Small image when available, otherwise the full-size image
    pub fn image_url(&self) -> Option<&str> {
        present(&self.primary_image_small).or_else(|| present(&self.primary_image))
    }

    /// Additional image URLs, `None` when the record has none
    pub fn more_images(&self) -> Option<Vec<String>> {
        self.additional_images
            .as_ref()
            .filter(|images| !images.is_empty())
            .cloned()
    }
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Request-scoped projection of an [`ObjectRecord`] ready for rendering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayRecord {
    pub id: ObjectId,
    pub image_url: Option<String>,
    /// Translated title, or the fallback value
    pub title: String,
    /// Translated culture, or the fallback value
    pub culture: String,
    /// Translated dynasty, or the fallback value
    pub dynasty: String,
    pub more_images: Option<Vec<String>>,
    pub date: String,
}

/// User supplied search filters
///
/// Blank values are normalised to `None`; all three absent means "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub department: Option<String>,
    pub keyword: Option<String>,
    pub geolocation: Option<String>,
}

impl FilterCriteria {
    pub fn new(
        department: Option<String>,
        keyword: Option<String>,
        geolocation: Option<String>,
    ) -> Self {
        Self {
            department: normalize(department),
            keyword: normalize(keyword),
            geolocation: normalize(geolocation),
        }
    }

    /// True when no criterion is set
    pub fn is_empty(&self) -> bool {
        self.department.is_none() && self.keyword.is_none() && self.geolocation.is_none()
    }
}

fn normalize(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
