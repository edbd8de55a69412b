//! Best-effort translation of object text fields
//!
//! Turns fetched [`ObjectRecord`]s into [`DisplayRecord`]s. Title, culture and
//! dynasty are translated independently; a failed field keeps its source
//! text, an absent field gets a fixed placeholder and is never sent to the
//! translator. Nothing here fails.

use futures::future::join_all;
use metgal_common::{DisplayRecord, ObjectId, ObjectRecord};
use std::sync::Arc;

use super::translator::Translator;

pub const TITLE_PLACEHOLDER: &str = "Sin datos de Titulo";
pub const CULTURE_PLACEHOLDER: &str = "Sin datos de Cultura";
pub const DYNASTY_PLACEHOLDER: &str = "Sin datos de dinastía";

/// Why a field shows a fallback value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// Source record had no value; placeholder used
    Missing,
    /// Translation call failed; source value kept
    TranslationFailed(String),
}

/// Result of translating one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldOutcome {
    Translated(String),
    Fallback { value: String, reason: FallbackReason },
}

impl FieldOutcome {
    /// Text to display
    pub fn into_value(self) -> String {
        match self {
            FieldOutcome::Translated(value) => value,
            FieldOutcome::Fallback { value, .. } => value,
        }
    }
}

/// Translates display fields of fetched records
#[derive(Clone)]
pub struct FieldTranslator {
    translator: Arc<dyn Translator>,
    source_lang: String,
    target_lang: String,
}

impl FieldTranslator {
    pub fn new(translator: Arc<dyn Translator>, source_lang: &str, target_lang: &str) -> Self {
        Self {
            translator,
            source_lang: source_lang.to_string(),
            target_lang: target_lang.to_string(),
        }
    }

    /// Translate every record concurrently; output is index-aligned with input
    pub async fn translate(&self, records: &[ObjectRecord]) -> Vec<DisplayRecord> {
        join_all(records.iter().map(|record| self.translate_record(record))).await
    }

    /// Translate the three text fields of one record concurrently
    pub async fn translate_record(&self, record: &ObjectRecord) -> DisplayRecord {
        let id = record.object_id;
        let (title, culture, dynasty) = futures::join!(
            self.translate_field(id, "title", record.title_text(), TITLE_PLACEHOLDER),
            self.translate_field(id, "culture", record.culture_text(), CULTURE_PLACEHOLDER),
            self.translate_field(id, "dynasty", record.dynasty_text(), DYNASTY_PLACEHOLDER),
        );

        DisplayRecord {
            id,
            image_url: record.image_url().map(str::to_string),
            title: title.into_value(),
            culture: culture.into_value(),
            dynasty: dynasty.into_value(),
            more_images: record.more_images(),
            date: record.object_date.clone().unwrap_or_default(),
        }
    }

    async fn translate_field(
        &self,
        id: ObjectId,
        field: &'static str,
        source: Option<&str>,
        placeholder: &str,
    ) -> FieldOutcome {
        let Some(text) = source else {
            return FieldOutcome::Fallback {
                value: placeholder.to_string(),
                reason: FallbackReason::Missing,
            };
        };

        match self
            .translator
            .translate(text, &self.source_lang, &self.target_lang)
            .await
        {
            Ok(translated) if !translated.trim().is_empty() => FieldOutcome::Translated(translated),
            Ok(_) => {
                tracing::warn!(id, field, "Empty translation, keeping source text");
                FieldOutcome::Fallback {
                    value: text.to_string(),
                    reason: FallbackReason::TranslationFailed("empty translation".to_string()),
                }
            }
            Err(e) => {
                tracing::warn!(id, field, error = %e, "Translation failed, keeping source text");
                FieldOutcome::Fallback {
                    value: text.to_string(),
                    reason: FallbackReason::TranslationFailed(e.to_string()),
                }
            }
        }
    }
}
