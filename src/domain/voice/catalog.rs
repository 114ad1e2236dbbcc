use std::sync::Arc;

use crate::infrastructure::tts_api::TtsApi;

use super::error::CatalogError;
use super::model::Voice;

/// Loads the selectable voice list once at startup.
///
/// One attempt, no retry, no caching across runs: a failed load leaves the
/// caller with no voices and a reported error.
pub struct VoiceCatalog {
    tts_api: Arc<dyn TtsApi>,
}

impl VoiceCatalog {
    pub fn new(tts_api: Arc<dyn TtsApi>) -> Self {
        Self { tts_api }
    }

    /// Fetch the voice list from the service
    pub async fn load(&self) -> Result<Vec<Voice>, CatalogError> {
        let voices = self
            .tts_api
            .list_voices()
            .await
            .map_err(CatalogError::Unavailable)?;

        if voices.is_empty() {
            return Err(CatalogError::Empty);
        }

        tracing::info!(voice_count = voices.len(), "Voice catalog loaded");
        Ok(voices)
    }

    /// Resolve the requested voice against the catalog, defaulting to the
    /// first entry when nothing was requested
    pub fn resolve<'a>(
        voices: &'a [Voice],
        requested: Option<&str>,
    ) -> Result<&'a Voice, CatalogError> {
        match requested {
            Some(name) => voices
                .iter()
                .find(|voice| voice.short_name == name)
                .ok_or_else(|| CatalogError::UnknownVoice(name.to_string())),
            None => voices.first().ok_or(CatalogError::Empty),
        }
    }
}
