use async_trait::async_trait;

use crate::domain::voice::Voice;

/// Client surface of the remote TTS service.
///
/// Implementations are responsible for:
/// - One synthesis attempt per call (retry decisions belong to the caller)
/// - Returning the full audio body, not a stream
/// - Collapsing transport, status and decode failures into a single error
#[async_trait]
pub trait TtsApi: Send + Sync {
    /// Fetch the list of selectable voices
    async fn list_voices(&self) -> Result<Vec<Voice>, String>;

    /// Synthesize one text segment with the given voice
    ///
    /// Returns the binary audio payload (MP3) on success
    async fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>, String>;
}
