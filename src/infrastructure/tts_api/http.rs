use async_trait::async_trait;
use serde::Serialize;

use crate::domain::voice::Voice;

use super::api::TtsApi;

const VOICES_PATH: &str = "/api/voices";
const TTS_PATH: &str = "/api/tts";

/// Body for POST /api/tts
#[derive(Debug, Serialize)]
struct TtsRequest<'a> {
    text: &'a str,
    voice: &'a str,
}

/// HTTP client for the TTS web service
pub struct HttpTtsApi {
    base_url: String,
    http_client: reqwest::Client,
}

impl HttpTtsApi {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl TtsApi for HttpTtsApi {
    async fn list_voices(&self) -> Result<Vec<Voice>, String> {
        let response = self
            .http_client
            .get(self.url(VOICES_PATH))
            .send()
            .await
            .map_err(|e| format!("voice list request failed: {e}"))?;

        if !response.status().is_success() {
            return Err(format!(
                "voice list request failed with status {}",
                response.status()
            ));
        }

        response
            .json::<Vec<Voice>>()
            .await
            .map_err(|e| format!("failed to parse voice list: {e}"))
    }

    async fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>, String> {
        tracing::debug!(
            voice,
            text_length = text.len(),
            "Calling TTS synthesis endpoint"
        );

        let response = self
            .http_client
            .post(self.url(TTS_PATH))
            .json(&TtsRequest { text, voice })
            .send()
            .await
            .map_err(|e| format!("synthesis request failed: {e}"))?;

        if !response.status().is_success() {
            return Err(format!(
                "synthesis request failed with status {}",
                response.status()
            ));
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| format!("failed to read audio body: {e}"))?;

        Ok(audio.to_vec())
    }
}
