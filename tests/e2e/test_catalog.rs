use std::sync::Arc;

use pretty_assertions::assert_eq;

use readaloud::domain::voice::{CatalogError, VoiceCatalog};
use readaloud::infrastructure::tts_api::{HttpTtsApi, TtsApi};

use crate::helpers;

#[tokio::test]
async fn test_catalog_loads_voices_from_the_service() {
    let (base_url, _state) = helpers::spawn_mock_service().await;
    let tts_api: Arc<dyn TtsApi> = Arc::new(HttpTtsApi::new(base_url));

    let voices = VoiceCatalog::new(tts_api).load().await.unwrap();

    assert_eq!(voices.len(), 2);
    assert_eq!(voices[0].short_name, "en-US-AvaNeural");
    assert_eq!(voices[0].friendly_name, "English (Female)");
    assert_eq!(voices[1].short_name, "en-US-AndrewNeural");
}

#[tokio::test]
async fn test_catalog_reports_unreachable_service() {
    // Discard port; nothing listens there
    let tts_api: Arc<dyn TtsApi> = Arc::new(HttpTtsApi::new("http://127.0.0.1:9".to_string()));

    let result = VoiceCatalog::new(tts_api).load().await;

    assert!(matches!(result, Err(CatalogError::Unavailable(_))));
}
