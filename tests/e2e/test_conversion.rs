use std::sync::Arc;

use pretty_assertions::assert_eq;
use tokio::sync::watch;

use readaloud::domain::session::{ConversionService, SessionError, StallPolicy};
use readaloud::infrastructure::audio::AudioPlayer;
use readaloud::infrastructure::tts_api::{HttpTtsApi, TtsApi};

use crate::helpers::{self, FailingPlayer, RecordingPlayer};

const VOICE: &str = "en-US-AvaNeural";

fn service_with(
    base_url: String,
    player: Arc<dyn AudioPlayer>,
    max_chars: usize,
    policy: StallPolicy,
) -> ConversionService {
    let tts_api: Arc<dyn TtsApi> = Arc::new(HttpTtsApi::new(base_url));
    ConversionService::new(tts_api, player, max_chars, policy, false)
}

/// The sender must stay alive: dropping it tears the session down
fn no_cancel() -> (watch::Sender<bool>, watch::Receiver<bool>) {
    watch::channel(false)
}

#[tokio::test]
async fn test_single_segment_conversion_plays_and_merges() {
    let (base_url, _state) = helpers::spawn_mock_service().await;
    let player = RecordingPlayer::default();
    let service = service_with(
        base_url,
        Arc::new(player.clone()),
        800,
        StallPolicy::default(),
    );
    let (_guard, cancel) = no_cancel();

    let text = "Hello world. This is a test.";
    let outcome = service.convert(text, VOICE, cancel).await.unwrap();

    assert_eq!(outcome.segment_count, 1);
    assert_eq!(outcome.failed_segments, Vec::<usize>::new());
    assert_eq!(outcome.audio, Some(helpers::fake_audio(VOICE, text)));

    let played = player.played.lock().unwrap();
    assert_eq!(played.len(), 1);
    assert_eq!(played[0], helpers::fake_audio(VOICE, text));
}

#[tokio::test]
async fn test_segments_play_in_index_order_and_merge_in_index_order() {
    let (base_url, _state) = helpers::spawn_mock_service().await;
    let player = RecordingPlayer::default();
    // A 20 character bound forces one sentence per segment
    let service = service_with(
        base_url,
        Arc::new(player.clone()),
        20,
        StallPolicy::default(),
    );
    let (_guard, cancel) = no_cancel();

    let text = "One two three. Four five six. Seven eight nine.";
    let segments = ["One two three.", "Four five six.", "Seven eight nine."];

    let outcome = service.convert(text, VOICE, cancel).await.unwrap();

    assert_eq!(outcome.segment_count, 3);

    let expected: Vec<Vec<u8>> = segments
        .iter()
        .map(|segment| helpers::fake_audio(VOICE, segment))
        .collect();
    assert_eq!(*player.played.lock().unwrap(), expected);

    let merged: Vec<u8> = expected.concat();
    assert_eq!(outcome.audio, Some(merged));
}

#[tokio::test]
async fn test_empty_text_is_rejected_before_any_request() {
    let (base_url, state) = helpers::spawn_mock_service().await;
    let player = RecordingPlayer::default();
    let service = service_with(
        base_url,
        Arc::new(player.clone()),
        800,
        StallPolicy::default(),
    );
    let (_guard, cancel) = no_cancel();

    let result = service.convert("   \n ", VOICE, cancel).await;

    assert!(matches!(result, Err(SessionError::Invalid(_))));
    assert!(state.requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_first_segment_failure_aborts_the_session() {
    let (base_url, _state) = helpers::spawn_mock_service().await;
    let player = RecordingPlayer::default();
    let service = service_with(
        base_url,
        Arc::new(player.clone()),
        800,
        StallPolicy::default(),
    );
    let (_guard, cancel) = no_cancel();

    let result = service.convert("FAIL right away.", VOICE, cancel).await;

    assert!(matches!(
        result,
        Err(SessionError::Segment { index: 0, .. })
    ));
    // No playback was attempted and there is no artifact
    assert!(player.played.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_skip_policy_leaves_a_gap_for_a_failed_background_segment() {
    let (base_url, _state) = helpers::spawn_mock_service().await;
    let player = RecordingPlayer::default();
    let service = service_with(base_url, Arc::new(player.clone()), 20, StallPolicy::Skip);
    let (_guard, cancel) = no_cancel();

    let text = "First part one. FAIL middle bit. Last part here.";
    let outcome = service.convert(text, VOICE, cancel).await.unwrap();

    assert_eq!(outcome.segment_count, 3);
    assert_eq!(outcome.failed_segments, vec![1]);

    let expected: Vec<Vec<u8>> = vec![
        helpers::fake_audio(VOICE, "First part one."),
        helpers::fake_audio(VOICE, "Last part here."),
    ];
    assert_eq!(*player.played.lock().unwrap(), expected);
    assert_eq!(outcome.audio, Some(expected.concat()));
}

#[tokio::test]
async fn test_abort_policy_halts_on_a_failed_background_segment() {
    let (base_url, _state) = helpers::spawn_mock_service().await;
    let player = RecordingPlayer::default();
    let service = service_with(base_url, Arc::new(player.clone()), 20, StallPolicy::Abort);
    let (_guard, cancel) = no_cancel();

    let text = "First part one. FAIL middle bit. Last part here.";
    let result = service.convert(text, VOICE, cancel).await;

    assert!(matches!(
        result,
        Err(SessionError::Segment { index: 1, .. })
    ));
}

#[tokio::test]
async fn test_wait_policy_surfaces_the_stall_once_every_fetch_settled() {
    let (base_url, _state) = helpers::spawn_mock_service().await;
    let player = RecordingPlayer::default();
    let service = service_with(base_url, Arc::new(player.clone()), 20, StallPolicy::Wait);
    let (_guard, cancel) = no_cancel();

    let text = "First part one. FAIL middle bit. Last part here.";
    let result = service.convert(text, VOICE, cancel).await;

    match result {
        Err(SessionError::Segment { index, message }) => {
            assert_eq!(index, 1);
            assert!(message.contains("stalled"), "unexpected message: {message}");
        }
        other => panic!("expected a stalled segment error, got {other:?}"),
    }

    // Only the segment before the gap was played
    assert_eq!(player.played.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_playback_failure_fails_the_session() {
    let (base_url, _state) = helpers::spawn_mock_service().await;
    let service = service_with(
        base_url,
        Arc::new(FailingPlayer),
        800,
        StallPolicy::default(),
    );
    let (_guard, cancel) = no_cancel();

    let result = service.convert("Hello there.", VOICE, cancel).await;

    assert!(matches!(result, Err(SessionError::Playback(_))));
}

#[tokio::test]
async fn test_cancellation_tears_the_session_down() {
    let (base_url, _state) = helpers::spawn_mock_service().await;
    let player = RecordingPlayer::default();
    let service = service_with(
        base_url,
        Arc::new(player.clone()),
        800,
        StallPolicy::default(),
    );

    let (cancel_tx, cancel_rx) = watch::channel(false);
    cancel_tx.send(true).unwrap();

    let result = service.convert("Hello there.", VOICE, cancel_rx).await;

    assert!(matches!(result, Err(SessionError::Cancelled)));
    assert!(player.played.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_concurrent_sessions_do_not_interfere() {
    let (base_url, _state) = helpers::spawn_mock_service().await;

    let mut futures = Vec::new();
    for text in ["Alpha one. Alpha two.", "Beta one. Beta two."] {
        let base_url = base_url.clone();
        futures.push(async move {
            let player = RecordingPlayer::default();
            let service = service_with(
                base_url,
                Arc::new(player.clone()),
                800,
                StallPolicy::default(),
            );
            let (_guard, cancel) = no_cancel();
            let outcome = service.convert(text, VOICE, cancel).await.unwrap();
            (text, outcome)
        });
    }

    let results = futures::future::join_all(futures).await;
    for (text, outcome) in results {
        assert_eq!(outcome.audio, Some(helpers::fake_audio(VOICE, text)));
    }
}

#[tokio::test]
async fn test_segment_cache_skips_repeat_synthesis() {
    let (base_url, state) = helpers::spawn_mock_service().await;
    let player = RecordingPlayer::default();
    let tts_api: Arc<dyn TtsApi> = Arc::new(HttpTtsApi::new(base_url));
    let service = ConversionService::new(
        tts_api,
        Arc::new(player.clone()),
        800,
        StallPolicy::default(),
        true,
    );

    let text = "Hello world. This is a test.";
    for _ in 0..2 {
        let (_guard, cancel) = no_cancel();
        let outcome = service.convert(text, VOICE, cancel).await.unwrap();
        assert_eq!(outcome.audio, Some(helpers::fake_audio(VOICE, text)));
    }

    // The second conversion was served from the cache
    assert_eq!(state.requests.lock().unwrap().len(), 1);
}
