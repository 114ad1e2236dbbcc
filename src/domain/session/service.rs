use std::sync::Arc;
use std::time::{Duration, Instant};

use moka::future::Cache;
use tokio::sync::{mpsc, watch};
use uuid::Uuid;

use crate::domain::download;
use crate::domain::text::chunker;
use crate::infrastructure::audio::AudioPlayer;
use crate::infrastructure::tts_api::TtsApi;

use super::buffer::AudioBuffer;
use super::error::SessionError;
use super::sequencer::{
    PlaybackSequencer, SequencerAction, SequencerEvent, SequencerState, StallPolicy,
};

/// Everything produced by one conversion session
#[derive(Debug)]
pub struct ConversionOutcome {
    /// Ordered concatenation of every segment that settled successfully
    pub audio: Option<Vec<u8>>,
    pub segment_count: usize,
    /// Segments whose conversion failed and were left out of the merge
    pub failed_segments: Vec<usize>,
    pub char_count: usize,
}

/// Owned state of one conversion request, constructed fresh per request
/// and dropped when the session ends.
struct ConversionSession {
    id: Uuid,
    segments: Vec<String>,
    buffer: AudioBuffer,
    sequencer: PlaybackSequencer,
}

type SegmentResult = (usize, Result<Vec<u8>, String>);

pub struct ConversionService {
    tts_api: Arc<dyn TtsApi>,
    player: Arc<dyn AudioPlayer>,
    cache: Option<Cache<String, Vec<u8>>>,
    max_segment_chars: usize,
    stall_policy: StallPolicy,
}

impl ConversionService {
    pub fn new(
        tts_api: Arc<dyn TtsApi>,
        player: Arc<dyn AudioPlayer>,
        max_segment_chars: usize,
        stall_policy: StallPolicy,
        cache_enabled: bool,
    ) -> Self {
        // Repeated conversions of the same material skip the network
        let cache = if cache_enabled {
            Some(
                Cache::builder()
                    .max_capacity(100)
                    .time_to_idle(Duration::from_secs(30 * 60)) // refreshes on access
                    .build(),
            )
        } else {
            None
        };

        Self {
            tts_api,
            player,
            cache,
            max_segment_chars,
            stall_policy,
        }
    }

    /// Convert `text` with `voice` and play the result
    ///
    /// This operation:
    /// - Splits the text into sentence-bounded segments
    /// - Awaits the first segment's conversion so playback starts fast;
    ///   its failure aborts the whole session
    /// - Fetches the remaining segments concurrently in the background
    /// - Plays segments strictly in index order as their audio arrives
    /// - Once everything settled, merges the audio in index order
    ///
    /// Flipping `cancel` (or dropping its sender) tears the session down,
    /// including every in-flight background fetch.
    pub async fn convert(
        &self,
        text: &str,
        voice: &str,
        mut cancel: watch::Receiver<bool>,
    ) -> Result<ConversionOutcome, SessionError> {
        let started = Instant::now();

        let cleaned = text.trim();
        if cleaned.is_empty() {
            return Err(SessionError::Invalid("text cannot be empty".to_string()));
        }

        let segments = chunker::split_into_segments(cleaned, self.max_segment_chars);
        let mut session = ConversionSession {
            id: Uuid::new_v4(),
            buffer: AudioBuffer::new(segments.len()),
            sequencer: PlaybackSequencer::new(segments.len(), self.stall_policy),
            segments,
        };

        tracing::info!(
            session_id = %session.id,
            voice,
            char_count = cleaned.chars().count(),
            segment_count = session.buffer.len(),
            "Conversion session started"
        );

        let first = tokio::select! {
            _ = cancel.changed() => return Err(SessionError::Cancelled),
            result = Self::fetch_segment(
                self.tts_api.clone(),
                self.cache.clone(),
                session.segments[0].clone(),
                voice.to_string(),
                0,
            ) => result.map_err(|message| SessionError::Segment { index: 0, message })?,
        };
        session.buffer.fill(0, first);

        // Remaining segments are fetched concurrently; completions arrive on
        // the event channel in whatever order the service answers
        let (event_tx, mut event_rx) = mpsc::unbounded_channel::<SegmentResult>();
        for (index, segment) in session.segments.iter().enumerate().skip(1) {
            let event_tx = event_tx.clone();
            let mut cancel = cancel.clone();
            let tts_api = self.tts_api.clone();
            let cache = self.cache.clone();
            let segment = segment.clone();
            let voice = voice.to_string();

            tokio::spawn(async move {
                tokio::select! {
                    _ = cancel.changed() => {
                        tracing::debug!(segment = index, "Segment fetch cancelled");
                    }
                    result = Self::fetch_segment(tts_api, cache, segment, voice, index) => {
                        // The session may already be gone; nothing to do then
                        let _ = event_tx.send((index, result));
                    }
                }
            });
        }
        // The playback loop detects "every fetch settled" by the channel closing
        drop(event_tx);

        self.drive_playback(&mut session, &mut event_rx, &mut cancel)
            .await?;

        let failed_segments = session.buffer.failed_indices();
        let audio = download::assemble(&session.buffer);

        tracing::info!(
            session_id = %session.id,
            segment_count = session.buffer.len(),
            failed_count = failed_segments.len(),
            merged_size = audio.as_ref().map(|a| a.len()).unwrap_or(0),
            latency_ms = started.elapsed().as_millis(),
            "Conversion session complete"
        );

        Ok(ConversionOutcome {
            audio,
            segment_count: session.buffer.len(),
            failed_segments,
            char_count: cleaned.chars().count(),
        })
    }

    /// Drive the sequencer with discrete events (segment ready, segment
    /// failed, playback ended) until it finishes or halts
    async fn drive_playback(
        &self,
        session: &mut ConversionSession,
        event_rx: &mut mpsc::UnboundedReceiver<SegmentResult>,
        cancel: &mut watch::Receiver<bool>,
    ) -> Result<(), SessionError> {
        let mut action = session.sequencer.handle(SequencerEvent::SegmentReady(0));

        loop {
            match action {
                SequencerAction::Play(index) => {
                    let Some(audio) = session.buffer.audio(index) else {
                        return Err(SessionError::Dependency(format!(
                            "segment {index} scheduled without audio"
                        )));
                    };

                    tracing::info!(
                        session_id = %session.id,
                        segment = index,
                        audio_size = audio.len(),
                        "Playing segment"
                    );

                    tokio::select! {
                        _ = cancel.changed() => return Err(SessionError::Cancelled),
                        result = self.player.play(audio) => {
                            result.map_err(SessionError::Playback)?;
                        }
                    }

                    action = session.sequencer.handle(SequencerEvent::PlaybackEnded);
                }
                SequencerAction::Wait => {
                    tokio::select! {
                        _ = cancel.changed() => return Err(SessionError::Cancelled),
                        settled = event_rx.recv() => match settled {
                            Some((index, Ok(audio))) => {
                                session.buffer.fill(index, audio);
                                action = session
                                    .sequencer
                                    .handle(SequencerEvent::SegmentReady(index));
                            }
                            Some((index, Err(message))) => {
                                tracing::warn!(
                                    session_id = %session.id,
                                    segment = index,
                                    error = %message,
                                    "Background segment conversion failed"
                                );
                                session.buffer.fail(index);
                                action = session
                                    .sequencer
                                    .handle(SequencerEvent::SegmentFailed(index));
                            }
                            // Every fetch settled; a slot the sequencer still
                            // needs will never arrive
                            None => {
                                if let SequencerState::Buffering(index) = session.sequencer.state() {
                                    return Err(SessionError::Segment {
                                        index,
                                        message: "segment unavailable, sequencing stalled"
                                            .to_string(),
                                    });
                                }
                                return Ok(());
                            }
                        },
                    }
                }
                SequencerAction::Finish => return Ok(()),
                SequencerAction::Abort(index) => {
                    return Err(SessionError::Segment {
                        index,
                        message: "segment conversion failed".to_string(),
                    });
                }
            }
        }
    }

    /// Synthesize one segment, consulting the per-process cache first
    async fn fetch_segment(
        tts_api: Arc<dyn TtsApi>,
        cache: Option<Cache<String, Vec<u8>>>,
        text: String,
        voice: String,
        index: usize,
    ) -> Result<Vec<u8>, String> {
        let started = Instant::now();
        let cache_key = format!("{voice}:{text}");

        if let Some(cache) = &cache {
            if let Some(audio) = cache.get(&cache_key).await {
                tracing::info!(
                    segment = index,
                    audio_size = audio.len(),
                    "Segment cache hit"
                );
                return Ok(audio);
            }
        }

        let audio = tts_api.synthesize(&text, &voice).await?;

        if let Some(cache) = &cache {
            cache.insert(cache_key, audio.clone()).await;
        }

        tracing::info!(
            segment = index,
            segment_chars = text.chars().count(),
            audio_size = audio.len(),
            latency_ms = started.elapsed().as_millis(),
            "Segment synthesized"
        );

        Ok(audio)
    }
}
