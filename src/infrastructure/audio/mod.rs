use std::io::Cursor;

use async_trait::async_trait;

/// Plays one audio segment to completion
#[async_trait]
pub trait AudioPlayer: Send + Sync {
    /// Play the full payload, returning once playback ends naturally
    async fn play(&self, audio: &[u8]) -> Result<(), String>;
}

/// Playback through the default output device via rodio
pub struct RodioPlayer;

#[async_trait]
impl AudioPlayer for RodioPlayer {
    async fn play(&self, audio: &[u8]) -> Result<(), String> {
        let payload = audio.to_vec();

        // The output stream handle is not Send, so the whole sink lives on a
        // blocking thread for the duration of the segment
        tokio::task::spawn_blocking(move || {
            let (_stream, handle) = rodio::OutputStream::try_default()
                .map_err(|e| format!("no audio output device: {e}"))?;
            let sink = rodio::Sink::try_new(&handle)
                .map_err(|e| format!("failed to open audio sink: {e}"))?;
            let source = rodio::Decoder::new(Cursor::new(payload))
                .map_err(|e| format!("failed to decode audio: {e}"))?;

            sink.append(source);
            sink.sleep_until_end();
            Ok(())
        })
        .await
        .map_err(|e| format!("playback task failed: {e}"))?
    }
}

/// Discards audio instantly. Used for --no-play.
pub struct NullPlayer;

#[async_trait]
impl AudioPlayer for NullPlayer {
    async fn play(&self, _audio: &[u8]) -> Result<(), String> {
        Ok(())
    }
}
