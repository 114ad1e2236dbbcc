use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::sync::watch;

use crate::domain::download;
use crate::domain::session::ConversionService;
use crate::domain::text::cleaner;
use crate::domain::voice::{Voice, VoiceCatalog};
use crate::error::{AppError, AppResult};
use crate::infrastructure::audio::AudioPlayer;
use crate::infrastructure::config::Config;
use crate::infrastructure::tts_api::TtsApi;

#[derive(Parser, Debug)]
#[command(name = "readaloud")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Convert text to speech through a TTS web service and play it back")]
pub struct Args {
    /// Text to convert. Read from --file or stdin when omitted.
    pub text: Option<String>,

    /// Read input from a file (.txt, .md, .html or .pdf)
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Voice short name (defaults to the first catalog entry)
    #[arg(long)]
    pub voice: Option<String>,

    /// List the available voices and exit
    #[arg(long)]
    pub list_voices: bool,

    /// Where to write the merged audio
    #[arg(long, default_value = "speech.mp3", value_name = "PATH")]
    pub output: PathBuf,

    /// Convert and save without playing
    #[arg(long)]
    pub no_play: bool,

    /// Maximum characters per conversion segment
    #[arg(long, value_name = "CHARS")]
    pub max_chars: Option<usize>,
}

/// Wire user input to the catalog, the conversion service and the output
/// file, reporting status along the way
pub async fn run(
    args: Args,
    config: &Config,
    tts_api: Arc<dyn TtsApi>,
    player: Arc<dyn AudioPlayer>,
) -> AppResult<()> {
    let catalog = VoiceCatalog::new(tts_api.clone());
    let voices = catalog.load().await?;

    if args.list_voices {
        print_voices(&voices);
        return Ok(());
    }

    let requested = args.voice.as_deref().or(config.voice.as_deref());
    let voice = VoiceCatalog::resolve(&voices, requested)?.clone();

    let text = read_input(&args)?;
    if text.trim().is_empty() {
        return Err(AppError::BadRequest("text cannot be empty".to_string()));
    }

    let service = ConversionService::new(
        tts_api,
        player,
        args.max_chars.unwrap_or(config.max_segment_chars),
        config.stall_policy,
        config.cache_enabled,
    );

    // Ctrl-C tears the session down; every in-flight fetch observes the
    // signal. The sender lives in the signal task so it stays alive for the
    // whole session.
    let (cancel_tx, cancel_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = cancel_tx.send(true);
        }
    });

    println!("Converting with {}...", voice);
    let outcome = service
        .convert(&text, &voice.short_name, cancel_rx)
        .await?;

    match outcome.audio {
        Some(audio) => {
            download::write_artifact(&args.output, &audio)?;
            println!(
                "Done: {} segment(s), {} characters, saved to {}",
                outcome.segment_count,
                outcome.char_count,
                args.output.display()
            );
            if !outcome.failed_segments.is_empty() {
                println!(
                    "Warning: segment(s) {:?} failed and were left out of the merged audio",
                    outcome.failed_segments
                );
            }
        }
        None => println!("No merged audio produced"),
    }

    Ok(())
}

/// Positional text wins, then --file (with format-aware extraction), then
/// whatever arrives on stdin
fn read_input(args: &Args) -> AppResult<String> {
    if let Some(text) = &args.text {
        return Ok(text.clone());
    }
    if let Some(path) = &args.file {
        return cleaner::extract_text(path);
    }

    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}

fn print_voices(voices: &[Voice]) {
    println!("Available voices:");
    for voice in voices {
        println!("  {:<28} {}", voice.short_name, voice.friendly_name);
    }
}
