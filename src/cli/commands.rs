//! Command implementations for the sceneseg CLI.

use super::{ConfigAction, Output};
use crate::config::Settings;
use crate::engine::{JsonFileSink, SegmentationEngine, SegmentSink};
use crate::error::Result;
use crate::segmentation::SegmentKind;
use crate::transcript::parse_words;
use tracing::info;

/// Run the `segment` command: read word timestamps (and optionally a
/// script), segment, and write the result.
pub fn run_segment(
    words_path: &str,
    script_path: Option<&str>,
    duration: Option<f64>,
    output_path: Option<&str>,
    settings: &Settings,
) -> Result<()> {
    let raw = std::fs::read_to_string(words_path)?;
    let value: serde_json::Value = serde_json::from_str(&raw)?;
    let words = match parse_words(&value) {
        Ok(words) => words,
        Err(e) => {
            Output::error(&format!("Failed to read word timestamps: {}", e));
            return Err(e);
        }
    };
    info!("loaded {} word timestamps from {}", words.len(), words_path);
    Output::info(&format!("Loaded {} word timestamps", words.len()));
    if words.is_empty() {
        Output::warning("Transcript contains no word timestamps.");
    }

    let engine = SegmentationEngine::new(settings.segmentation.clone());

    let segments = match script_path {
        Some(path) => {
            let script = std::fs::read_to_string(path)?;
            engine.segment_from_script_and_transcript(&script, &words, duration)?
        }
        None => engine.segment_from_transcript(&words, duration)?,
    };

    let sentence_count = segments
        .iter()
        .filter(|s| s.kind == SegmentKind::Sentence)
        .count();
    Output::success(&format!(
        "{} segments ({} sentences, {} gaps)",
        segments.len(),
        sentence_count,
        segments.len() - sentence_count
    ));

    match output_path {
        Some(path) => {
            let mut sink = JsonFileSink::new(path);
            sink.persist(&segments)?;
            Output::kv("output", path);
        }
        None => {
            println!("{}", serde_json::to_string_pretty(&segments)?);
        }
    }

    Ok(())
}

/// Run the `config` command.
pub fn run_config(action: &ConfigAction, settings: &Settings) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let toml = toml::to_string_pretty(settings)
                .map_err(|e| crate::error::SegmentationError::Config(e.to_string()))?;
            println!("{}", toml);
        }
        ConfigAction::Init => {
            let path = Settings::default_config_path();
            Settings::default().save_to(&path)?;
            Output::success(&format!("wrote default config to {}", path.display()));
        }
    }
    Ok(())
}
