//! Configuration settings for sceneseg.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub segmentation: SegmentationSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Knobs for the segmentation and alignment pipeline.
///
/// The abbreviation and suffix lists are configuration data, not business
/// logic: they are hand-curated and deliberately not inferred from input.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentationSettings {
    /// Lower-cased, dot-free abbreviations that never end a sentence
    /// (titles, units, common latinisms).
    pub abbreviations: Vec<String>,
    /// Short continuation tokens merged onto a preceding dotted word
    /// (file/technology extensions). A 1-3 digit number is always accepted
    /// as a continuation regardless of this list.
    pub dotted_suffixes: Vec<String>,
    /// How many transcript words ahead of the cursor the aligner searches.
    pub alignment_window_words: usize,
    /// Minimum match score (0.0-1.0) for a windowed alignment to be accepted.
    pub alignment_score_threshold: f64,
    /// Per-word duration in seconds used when timing must be extrapolated
    /// and the transcript provides no average.
    pub default_word_duration_seconds: f64,
    /// Gaps longer than this (seconds) donate a fixed edge to each sentence
    /// neighbor during reconciliation.
    pub large_gap_seconds: f64,
    /// Gaps at or below this (seconds) are absorbed into the preceding
    /// sentence during reconciliation.
    pub small_gap_seconds: f64,
    /// Fixed amount (seconds) shifted from a large gap into each adjacent
    /// sentence.
    pub edge_shift_seconds: f64,
    /// Maximum trailing padding (seconds) a sentence absorbs from its
    /// following gap on the script-alignment path.
    pub gap_absorption_seconds: f64,
}

impl Default for SegmentationSettings {
    fn default() -> Self {
        Self {
            abbreviations: [
                "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "etc",
                "inc", "ltd", "co", "corp", "no", "fig", "eg", "ie", "al",
                "approx", "dept", "est", "min", "max", "sec", "ft", "oz", "lb",
                "km", "cm", "mm", "kg",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            dotted_suffixes: [
                "js", "ts", "py", "rs", "go", "md", "txt", "com", "org", "net",
                "io", "ai", "dev", "exe", "zip", "json", "html", "css", "csv",
                "xml", "pdf", "app",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            alignment_window_words: 200,
            alignment_score_threshold: 0.55,
            default_word_duration_seconds: 0.3,
            large_gap_seconds: 0.2,
            small_gap_seconds: 0.2,
            edge_shift_seconds: 0.1,
            gap_absorption_seconds: 1.0,
        }
    }
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to the default configuration file.
    pub fn save(&self) -> crate::error::Result<()> {
        self.save_to(&Self::default_config_path())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::SegmentationError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sceneseg")
            .join("config.toml")
    }
}
