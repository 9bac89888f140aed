//! Configuration module for sceneseg.
//!
//! Handles loading and managing the engine's tuning knobs.

mod settings;

pub use settings::{GeneralSettings, SegmentationSettings, Settings};
