//! CLI module for sceneseg.

pub mod commands;
mod output;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Sceneseg - Transcript-to-Scene Segmentation
///
/// Partitions a video's audio track into sentence and gap segments from
/// word-level speech timestamps, optionally aligned against a script.
#[derive(Parser, Debug)]
#[command(name = "sceneseg")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Segment a transcript into sentence and gap segments
    Segment {
        /// Path to word-timestamp JSON (bare array or known container shapes)
        words: String,

        /// Path to an authoritative script text file; when given, script
        /// sentences are aligned against the transcript's timing
        #[arg(short, long)]
        script: Option<String>,

        /// Total media duration in seconds (enables leading/trailing
        /// silence detection)
        #[arg(short, long)]
        duration: Option<f64>,

        /// Write segments to this file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Show or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// Write the default configuration to the config file location
    Init,
}
