//! CLI interface for Synesthesia

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Spatial audio sonification of depth camera frames
#[derive(Parser)]
#[command(name = "synesthesia")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log debug diagnostics (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sonify a stream of depth frames
    Run {
        /// Configuration file path
        #[arg(short, long, default_value = "synesthesia.yaml")]
        config: PathBuf,

        /// Directory of recorded depth images (synthetic scene if omitted)
        #[arg(short, long)]
        frames: Option<PathBuf>,

        /// Replay the recorded frames forever
        #[arg(long = "loop")]
        repeat: bool,

        /// Write region updates to stdout as JSON lines
        #[arg(long)]
        json: bool,

        /// Stop after this many frames have been submitted
        #[arg(long)]
        max_frames: Option<u64>,
    },

    /// Validate a configuration file
    Check {
        /// Configuration file path
        #[arg(short, long, default_value = "synesthesia.yaml")]
        config: PathBuf,
    },

    /// Show where each region's source sits at the reference distance
    Tones {
        /// Configuration file path
        #[arg(short, long, default_value = "synesthesia.yaml")]
        config: PathBuf,
    },

    /// Generate an example configuration file
    Init,
}
