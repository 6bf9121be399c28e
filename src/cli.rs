//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use ripper_core::config::DEFAULT_CONFIG_FILE;
use ripper_core::service::SearchKind;
use ripper_core::{AcquireOptions, RetryMode, RunConfig};

/// Batch rip songs, albums, playlists, stations and music videos.
///
/// Each locator is classified by kind, checked against its preconditions and
/// handed to the acquisition service. If any item fails, the whole batch can
/// be retried.
#[derive(Parser, Debug)]
#[command(name = "ripper")]
#[command(author, version, about)]
pub struct Args {
    /// Locators to process, or the search query when --search is used
    pub urls: Vec<String>,

    /// Search for an album, song or artist and process the chosen result
    #[arg(long, value_enum, value_name = "TYPE")]
    pub search: Option<SearchArg>,

    /// Enable atmos download mode
    #[arg(long)]
    pub atmos: bool,

    /// Enable adm-aac download mode
    #[arg(long)]
    pub aac: bool,

    /// Enable selective download
    #[arg(long)]
    pub select: bool,

    /// Enable single song download mode
    #[arg(long)]
    pub song: bool,

    /// Pick artist albums and videos interactively instead of taking all of them
    ///
    /// Without this flag an artist locator expands to every album and music
    /// video.
    #[arg(long = "all-album")]
    pub artist_select: bool,

    /// Enable debug mode (print stream info, skip music videos)
    #[arg(long)]
    pub debug: bool,

    /// Max quality for ALAC downloads (overrides config)
    #[arg(long, value_name = "INT")]
    pub alac_max: Option<u32>,

    /// Max quality for Atmos downloads (overrides config)
    #[arg(long, value_name = "INT")]
    pub atmos_max: Option<u32>,

    /// AAC type (overrides config)
    #[arg(long, value_name = "STRING")]
    pub aac_type: Option<String>,

    /// Music-video audio type (overrides config)
    #[arg(long, value_name = "STRING")]
    pub mv_audio_type: Option<String>,

    /// Max quality for music videos (overrides config)
    #[arg(long, value_name = "INT")]
    pub mv_max: Option<u32>,

    /// Path to the config file
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Which locators a retry pass covers
    #[arg(long, value_enum, default_value_t = RetryModeArg::All)]
    pub retry_mode: RetryModeArg,

    /// What to do after a pass with errors
    #[arg(long, value_enum, default_value_t = OnErrorArg::Prompt)]
    pub on_error: OnErrorArg,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Search category accepted by `--search`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SearchArg {
    Album,
    Song,
    Artist,
}

impl From<SearchArg> for SearchKind {
    fn from(value: SearchArg) -> Self {
        match value {
            SearchArg::Album => Self::Album,
            SearchArg::Song => Self::Song,
            SearchArg::Artist => Self::Artist,
        }
    }
}

/// `--retry-mode` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RetryModeArg {
    /// Rerun the whole batch
    All,
    /// Rerun only locators that reported errors
    Failed,
}

impl From<RetryModeArg> for RetryMode {
    fn from(value: RetryModeArg) -> Self {
        match value {
            RetryModeArg::All => Self::RerunAll,
            RetryModeArg::Failed => Self::RerunFailed,
        }
    }
}

/// `--on-error` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OnErrorArg {
    /// Wait for Enter before retrying
    Prompt,
    /// Retry immediately
    Retry,
    /// Stop after the first pass with errors
    Abort,
}

impl Args {
    /// Applies quality overrides given on the command line.
    pub fn apply_overrides(&self, config: &mut RunConfig) {
        if let Some(value) = self.alac_max {
            config.alac_max = value;
        }
        if let Some(value) = self.atmos_max {
            config.atmos_max = value;
        }
        if let Some(value) = &self.aac_type {
            config.aac_type.clone_from(value);
        }
        if let Some(value) = &self.mv_audio_type {
            config.mv_audio_type.clone_from(value);
        }
        if let Some(value) = self.mv_max {
            config.mv_max = value;
        }
    }

    /// Mode switches forwarded to the acquisition service.
    #[must_use]
    pub fn acquire_options(&self) -> AcquireOptions {
        AcquireOptions {
            atmos: self.atmos,
            aac: self.aac,
            select: self.select,
            song: self.song,
            debug: self.debug,
            ..AcquireOptions::default()
        }
    }

    /// Default log level from -q/-v.
    #[must_use]
    pub fn default_log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }
}
