//! Per-kind environment gates checked before delegating a locator.
//!
//! | Kind        | Check (in order)                 | On failure                    |
//! |-------------|----------------------------------|-------------------------------|
//! | Music video | debug mode on                    | silent skip, no count         |
//! | Music video | user token missing (<= 50 chars) | skip, counted as success      |
//! | Music video | decrypt tool not on `PATH`       | skip, counted as success      |
//! | Song        | storefront or id empty           | skip with message, no count   |
//! | Station     | user token missing (<= 50 chars) | skip with message, no count   |
//!
//! The first failing check wins; later checks are not evaluated.

use tracing::debug;

use crate::config::RunConfig;
use crate::counters::RunCounters;
use crate::locator::{Kind, Locator};

/// Result of evaluating the gates for one locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gate {
    /// All checks passed; delegate to the collaborator.
    Proceed,
    /// A check failed; do not call the collaborator.
    Skip(Skip),
}

/// How a skipped locator is reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Skip {
    /// No output, no count.
    Silent,
    /// Message printed, counted as one success.
    AsSuccess(String),
    /// Message printed, no count.
    Notice(String),
}

impl Skip {
    /// Message to print, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Silent => None,
            Self::AsSuccess(message) | Self::Notice(message) => Some(message),
        }
    }

    /// Counter contribution of this skip.
    #[must_use]
    pub fn tally(&self) -> RunCounters {
        match self {
            Self::AsSuccess(_) => RunCounters::one_success(),
            Self::Silent | Self::Notice(_) => RunCounters::default(),
        }
    }
}

/// Looks up external tools.
pub trait ToolProbe: Send + Sync {
    /// Returns true when `tool` can be executed from `PATH`.
    fn is_available(&self, tool: &str) -> bool;
}

/// [`ToolProbe`] backed by a real `PATH` search.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathProbe;

impl ToolProbe for PathProbe {
    fn is_available(&self, tool: &str) -> bool {
        which::which(tool).is_ok()
    }
}

/// Evaluates the gates for `locator`.
#[must_use]
pub fn evaluate(
    locator: &Locator,
    config: &RunConfig,
    debug_mode: bool,
    probe: &dyn ToolProbe,
) -> Gate {
    let gate = match locator.kind {
        Kind::MusicVideo => music_video_gate(config, debug_mode, probe),
        Kind::Song if !locator.has_ids() => {
            Gate::Skip(Skip::Notice("Invalid song URL format.".to_string()))
        }
        Kind::Station if !config.has_media_user_token() => Gate::Skip(Skip::Notice(
            ": media-user-token is not set, skip station dl".to_string(),
        )),
        _ => Gate::Proceed,
    };
    debug!(raw = %locator.raw, kind = %locator.kind, ?gate, "evaluated preconditions");
    gate
}

fn music_video_gate(config: &RunConfig, debug_mode: bool, probe: &dyn ToolProbe) -> Gate {
    if debug_mode {
        return Gate::Skip(Skip::Silent);
    }
    if !config.has_media_user_token() {
        return Gate::Skip(Skip::AsSuccess(
            ": media-user-token is not set, skip MV dl".to_string(),
        ));
    }
    if !probe.is_available(&config.decrypt_tool) {
        return Gate::Skip(Skip::AsSuccess(format!(
            ": {} is not found, skip MV dl",
            config.decrypt_tool
        )));
    }
    Gate::Proceed
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::locator::classify;

    struct CountingProbe {
        available: bool,
        calls: AtomicUsize,
    }

    impl CountingProbe {
        fn new(available: bool) -> Self {
            Self {
                available,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl ToolProbe for CountingProbe {
        fn is_available(&self, _tool: &str) -> bool {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.available
        }
    }

    fn config_with_token(len: usize) -> RunConfig {
        RunConfig {
            media_user_token: "t".repeat(len),
            ..RunConfig::default()
        }
    }

    const MV: &str = "https://music.example/us/music-video/clip/1500";

    #[test]
    fn test_music_video_debug_mode_short_circuits() {
        let probe = CountingProbe::new(true);
        let gate = evaluate(&classify(MV), &config_with_token(5), true, &probe);
        assert_eq!(gate, Gate::Skip(Skip::Silent));
        assert_eq!(probe.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_music_video_short_token_counts_success() {
        let probe = CountingProbe::new(true);
        let gate = evaluate(&classify(MV), &config_with_token(10), false, &probe);
        let Gate::Skip(skip) = gate else {
            panic!("expected skip");
        };
        assert_eq!(skip.tally(), RunCounters::one_success());
        assert_eq!(probe.calls.load(Ordering::SeqCst), 0, "tool probe must not run");
    }

    #[test]
    fn test_music_video_token_of_exactly_fifty_is_too_short() {
        let gate = evaluate(
            &classify(MV),
            &config_with_token(50),
            false,
            &CountingProbe::new(true),
        );
        assert!(matches!(gate, Gate::Skip(Skip::AsSuccess(_))));
    }

    #[test]
    fn test_music_video_missing_tool_counts_success() {
        let gate = evaluate(
            &classify(MV),
            &config_with_token(64),
            false,
            &CountingProbe::new(false),
        );
        let Gate::Skip(skip) = gate else {
            panic!("expected skip");
        };
        assert!(skip.message().unwrap_or_default().contains("mp4decrypt"));
        assert_eq!(skip.tally().success, 1);
    }

    #[test]
    fn test_music_video_all_checks_pass() {
        let gate = evaluate(
            &classify(MV),
            &config_with_token(64),
            false,
            &CountingProbe::new(true),
        );
        assert_eq!(gate, Gate::Proceed);
    }

    #[test]
    fn test_song_without_ids_is_notice() {
        let gate = evaluate(
            &classify("https://music.example/song/name/abc"),
            &config_with_token(64),
            false,
            &CountingProbe::new(true),
        );
        let Gate::Skip(skip) = gate else {
            panic!("expected skip");
        };
        assert!(skip.tally().is_empty());
        assert_eq!(skip.message(), Some("Invalid song URL format."));
    }

    #[test]
    fn test_station_short_token_is_notice_without_count() {
        let gate = evaluate(
            &classify("https://music.example/us/station/mix/ra.1"),
            &config_with_token(10),
            false,
            &CountingProbe::new(true),
        );
        let Gate::Skip(skip) = gate else {
            panic!("expected skip");
        };
        assert!(skip.tally().is_empty());
    }

    #[test]
    fn test_album_and_playlist_are_never_gated() {
        let config = config_with_token(0);
        let probe = CountingProbe::new(false);
        for raw in [
            "https://music.example/us/album/x/1",
            "https://music.example/us/playlist/x/pl.1",
        ] {
            assert_eq!(evaluate(&classify(raw), &config, true, &probe), Gate::Proceed);
        }
    }
}
