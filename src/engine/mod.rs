//! Batch engine: precondition checks, dispatch, artist expansion and the
//! whole-batch retry loop.
//!
//! # Architecture
//!
//! - [`precondition`] - per-kind environment gates evaluated before delegation
//! - [`Dispatcher`] - routes one classified locator to the matching [`Acquirer`] call
//! - [`build_batch`] - turns the initial arguments into the batch, expanding artists
//! - [`RetryController`] - runs passes over the batch until one has no errors
//!
//! Processing is strictly sequential: one locator at a time, in batch order,
//! with at most one acquisition call outstanding.
//!
//! [`Acquirer`]: crate::service::Acquirer

mod controller;
mod dispatch;
mod expand;
pub mod precondition;

pub use controller::{
    AutoAbort, AutoConfirm, PassResult, RetryController, RetryDecision, RetryMode, RetryPrompt,
    RunOutcome, RunReport, StdinPrompt,
};
pub use dispatch::{DispatchOutcome, Dispatcher, ItemStatus};
pub use expand::{ExpandError, build_batch, expand_artist};
pub use precondition::{Gate, PathProbe, Skip, ToolProbe};

use crate::config::RunConfig;
use crate::service::{AcquireContext, AcquireOptions};

/// Everything a run needs besides its collaborators.
///
/// Built once after configuration, flags and token are resolved, and passed
/// explicitly to every engine call.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub config: RunConfig,
    /// Resolved bearer token.
    pub token: String,
    pub options: AcquireOptions,
    /// Whether artist listings are picked interactively.
    pub artist_select: bool,
}

impl RunContext {
    /// Creates a context; quality limits in `options` are taken from `config`.
    #[must_use]
    pub fn new(config: RunConfig, token: String, mut options: AcquireOptions) -> Self {
        options.alac_max = config.alac_max;
        options.atmos_max = config.atmos_max;
        options.aac_type.clone_from(&config.aac_type);
        options.mv_audio_type.clone_from(&config.mv_audio_type);
        options.mv_max = config.mv_max;
        Self {
            config,
            token,
            options,
            artist_select: false,
        }
    }

    /// Sets the artist listing behaviour.
    #[must_use]
    pub fn with_artist_select(mut self, artist_select: bool) -> Self {
        self.artist_select = artist_select;
        self
    }

    /// Returns true when debug mode is on.
    #[must_use]
    pub fn debug_mode(&self) -> bool {
        self.options.debug
    }

    /// Borrows the credentials and switches for an acquisition call.
    #[must_use]
    pub fn acquire_context(&self) -> AcquireContext<'_> {
        AcquireContext {
            token: &self.token,
            media_user_token: &self.config.media_user_token,
            options: &self.options,
        }
    }
}
