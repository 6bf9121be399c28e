//! Routes a classified locator to its acquisition operation.

use tracing::{debug, warn};

use super::RunContext;
use super::precondition::{self, Gate, ToolProbe};
use crate::counters::RunCounters;
use crate::locator::{Kind, Locator};
use crate::output;
use crate::service::{Acquirer, ItemRequest, ServiceError};

/// What happened to one locator in a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemStatus {
    /// The collaborator was called and returned normally.
    Delegated,
    /// A precondition failed; the collaborator was not called.
    Skipped,
    /// The collaborator reported an error.
    Failed,
    /// The locator could not be classified or parsed.
    Invalid,
}

/// Structured result of dispatching one locator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub kind: Kind,
    pub status: ItemStatus,
    /// Counter contribution folded into the pass total.
    pub tally: RunCounters,
}

impl DispatchOutcome {
    fn new(kind: Kind, status: ItemStatus, tally: RunCounters) -> Self {
        Self {
            kind,
            status,
            tally,
        }
    }

    /// Returns true when this item contributed a hard failure.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.tally.error > 0
    }
}

/// Dispatches locators to an [`Acquirer`].
pub struct Dispatcher<'a> {
    acquirer: &'a dyn Acquirer,
    probe: &'a dyn ToolProbe,
}

impl<'a> Dispatcher<'a> {
    #[must_use]
    pub fn new(acquirer: &'a dyn Acquirer, probe: &'a dyn ToolProbe) -> Self {
        Self { acquirer, probe }
    }

    /// Checks preconditions for `locator` and, if they pass, performs the
    /// matching acquisition call.
    ///
    /// Never fails: collaborator errors are printed and turned into an error
    /// tally.
    pub async fn dispatch(&self, locator: &Locator, ctx: &RunContext) -> DispatchOutcome {
        output::print_kind(locator.kind);

        if let Some(outcome) = invalid_outcome(locator) {
            return outcome;
        }

        match precondition::evaluate(locator, &ctx.config, ctx.debug_mode(), self.probe) {
            Gate::Proceed => {}
            Gate::Skip(skip) => {
                if let Some(message) = skip.message() {
                    output::print_notice(message);
                }
                return DispatchOutcome::new(locator.kind, ItemStatus::Skipped, skip.tally());
            }
        }

        let item = ItemRequest::new(&locator.storefront, &locator.id)
            .with_track_index(locator.track_index.clone());
        let acquire = ctx.acquire_context();
        debug!(
            raw = %locator.raw,
            kind = %locator.kind,
            storefront = %item.storefront,
            id = %item.id,
            "dispatching"
        );

        if locator.kind == Kind::MusicVideo {
            let save_dir = ctx.config.music_video_dir();
            return match self
                .acquirer
                .download_music_video(&item, &save_dir, acquire)
                .await
            {
                Ok(()) => DispatchOutcome::new(
                    Kind::MusicVideo,
                    ItemStatus::Delegated,
                    RunCounters::one_success(),
                ),
                Err(error) => {
                    output::print_notice(&format!("\u{26A0} Failed to dl MV: {error}"));
                    failed(Kind::MusicVideo, &error)
                }
            };
        }

        let (result, label) = match locator.kind {
            Kind::Song => (self.acquirer.rip_song(&item, acquire).await, "song"),
            Kind::Album => (self.acquirer.rip_album(&item, acquire).await, "album"),
            Kind::Playlist => (self.acquirer.rip_playlist(&item, acquire).await, "playlist"),
            Kind::Station => (self.acquirer.rip_station(&item, acquire).await, "station"),
            Kind::MusicVideo | Kind::Artist | Kind::Invalid => {
                return DispatchOutcome::new(
                    locator.kind,
                    ItemStatus::Invalid,
                    RunCounters::default(),
                );
            }
        };

        match result {
            Ok(tally) => DispatchOutcome::new(locator.kind, ItemStatus::Delegated, tally),
            Err(error) => {
                output::print_notice(&format!("Failed to rip {label}: {error}"));
                failed(locator.kind, &error)
            }
        }
    }
}

fn invalid_outcome(locator: &Locator) -> Option<DispatchOutcome> {
    let invalid = DispatchOutcome::new(locator.kind, ItemStatus::Invalid, RunCounters::default());
    match locator.kind {
        Kind::Album | Kind::Playlist | Kind::Station | Kind::Invalid | Kind::Artist
            if locator.url_error.is_some() =>
        {
            let reason = locator.url_error.as_deref().unwrap_or_default();
            output::print_notice(&format!("Invalid URL: {reason}"));
            Some(invalid)
        }
        Kind::Invalid | Kind::Artist => {
            output::print_notice("Invalid type");
            Some(invalid)
        }
        _ => None,
    }
}

fn failed(kind: Kind, error: &ServiceError) -> DispatchOutcome {
    warn!(%kind, error = %error, "acquisition failed");
    DispatchOutcome::new(kind, ItemStatus::Failed, RunCounters::one_error())
}
