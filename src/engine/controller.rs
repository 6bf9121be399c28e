//! Whole-batch retry loop.
//!
//! The controller runs one pass over the batch, prints a summary and stops
//! when the pass had no errors. Otherwise it waits on a [`RetryPrompt`] and
//! starts a new pass with zeroed counters. With [`RetryMode::RerunAll`] the
//! new pass covers the same, unfiltered batch, including locators that
//! already succeeded. There is no retry limit.

use async_trait::async_trait;
use tokio::io::{AsyncRead, Stdin};
use tracing::{debug, info, warn};

use super::RunContext;
use super::dispatch::{DispatchOutcome, Dispatcher};
use crate::counters::RunCounters;
use crate::input::ConsoleInput;
use crate::locator::classify;
use crate::output;

/// Which locators a retry pass covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RetryMode {
    /// Rerun every locator of the batch.
    #[default]
    RerunAll,
    /// Rerun only locators whose previous outcome had errors.
    RerunFailed,
}

/// Answer from a [`RetryPrompt`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    Retry,
    Abort,
}

/// Suspension point between a failed pass and the next one.
#[async_trait]
pub trait RetryPrompt: Send {
    /// Decides whether to run another pass after `counters` reported errors.
    async fn confirm(&mut self, counters: &RunCounters) -> RetryDecision;
}

/// Waits for a line of console input. Any line, including an empty one,
/// retries; end of input aborts.
pub struct StdinPrompt<'a, R = Stdin> {
    input: &'a ConsoleInput<R>,
}

impl<'a, R> StdinPrompt<'a, R> {
    #[must_use]
    pub fn new(input: &'a ConsoleInput<R>) -> Self {
        Self { input }
    }
}

#[async_trait]
impl<R: AsyncRead + Unpin + Send> RetryPrompt for StdinPrompt<'_, R> {
    async fn confirm(&mut self, _counters: &RunCounters) -> RetryDecision {
        output::print_notice("Error detected, press Enter to try again...");
        match self.input.next_line().await {
            Ok(Some(_)) => RetryDecision::Retry,
            Ok(None) => {
                warn!("stdin closed while waiting for retry confirmation");
                RetryDecision::Abort
            }
            Err(error) => {
                warn!(error = %error, "failed to read retry confirmation");
                RetryDecision::Abort
            }
        }
    }
}

/// Headless prompt that always retries.
#[derive(Debug, Default)]
pub struct AutoConfirm;

#[async_trait]
impl RetryPrompt for AutoConfirm {
    async fn confirm(&mut self, _counters: &RunCounters) -> RetryDecision {
        output::print_notice("Error detected, retrying...");
        RetryDecision::Retry
    }
}

/// Headless prompt that never retries.
#[derive(Debug, Default)]
pub struct AutoAbort;

#[async_trait]
impl RetryPrompt for AutoAbort {
    async fn confirm(&mut self, _counters: &RunCounters) -> RetryDecision {
        output::print_notice("Error detected, not retrying.");
        RetryDecision::Abort
    }
}

/// Counters and per-item outcomes of one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassResult {
    pub counters: RunCounters,
    /// One entry per locator, in batch order.
    pub outcomes: Vec<(String, DispatchOutcome)>,
}

impl PassResult {
    /// Locators whose outcome had errors, in batch order.
    #[must_use]
    pub fn failed_locators(&self) -> Vec<String> {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| outcome.has_errors())
            .map(|(raw, _)| raw.clone())
            .collect()
    }
}

/// How the run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The last pass had no errors.
    Clean,
    /// The prompt declined a retry.
    Aborted,
}

/// Final state of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Number of passes executed (at least 1).
    pub passes: u32,
    /// Counters of the last pass.
    pub counters: RunCounters,
    pub outcome: RunOutcome,
}

/// Owns the pass loop.
pub struct RetryController<'a> {
    dispatcher: Dispatcher<'a>,
    mode: RetryMode,
}

impl<'a> RetryController<'a> {
    #[must_use]
    pub fn new(dispatcher: Dispatcher<'a>, mode: RetryMode) -> Self {
        Self { dispatcher, mode }
    }

    /// Runs one pass over `batch`, in order, with fresh counters.
    pub async fn run_pass(&self, batch: &[String], ctx: &RunContext) -> PassResult {
        let mut pass = PassResult::default();
        let total = batch.len();
        for (index, raw) in batch.iter().enumerate() {
            output::print_queue_position(index + 1, total);
            let locator = classify(raw);
            let outcome = self.dispatcher.dispatch(&locator, ctx).await;
            debug!(position = index + 1, total, ?outcome, "item done");
            pass.counters += outcome.tally;
            pass.outcomes.push((raw.clone(), outcome));
        }
        pass
    }

    /// Runs passes until one has no errors or `prompt` aborts.
    pub async fn run(
        &self,
        batch: &[String],
        ctx: &RunContext,
        prompt: &mut dyn RetryPrompt,
    ) -> RunReport {
        let mut current: Vec<String> = batch.to_vec();
        let mut passes = 0_u32;
        loop {
            passes = passes.saturating_add(1);
            let pass = self.run_pass(&current, ctx).await;
            output::print_summary(&pass.counters);
            info!(
                pass = passes,
                completed = pass.counters.success,
                warnings = pass.counters.warnings(),
                errors = pass.counters.error,
                "Pass complete"
            );

            if pass.counters.is_clean() {
                return RunReport {
                    passes,
                    counters: pass.counters,
                    outcome: RunOutcome::Clean,
                };
            }

            if prompt.confirm(&pass.counters).await == RetryDecision::Abort {
                return RunReport {
                    passes,
                    counters: pass.counters,
                    outcome: RunOutcome::Aborted,
                };
            }

            output::print_notice("Start trying again...");
            if self.mode == RetryMode::RerunFailed {
                current = pass.failed_locators();
            }
        }
    }
}
