//! Ripper Core Library
//!
//! This library provides the control plane of the ripper tool, which takes a
//! list of content locators, classifies each one, checks kind-specific
//! preconditions, delegates the actual acquisition to an external service
//! and retries the whole batch until a pass finishes without errors.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`locator`] - Locator classification (kind, storefront, id, track index)
//! - [`engine`] - Preconditions, dispatch, artist expansion and the retry loop
//! - [`service`] - Collaborator traits and their HTTP binding
//! - [`counters`] - Per-pass outcome counters
//! - [`config`] - Run configuration loaded from TOML
//! - [`auth`] - Bearer token resolution
//! - [`input`] - Console line input shared by interactive prompts
//! - [`template`] - Folder templating and filename sanitization
//! - [`output`] - Console lines printed during a run

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod auth;
pub mod config;
pub mod counters;
pub mod engine;
pub mod input;
pub mod locator;
pub mod output;
pub mod service;
pub mod template;

// Re-export commonly used types
pub use auth::{AuthError, resolve_token};
pub use config::{ConfigError, RunConfig};
pub use counters::RunCounters;
pub use engine::{
    Dispatcher, PathProbe, RetryController, RetryMode, RetryPrompt, RunContext, RunOutcome,
    RunReport, build_batch,
};
pub use input::ConsoleInput;
pub use locator::{Kind, Locator, classify};
pub use service::{AcquireOptions, ServiceClient, ServiceError};
