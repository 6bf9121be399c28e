//! Shared fakes for engine integration tests.
//!
//! The fakes record every collaborator call so tests can assert on order and
//! count, and replay scripted results per catalog id.

#![allow(dead_code)]

pub mod socket_guard;

use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use ripper_core::engine::{RetryDecision, RetryPrompt, ToolProbe};
use ripper_core::service::{
    AcquireContext, Acquirer, ArtistCatalog, ArtistProfile, ArtistRelation, CatalogEntry,
    ItemRequest, ListingMode, ServiceError,
};
use ripper_core::{AcquireOptions, RunConfig, RunContext, RunCounters};

/// A user token long enough to pass every token gate.
pub const LONG_TOKEN: &str = "0123456789012345678901234567890123456789012345678901234567890123";

/// One recorded acquisition call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub operation: &'static str,
    pub storefront: String,
    pub id: String,
    pub track_index: Option<String>,
    pub save_dir: Option<PathBuf>,
}

/// Scripted [`Acquirer`].
///
/// Results are queued per id; once a queue is empty every call for that id
/// succeeds with a one-item tally.
#[derive(Default)]
pub struct FakeAcquirer {
    calls: Mutex<Vec<Call>>,
    script: Mutex<HashMap<String, VecDeque<Result<RunCounters, String>>>>,
}

impl FakeAcquirer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a failure for the next call with `id`.
    pub fn fail_next(&self, id: &str, reason: &str) {
        self.push(id, Err(reason.to_string()));
    }

    /// Queues a specific tally for the next call with `id`.
    pub fn tally_next(&self, id: &str, tally: RunCounters) {
        self.push(id, Ok(tally));
    }

    fn push(&self, id: &str, result: Result<RunCounters, String>) {
        self.script
            .lock()
            .unwrap()
            .entry(id.to_string())
            .or_default()
            .push_back(result);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Ids of all recorded calls, in call order.
    pub fn ids(&self) -> Vec<String> {
        self.calls().into_iter().map(|call| call.id).collect()
    }

    fn record(
        &self,
        operation: &'static str,
        item: &ItemRequest,
        save_dir: Option<&Path>,
    ) -> Result<RunCounters, ServiceError> {
        self.calls.lock().unwrap().push(Call {
            operation,
            storefront: item.storefront.clone(),
            id: item.id.clone(),
            track_index: item.track_index.clone(),
            save_dir: save_dir.map(Path::to_path_buf),
        });
        let next = self
            .script
            .lock()
            .unwrap()
            .get_mut(&item.id)
            .and_then(VecDeque::pop_front);
        match next {
            Some(Ok(tally)) => Ok(tally),
            Some(Err(reason)) => Err(ServiceError::failed(operation, &reason)),
            None => Ok(RunCounters::one_success()),
        }
    }
}

#[async_trait]
impl Acquirer for FakeAcquirer {
    async fn rip_song(
        &self,
        item: &ItemRequest,
        _ctx: AcquireContext<'_>,
    ) -> Result<RunCounters, ServiceError> {
        self.record("song", item, None)
    }

    async fn rip_album(
        &self,
        item: &ItemRequest,
        _ctx: AcquireContext<'_>,
    ) -> Result<RunCounters, ServiceError> {
        self.record("album", item, None)
    }

    async fn rip_playlist(
        &self,
        item: &ItemRequest,
        _ctx: AcquireContext<'_>,
    ) -> Result<RunCounters, ServiceError> {
        self.record("playlist", item, None)
    }

    async fn rip_station(
        &self,
        item: &ItemRequest,
        _ctx: AcquireContext<'_>,
    ) -> Result<RunCounters, ServiceError> {
        self.record("station", item, None)
    }

    async fn download_music_video(
        &self,
        item: &ItemRequest,
        save_dir: &Path,
        _ctx: AcquireContext<'_>,
    ) -> Result<(), ServiceError> {
        self.record("music-video", item, Some(save_dir)).map(|_| ())
    }
}

/// Tool probe with a fixed answer.
pub struct FixedProbe(pub bool);

impl ToolProbe for FixedProbe {
    fn is_available(&self, _tool: &str) -> bool {
        self.0
    }
}

/// Retry prompt that answers from a script and counts how often it was asked.
pub struct ScriptedPrompt {
    answers: VecDeque<RetryDecision>,
    pub asked: usize,
}

impl ScriptedPrompt {
    pub fn new(answers: impl IntoIterator<Item = RetryDecision>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            asked: 0,
        }
    }
}

#[async_trait]
impl RetryPrompt for ScriptedPrompt {
    async fn confirm(&mut self, _counters: &RunCounters) -> RetryDecision {
        self.asked += 1;
        self.answers.pop_front().unwrap_or(RetryDecision::Abort)
    }
}

/// In-memory [`ArtistCatalog`].
pub struct FakeCatalog {
    pub profile: Result<ArtistProfile, String>,
    pub albums: Result<Vec<String>, String>,
    pub music_videos: Result<Vec<String>, String>,
    pub requests: Mutex<Vec<(ArtistRelation, ListingMode)>>,
}

impl FakeCatalog {
    pub fn new(albums: &[&str], music_videos: &[&str]) -> Self {
        Self {
            profile: Ok(ArtistProfile {
                name: "Test Artist".to_string(),
                id: "777".to_string(),
            }),
            albums: Ok(albums.iter().map(|url| (*url).to_string()).collect()),
            music_videos: Ok(music_videos.iter().map(|url| (*url).to_string()).collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<(ArtistRelation, ListingMode)> {
        self.requests.lock().unwrap().clone()
    }
}

fn entries(urls: &[String]) -> Vec<CatalogEntry> {
    urls.iter()
        .map(|url| CatalogEntry {
            title: url.clone(),
            subtitle: String::new(),
            url: url.clone(),
        })
        .collect()
}

#[async_trait]
impl ArtistCatalog for FakeCatalog {
    async fn artist_profile(
        &self,
        _locator: &str,
        _token: &str,
    ) -> Result<ArtistProfile, ServiceError> {
        self.profile
            .clone()
            .map_err(|reason| ServiceError::failed("artist profile", &reason))
    }

    async fn list(
        &self,
        _locator: &str,
        _token: &str,
        relation: ArtistRelation,
        mode: ListingMode,
    ) -> Result<Vec<CatalogEntry>, ServiceError> {
        self.requests.lock().unwrap().push((relation, mode));
        let listing = match relation {
            ArtistRelation::Albums => &self.albums,
            ArtistRelation::MusicVideos => &self.music_videos,
        };
        listing
            .as_deref()
            .map(entries)
            .map_err(|reason| ServiceError::failed("artist listing", reason))
    }
}

/// Run context with a valid user token and default options.
pub fn context() -> RunContext {
    context_with(RunConfig {
        media_user_token: LONG_TOKEN.to_string(),
        ..RunConfig::default()
    })
}

pub fn context_with(config: RunConfig) -> RunContext {
    RunContext::new(config, "bearer-token".to_string(), AcquireOptions::default())
}

pub fn urls(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|url| (*url).to_string()).collect()
}
