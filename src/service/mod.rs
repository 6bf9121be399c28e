//! Collaborator seams for the acquisition service.
//!
//! The engine never fetches, decrypts or writes media itself. Everything it
//! delegates goes through the traits in this module:
//!
//! - [`Acquirer`] - rips songs, albums, playlists, stations and music videos
//! - [`ArtistCatalog`] - resolves an artist locator into album/video locators
//! - [`TokenProvider`] - supplies the bearer token for the catalog API
//! - [`Searcher`] - turns a free-text query into candidate locators
//!
//! [`ServiceClient`] implements all four over HTTP.
//!
//! # Object Safety
//!
//! The traits use `async_trait` so the engine can hold `&dyn Acquirer`
//! and tests can substitute in-memory fakes.

mod error;
mod http;

pub use error::ServiceError;
pub use http::ServiceClient;

use std::fmt;
use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::counters::RunCounters;

/// Quality and mode switches forwarded verbatim to the acquisition service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AcquireOptions {
    /// Prefer Dolby Atmos streams.
    pub atmos: bool,
    /// Prefer AAC streams.
    pub aac: bool,
    /// Let the user pick tracks inside an album or playlist.
    pub select: bool,
    /// Rip a single song out of an album locator.
    pub song: bool,
    /// Print stream information instead of ripping.
    pub debug: bool,
    pub alac_max: u32,
    pub atmos_max: u32,
    pub aac_type: String,
    pub mv_audio_type: String,
    pub mv_max: u32,
}

/// Credentials and switches shared by every acquisition call in a run.
#[derive(Debug, Clone, Copy)]
pub struct AcquireContext<'a> {
    /// Bearer token for the catalog API.
    pub token: &'a str,
    /// Subscription session token.
    pub media_user_token: &'a str,
    pub options: &'a AcquireOptions,
}

/// One catalog item to acquire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRequest {
    pub storefront: String,
    pub id: String,
    /// Track selector inside an album.
    pub track_index: Option<String>,
}

impl ItemRequest {
    /// Creates a request without a track selector.
    #[must_use]
    pub fn new(storefront: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            storefront: storefront.into(),
            id: id.into(),
            track_index: None,
        }
    }

    /// Sets the track selector.
    #[must_use]
    pub fn with_track_index(mut self, track_index: Option<String>) -> Self {
        self.track_index = track_index;
        self
    }
}

/// Performs the actual fetch/decrypt/write work.
///
/// Track-level operations return the tally of what they did (tracks
/// completed, unavailable, failed) instead of writing into shared counters.
/// At most one call is outstanding at a time.
#[async_trait]
pub trait Acquirer: Send + Sync {
    /// Rips a single song.
    async fn rip_song(
        &self,
        item: &ItemRequest,
        ctx: AcquireContext<'_>,
    ) -> Result<RunCounters, ServiceError>;

    /// Rips an album, or one track of it when `track_index` is set.
    async fn rip_album(
        &self,
        item: &ItemRequest,
        ctx: AcquireContext<'_>,
    ) -> Result<RunCounters, ServiceError>;

    /// Rips a playlist.
    async fn rip_playlist(
        &self,
        item: &ItemRequest,
        ctx: AcquireContext<'_>,
    ) -> Result<RunCounters, ServiceError>;

    /// Rips a station.
    async fn rip_station(
        &self,
        item: &ItemRequest,
        ctx: AcquireContext<'_>,
    ) -> Result<RunCounters, ServiceError>;

    /// Downloads one music video into `save_dir`.
    async fn download_music_video(
        &self,
        item: &ItemRequest,
        save_dir: &Path,
        ctx: AcquireContext<'_>,
    ) -> Result<(), ServiceError>;
}

/// Artist display name and catalog id.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ArtistProfile {
    pub name: String,
    pub id: String,
}

/// A listing entry returned by the artist catalog or search.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogEntry {
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    pub url: String,
}

/// Which part of an artist's catalog to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtistRelation {
    Albums,
    MusicVideos,
}

impl ArtistRelation {
    /// Path segment used by the service for this relation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Albums => "albums",
            Self::MusicVideos => "music-videos",
        }
    }
}

impl fmt::Display for ArtistRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether an artist listing returns everything or a user-picked subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingMode {
    All,
    Select,
}

impl ListingMode {
    /// Maps the `artist_select` run flag onto a listing mode.
    #[must_use]
    pub fn from_artist_select(artist_select: bool) -> Self {
        if artist_select { Self::Select } else { Self::All }
    }
}

/// Resolves artist locators.
#[async_trait]
pub trait ArtistCatalog: Send + Sync {
    /// Returns the artist's display name and id.
    async fn artist_profile(&self, locator: &str, token: &str)
    -> Result<ArtistProfile, ServiceError>;

    /// Lists locators for one relation of the artist, in catalog order.
    async fn list(
        &self,
        locator: &str,
        token: &str,
        relation: ArtistRelation,
        mode: ListingMode,
    ) -> Result<Vec<CatalogEntry>, ServiceError>;
}

/// Supplies the catalog bearer token.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn fetch_token(&self) -> Result<String, ServiceError>;
}

/// Search category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Album,
    Song,
    Artist,
}

impl SearchKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Album => "album",
            Self::Song => "song",
            Self::Artist => "artist",
        }
    }
}

/// Free-text catalog search.
#[async_trait]
pub trait Searcher: Send + Sync {
    async fn search(
        &self,
        kind: SearchKind,
        term: &str,
        token: &str,
    ) -> Result<Vec<CatalogEntry>, ServiceError>;
}
