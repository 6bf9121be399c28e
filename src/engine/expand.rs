//! Artist expansion pre-pass.
//!
//! When the first argument is an artist locator, the batch is replaced by the
//! artist's album locators followed by their music-video locators. The album
//! listing is required; the music-video listing is best effort.

use thiserror::Error;
use tracing::{info, warn};

use super::RunContext;
use crate::locator::is_artist_locator;
use crate::output;
use crate::service::{ArtistCatalog, ArtistRelation, ListingMode, ServiceError};

/// Fatal artist expansion failures.
#[derive(Debug, Error)]
pub enum ExpandError {
    /// The artist name/id lookup failed.
    #[error("Failed to get artistname.")]
    ArtistName(#[source] ServiceError),

    /// The album listing failed.
    #[error("Failed to get artist albums.")]
    Albums(#[source] ServiceError),
}

/// Builds the batch from the initial arguments.
///
/// Only the first argument is checked for the artist marker. If it matches,
/// the whole argument list is replaced by the expansion of that artist;
/// otherwise the arguments are returned unchanged.
///
/// # Errors
///
/// Returns [`ExpandError`] when the artist lookup or album listing fails.
pub async fn build_batch(
    args: Vec<String>,
    ctx: &mut RunContext,
    catalog: &dyn ArtistCatalog,
) -> Result<Vec<String>, ExpandError> {
    match args.first() {
        Some(first) if is_artist_locator(first) => {
            let artist = first.clone();
            expand_artist(&artist, ctx, catalog).await
        }
        _ => Ok(args),
    }
}

/// Expands one artist locator into `albums ++ music_videos`.
///
/// Also substitutes the artist name and id into the config's artist folder
/// template.
///
/// # Errors
///
/// Returns [`ExpandError`] when the artist lookup or album listing fails. A
/// failed music-video listing is reported and yields an empty segment.
pub async fn expand_artist(
    locator: &str,
    ctx: &mut RunContext,
    catalog: &dyn ArtistCatalog,
) -> Result<Vec<String>, ExpandError> {
    let profile = catalog
        .artist_profile(locator, &ctx.token)
        .await
        .map_err(ExpandError::ArtistName)?;
    ctx.config.apply_artist(&profile.name, &profile.id);

    let mode = ListingMode::from_artist_select(ctx.artist_select);
    let albums = catalog
        .list(locator, &ctx.token, ArtistRelation::Albums, mode)
        .await
        .map_err(ExpandError::Albums)?;

    let music_videos = match catalog
        .list(locator, &ctx.token, ArtistRelation::MusicVideos, mode)
        .await
    {
        Ok(entries) => entries,
        Err(error) => {
            warn!(error = %error, artist = %profile.name, "music-video listing failed");
            output::print_notice("Failed to get artist music-videos.");
            Vec::new()
        }
    };

    info!(
        artist = %profile.name,
        albums = albums.len(),
        music_videos = music_videos.len(),
        "Expanded artist"
    );

    Ok(albums
        .into_iter()
        .chain(music_videos)
        .map(|entry| entry.url)
        .collect())
}
