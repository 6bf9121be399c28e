//! HTTP binding for the acquisition service.
//!
//! All requests carry the run's bearer token in the `Authorization` header.
//! Bodies and responses are JSON. Acquisition calls have no overall timeout
//! because a single album can take minutes; only connection setup is bounded.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use super::{
    AcquireContext, AcquireOptions, Acquirer, ArtistCatalog, ArtistProfile, ArtistRelation,
    CatalogEntry, ItemRequest, ListingMode, SearchKind, Searcher, ServiceError, TokenProvider,
};
use crate::counters::RunCounters;

const CONNECT_TIMEOUT_SECS: u64 = 10;
const LOOKUP_TIMEOUT_SECS: u64 = 30;

/// JSON-over-HTTP client implementing every collaborator seam.
#[derive(Debug, Clone)]
pub struct ServiceClient {
    client: Client,
    base: Url,
}

#[derive(Serialize)]
struct AcquireBody<'a> {
    storefront: &'a str,
    id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    track_index: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    save_dir: Option<&'a Path>,
    media_user_token: &'a str,
    options: &'a AcquireOptions,
}

impl<'a> AcquireBody<'a> {
    fn new(item: &'a ItemRequest, ctx: AcquireContext<'a>) -> Self {
        Self {
            storefront: &item.storefront,
            id: &item.id,
            track_index: item.track_index.as_deref(),
            save_dir: None,
            media_user_token: ctx.media_user_token,
            options: ctx.options,
        }
    }
}

#[derive(serde::Deserialize)]
struct TokenResponse {
    token: String,
}

impl ServiceClient {
    /// Creates a client for the service at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Client`] when the URL is invalid or the HTTP
    /// client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, ServiceError> {
        let mut base = Url::parse(base_url).map_err(|error| ServiceError::Client {
            reason: format!("invalid service URL '{base_url}': {error}"),
        })?;
        // Url::join drops the last path segment unless the base ends with '/'.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .user_agent(concat!("ripper/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|error| ServiceError::Client {
                reason: error.to_string(),
            })?;

        Ok(Self { client, base })
    }

    /// Returns the normalized base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, ServiceError> {
        let mut url = self.base.join(path).map_err(|error| ServiceError::Client {
            reason: format!("invalid endpoint '{path}': {error}"),
        })?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder, endpoint: &str) -> Result<String, ServiceError> {
        let response = request
            .send()
            .await
            .map_err(|source| ServiceError::Network {
                endpoint: endpoint.to_string(),
                source,
            })?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| ServiceError::Network {
                endpoint: endpoint.to_string(),
                source,
            })?;
        debug!(endpoint, status = status.as_u16(), "service responded");

        if !status.is_success() {
            return Err(ServiceError::HttpStatus {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                message: body.trim().to_string(),
            });
        }
        Ok(body)
    }

    fn decode<T: DeserializeOwned>(body: &str, endpoint: &str) -> Result<T, ServiceError> {
        serde_json::from_str(body).map_err(|error| ServiceError::Decode {
            endpoint: endpoint.to_string(),
            reason: error.to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        token: Option<&str>,
    ) -> Result<T, ServiceError> {
        let url = self.endpoint(path, query)?;
        let mut request = self
            .client
            .request(Method::GET, url)
            .timeout(Duration::from_secs(LOOKUP_TIMEOUT_SECS));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        let body = self.send(request, path).await?;
        Self::decode(&body, path)
    }

    async fn post(
        &self,
        path: &str,
        body: &AcquireBody<'_>,
        token: &str,
    ) -> Result<String, ServiceError> {
        let url = self.endpoint(path, &[])?;
        let request = self
            .client
            .request(Method::POST, url)
            .bearer_auth(token)
            .json(body);
        self.send(request, path).await
    }

    async fn rip(
        &self,
        path: &str,
        item: &ItemRequest,
        ctx: AcquireContext<'_>,
    ) -> Result<RunCounters, ServiceError> {
        let body = AcquireBody::new(item, ctx);
        let response = self.post(path, &body, ctx.token).await?;
        if response.trim().is_empty() {
            return Ok(RunCounters::default());
        }
        Self::decode(&response, path)
    }
}

#[async_trait]
impl Acquirer for ServiceClient {
    #[instrument(skip(self, ctx), fields(storefront = %item.storefront, id = %item.id))]
    async fn rip_song(
        &self,
        item: &ItemRequest,
        ctx: AcquireContext<'_>,
    ) -> Result<RunCounters, ServiceError> {
        self.rip("v1/songs", item, ctx).await
    }

    #[instrument(skip(self, ctx), fields(storefront = %item.storefront, id = %item.id))]
    async fn rip_album(
        &self,
        item: &ItemRequest,
        ctx: AcquireContext<'_>,
    ) -> Result<RunCounters, ServiceError> {
        self.rip("v1/albums", item, ctx).await
    }

    #[instrument(skip(self, ctx), fields(storefront = %item.storefront, id = %item.id))]
    async fn rip_playlist(
        &self,
        item: &ItemRequest,
        ctx: AcquireContext<'_>,
    ) -> Result<RunCounters, ServiceError> {
        self.rip("v1/playlists", item, ctx).await
    }

    #[instrument(skip(self, ctx), fields(storefront = %item.storefront, id = %item.id))]
    async fn rip_station(
        &self,
        item: &ItemRequest,
        ctx: AcquireContext<'_>,
    ) -> Result<RunCounters, ServiceError> {
        self.rip("v1/stations", item, ctx).await
    }

    #[instrument(skip(self, ctx), fields(storefront = %item.storefront, id = %item.id))]
    async fn download_music_video(
        &self,
        item: &ItemRequest,
        save_dir: &Path,
        ctx: AcquireContext<'_>,
    ) -> Result<(), ServiceError> {
        let mut body = AcquireBody::new(item, ctx);
        body.save_dir = Some(save_dir);
        self.post("v1/music-videos", &body, ctx.token).await?;
        Ok(())
    }
}

#[async_trait]
impl ArtistCatalog for ServiceClient {
    async fn artist_profile(
        &self,
        locator: &str,
        token: &str,
    ) -> Result<ArtistProfile, ServiceError> {
        self.get_json("v1/artist", &[("url", locator)], Some(token))
            .await
    }

    async fn list(
        &self,
        locator: &str,
        token: &str,
        relation: ArtistRelation,
        _mode: ListingMode,
    ) -> Result<Vec<CatalogEntry>, ServiceError> {
        // The service always returns the full listing; subset selection
        // happens client-side.
        let path = format!("v1/artist/{relation}");
        self.get_json(&path, &[("url", locator)], Some(token)).await
    }
}

#[async_trait]
impl TokenProvider for ServiceClient {
    async fn fetch_token(&self) -> Result<String, ServiceError> {
        let response: TokenResponse = self.get_json("v1/token", &[], None).await?;
        if response.token.trim().is_empty() {
            return Err(ServiceError::failed("token fetch", "service returned an empty token"));
        }
        Ok(response.token)
    }
}

#[async_trait]
impl Searcher for ServiceClient {
    async fn search(
        &self,
        kind: SearchKind,
        term: &str,
        token: &str,
    ) -> Result<Vec<CatalogEntry>, ServiceError> {
        self.get_json(
            "v1/search",
            &[("type", kind.as_str()), ("term", term)],
            Some(token),
        )
        .await
    }
}
