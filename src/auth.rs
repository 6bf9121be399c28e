//! Bearer token resolution.
//!
//! Order: the token provider first, then the `authorization_token` from the
//! config (with any `Bearer ` prefix removed) when it is set and not the
//! sample placeholder. If neither yields a token the run cannot start.

use thiserror::Error;
use tracing::{debug, warn};

use crate::config::RunConfig;
use crate::service::{ServiceError, TokenProvider};

/// No usable token could be obtained.
#[derive(Debug, Error)]
#[error("failed to get token: {source}")]
pub struct AuthError {
    /// Why the token provider failed.
    #[source]
    pub source: ServiceError,
}

/// Resolves the bearer token for this run.
///
/// # Errors
///
/// Returns [`AuthError`] when the provider fails and the config has no
/// usable fallback token.
pub async fn resolve_token(
    provider: &dyn TokenProvider,
    config: &RunConfig,
) -> Result<String, AuthError> {
    match provider.fetch_token().await {
        Ok(token) => {
            debug!("Obtained token from provider");
            Ok(token)
        }
        Err(source) => {
            if let Some(token) = config.fallback_authorization_token() {
                warn!(
                    error = %source,
                    "Token provider failed; using configured authorization token"
                );
                Ok(token)
            } else {
                Err(AuthError { source })
            }
        }
    }
}
