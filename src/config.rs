//! Run configuration loaded from `config.toml`.
//!
//! The configuration is read once at startup and lives for the whole
//! process. The only mutation after loading is the artist placeholder
//! substitution performed by artist expansion
//! ([`RunConfig::apply_artist`]).

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::template::{self, ARTIST_ID, ARTIST_NAME, URL_ARTIST_NAME};

/// Default config file name, resolved against the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Placeholder value shipped in the sample config; treated as "not set".
pub const AUTHORIZATION_TOKEN_PLACEHOLDER: &str = "your-authorization-token";

/// Minimum user-token length for operations that need a subscription session.
pub const MIN_MEDIA_USER_TOKEN_LEN: usize = 50;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// Path that was read.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for this schema.
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        /// Path that was parsed.
        path: PathBuf,
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },

    /// A value is out of range or malformed.
    #[error("invalid config value for `{field}`: {reason}")]
    Invalid {
        /// Offending key.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

/// Process-wide run configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Base URL of the acquisition service.
    pub service_url: String,
    /// Subscription session token forwarded to the service.
    pub media_user_token: String,
    /// Fallback bearer token when the token provider fails.
    pub authorization_token: String,
    /// Root folder for saved media.
    pub alac_save_folder: PathBuf,
    /// Template for the per-artist folder name.
    pub artist_folder_format: String,
    /// Maximum characters kept from artist names in folder names.
    pub limit_max: usize,
    /// Maximum ALAC sample rate.
    pub alac_max: u32,
    /// Maximum Atmos bitrate.
    pub atmos_max: u32,
    /// AAC variant.
    pub aac_type: String,
    /// Audio variant muxed into music videos.
    pub mv_audio_type: String,
    /// Maximum music-video resolution.
    pub mv_max: u32,
    /// External tool required for music-video decryption.
    pub decrypt_tool: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            service_url: "http://127.0.0.1:10020".to_string(),
            media_user_token: String::new(),
            authorization_token: AUTHORIZATION_TOKEN_PLACEHOLDER.to_string(),
            alac_save_folder: PathBuf::from("downloads"),
            artist_folder_format: "{UrlArtistName}".to_string(),
            limit_max: 200,
            alac_max: 192_000,
            atmos_max: 2768,
            aac_type: "aac-lc".to_string(),
            mv_audio_type: "atmos".to_string(),
            mv_max: 2160,
            decrypt_tool: "mp4decrypt".to_string(),
        }
    }
}

impl RunConfig {
    /// Loads and validates configuration from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file is missing, unreadable, not
    /// valid TOML, or fails [`RunConfig::validate`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse_with_path(&raw, path)?;
        debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Parses and validates configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] or [`ConfigError::Invalid`].
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        Self::parse_with_path(raw, Path::new("<inline>"))
    }

    fn parse_with_path(raw: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validates values against runtime constraints.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for a zero `limit_max` or a
    /// `service_url` that is not an absolute http(s) URL.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.limit_max == 0 {
            return Err(ConfigError::Invalid {
                field: "limit_max",
                reason: "must be greater than zero".to_string(),
            });
        }
        let url = url::Url::parse(&self.service_url).map_err(|error| ConfigError::Invalid {
            field: "service_url",
            reason: error.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid {
                field: "service_url",
                reason: format!("scheme '{}' is not supported", url.scheme()),
            });
        }
        Ok(())
    }

    /// Returns true when the user token is long enough to be a real session.
    #[must_use]
    pub fn has_media_user_token(&self) -> bool {
        self.media_user_token.len() > MIN_MEDIA_USER_TOKEN_LEN
    }

    /// Returns the configured bearer token without its `Bearer ` prefix,
    /// or `None` when unset or still the sample placeholder.
    #[must_use]
    pub fn fallback_authorization_token(&self) -> Option<String> {
        let token = self.authorization_token.trim();
        if token.is_empty() || token == AUTHORIZATION_TOKEN_PLACEHOLDER {
            return None;
        }
        Some(token.replace("Bearer ", ""))
    }

    /// Substitutes the artist placeholders into `artist_folder_format`.
    pub fn apply_artist(&mut self, artist_name: &str, artist_id: &str) {
        let name = template::limit_string(artist_name, self.limit_max);
        self.artist_folder_format = template::fill(
            &self.artist_folder_format,
            &[(URL_ARTIST_NAME, name.as_str()), (ARTIST_ID, artist_id)],
        );
    }

    /// Returns the directory music videos are saved into.
    ///
    /// Artist placeholders still present in the folder template are cleared,
    /// since a music-video dispatch has no artist context of its own.
    #[must_use]
    pub fn music_video_dir(&self) -> PathBuf {
        let folder = template::fill(
            &self.artist_folder_format,
            &[(ARTIST_NAME, ""), (URL_ARTIST_NAME, ""), (ARTIST_ID, "")],
        );
        if folder.is_empty() {
            self.alac_save_folder.clone()
        } else {
            self.alac_save_folder
                .join(template::sanitize_filename(&folder))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_config_parse_partial_fields_uses_defaults() {
        let config = RunConfig::parse(
            r#"
media_user_token = "abc"
alac_max = 96000
"#,
        )
        .unwrap();
        assert_eq!(config.media_user_token, "abc");
        assert_eq!(config.alac_max, 96_000);
        assert_eq!(config.decrypt_tool, "mp4decrypt");
        assert_eq!(config.limit_max, 200);
    }

    #[test]
    fn test_config_parse_rejects_unknown_type() {
        let result = RunConfig::parse("alac_max = \"high\"");
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_config_validate_rejects_zero_limit() {
        let result = RunConfig::parse("limit_max = 0");
        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                field: "limit_max",
                ..
            })
        ));
    }

    #[test]
    fn test_config_validate_rejects_bad_service_url() {
        let result = RunConfig::parse("service_url = \"ftp://example.com\"");
        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                field: "service_url",
                ..
            })
        ));
    }

    #[test]
    fn test_config_load_missing_file_is_read_error() {
        let result = RunConfig::load(Path::new("/definitely/not/here/config.toml"));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_media_user_token_threshold() {
        let mut config = RunConfig::default();
        config.media_user_token = "x".repeat(50);
        assert!(!config.has_media_user_token());
        config.media_user_token = "x".repeat(51);
        assert!(config.has_media_user_token());
    }

    #[test]
    fn test_fallback_token_strips_bearer_prefix() {
        let mut config = RunConfig::default();
        assert_eq!(config.fallback_authorization_token(), None);
        config.authorization_token = "Bearer eyJabc".to_string();
        assert_eq!(config.fallback_authorization_token().as_deref(), Some("eyJabc"));
        config.authorization_token = String::new();
        assert_eq!(config.fallback_authorization_token(), None);
    }

    #[test]
    fn test_apply_artist_substitutes_and_limits() {
        let mut config = RunConfig {
            artist_folder_format: "{UrlArtistName} ({ArtistId})".to_string(),
            limit_max: 3,
            ..RunConfig::default()
        };
        config.apply_artist("Radiohead", "657515");
        assert_eq!(config.artist_folder_format, "Rad (657515)");
    }

    #[test]
    fn test_music_video_dir_clears_placeholders() {
        let config = RunConfig {
            alac_save_folder: PathBuf::from("out"),
            artist_folder_format: "{UrlArtistName}".to_string(),
            ..RunConfig::default()
        };
        assert_eq!(config.music_video_dir(), PathBuf::from("out"));

        let config = RunConfig {
            alac_save_folder: PathBuf::from("out"),
            artist_folder_format: "Videos/{ArtistName}".to_string(),
            ..RunConfig::default()
        };
        assert_eq!(config.music_video_dir(), PathBuf::from("out").join("Videos_"));
    }
}
