//! Locator classification.
//!
//! A locator is a content URL handed to the tool on the command line (or
//! chosen from a search result). Classification is a pure function of the
//! raw string: the same input always yields the same kind, storefront and id.
//!
//! # Precedence
//!
//! Kinds are detected by case-sensitive substring containment, tested in a
//! fixed order:
//!
//! 1. `/music-video/`
//! 2. `/song/`
//! 3. `/album/`
//! 4. `/playlist/`
//! 5. `/station/`
//!
//! The first marker found wins, so a string containing several markers is
//! classified by this order rather than by its path structure. `/artist/` is
//! never produced by [`classify`]; it is recognised by the separate
//! [`is_artist_locator`] pre-pass.
//!
//! # Example
//!
//! ```
//! use ripper_core::locator::{Kind, classify};
//!
//! let locator = classify("https://music.example/us/album/blue/1440?i=1442");
//! assert_eq!(locator.kind, Kind::Album);
//! assert_eq!(locator.storefront, "us");
//! assert_eq!(locator.id, "1440");
//! assert_eq!(locator.track_index.as_deref(), Some("1442"));
//! ```

mod extract;

pub use extract::{extract_ids, track_index};

use std::fmt;

use tracing::trace;

/// Marker recognised by the artist pre-pass.
pub const ARTIST_MARKER: &str = "/artist/";

/// Markers tested by [`classify`], in precedence order.
const KIND_MARKERS: [(&str, Kind); 5] = [
    ("/music-video/", Kind::MusicVideo),
    ("/song/", Kind::Song),
    ("/album/", Kind::Album),
    ("/playlist/", Kind::Playlist),
    ("/station/", Kind::Station),
];

/// Content kind assigned to a locator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Song,
    Album,
    Playlist,
    Station,
    MusicVideo,
    Artist,
    Invalid,
}

impl Kind {
    /// Returns the label printed next to the queue position.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Song => "Song",
            Self::Album => "Album",
            Self::Playlist => "Playlist",
            Self::Station => "Station",
            Self::MusicVideo => "Music Video",
            Self::Artist => "Artist",
            Self::Invalid => "Invalid",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A classified unit of work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    /// The original string as supplied.
    pub raw: String,
    /// Detected content kind.
    pub kind: Kind,
    /// Two-letter storefront code, empty when extraction failed.
    pub storefront: String,
    /// Catalog identifier, empty when extraction failed.
    pub id: String,
    /// Track selector from the `i` query parameter (albums only).
    pub track_index: Option<String>,
    /// Parse error when `raw` is not a URL at all.
    pub url_error: Option<String>,
}

impl Locator {
    /// Returns true when both storefront and id were extracted.
    #[must_use]
    pub fn has_ids(&self) -> bool {
        !self.storefront.is_empty() && !self.id.is_empty()
    }
}

/// Returns the kind implied by the first matching marker in `raw`.
#[must_use]
pub fn detect_kind(raw: &str) -> Kind {
    KIND_MARKERS
        .iter()
        .find(|(marker, _)| raw.contains(marker))
        .map_or(Kind::Invalid, |(_, kind)| *kind)
}

/// Returns true when `raw` should go through artist expansion.
#[must_use]
pub fn is_artist_locator(raw: &str) -> bool {
    raw.contains(ARTIST_MARKER)
}

/// Classifies a raw locator string.
#[must_use]
pub fn classify(raw: &str) -> Locator {
    let kind = detect_kind(raw);
    let (storefront, id, url_error) = match url::Url::parse(raw) {
        Ok(parsed) => {
            let (storefront, id) = extract_ids(&parsed, kind);
            (storefront, id, None)
        }
        Err(error) => (String::new(), String::new(), Some(error.to_string())),
    };
    let track_index = if kind == Kind::Album {
        track_index(raw)
    } else {
        None
    };

    trace!(raw, %kind, storefront, id, ?track_index, "classified locator");

    Locator {
        raw: raw.to_string(),
        kind,
        storefront,
        id,
        track_index,
        url_error,
    }
}
