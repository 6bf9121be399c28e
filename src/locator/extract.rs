//! Storefront/id extraction from parsed locator URLs.

use url::Url;

use super::Kind;

/// Extracts `(storefront, id)` for a locator of the given kind.
///
/// The storefront is the first path segment when it is a two-letter region
/// code. The id is the last non-empty path segment; numeric catalogs
/// (songs, albums, music videos) accept an optional `id` prefix and require
/// digits. Either value is empty when it cannot be extracted. The id is
/// always empty for [`Kind::Invalid`] and [`Kind::Artist`]; the storefront
/// is still extracted for them.
#[must_use]
pub fn extract_ids(url: &Url, kind: Kind) -> (String, String) {
    let segments: Vec<&str> = url
        .path_segments()
        .map(|segments| segments.filter(|segment| !segment.is_empty()).collect())
        .unwrap_or_default();

    let storefront = segments
        .first()
        .filter(|segment| is_storefront(segment))
        .map(|segment| segment.to_ascii_lowercase())
        .unwrap_or_default();

    let last = segments.last().copied().unwrap_or_default();
    let id = match kind {
        Kind::Song | Kind::Album | Kind::MusicVideo => numeric_id(last),
        Kind::Playlist | Kind::Station => {
            if segments.len() > 1 {
                last.to_string()
            } else {
                String::new()
            }
        }
        Kind::Artist | Kind::Invalid => String::new(),
    };

    (storefront, id)
}

/// Returns the non-empty `i` query parameter of `raw`, if any.
#[must_use]
pub fn track_index(raw: &str) -> Option<String> {
    let parsed = Url::parse(raw).ok()?;
    parsed
        .query_pairs()
        .find(|(key, _)| key == "i")
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

fn is_storefront(segment: &str) -> bool {
    segment.len() == 2 && segment.chars().all(|c| c.is_ascii_alphabetic())
}

fn numeric_id(segment: &str) -> String {
    let digits = segment.strip_prefix("id").unwrap_or(segment);
    if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
        digits.to_string()
    } else {
        String::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn ids(raw: &str, kind: Kind) -> (String, String) {
        extract_ids(&Url::parse(raw).unwrap(), kind)
    }

    #[test]
    fn test_extract_ids_numeric_with_prefix() {
        let (storefront, id) = ids("https://music.example/us/album/name/id1440", Kind::Album);
        assert_eq!(storefront, "us");
        assert_eq!(id, "1440");
    }

    #[test]
    fn test_extract_ids_trailing_slash() {
        let (_, id) = ids("https://music.example/us/song/name/99/", Kind::Song);
        assert_eq!(id, "99");
    }

    #[test]
    fn test_extract_ids_non_numeric_song_id_is_empty() {
        let (storefront, id) = ids("https://music.example/us/song/name/abc", Kind::Song);
        assert_eq!(storefront, "us");
        assert!(id.is_empty());
    }

    #[test]
    fn test_extract_ids_missing_storefront() {
        let (storefront, id) = ids("https://music.example/song/name/12", Kind::Song);
        assert!(storefront.is_empty());
        assert_eq!(id, "12");
    }

    #[test]
    fn test_extract_ids_invalid_and_artist_keep_storefront_only() {
        let (storefront, id) = ids("https://music.example/us/other/12", Kind::Invalid);
        assert_eq!(storefront, "us");
        assert!(id.is_empty());
        let (storefront, id) = ids("https://music.example/gb/artist/band/42", Kind::Artist);
        assert_eq!(storefront, "gb");
        assert!(id.is_empty());
    }

    #[test]
    fn test_track_index_empty_value_ignored() {
        assert_eq!(track_index("https://music.example/us/album/x/1?i="), None);
        assert_eq!(
            track_index("https://music.example/us/album/x/1?l=en&i=7").as_deref(),
            Some("7")
        );
    }
}
