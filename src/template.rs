//! Folder-name templating and filename sanitization.

use std::sync::LazyLock;

use regex::Regex;

/// Placeholder for the artist name as resolved from the artist locator.
pub const URL_ARTIST_NAME: &str = "{UrlArtistName}";
/// Placeholder for the artist catalog id.
pub const ARTIST_ID: &str = "{ArtistId}";
/// Placeholder for the artist name taken from track metadata.
pub const ARTIST_NAME: &str = "{ArtistName}";

/// Characters that are not allowed in a single path component.
#[allow(clippy::expect_used)]
static UNSAFE_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    // Static pattern, safe to panic
    Regex::new(r#"[/\\<>:"|?*\x00-\x1f]"#).expect("sanitize regex is valid")
});

/// Replaces every placeholder in `template` with its value.
///
/// Replacement is single-pass per placeholder; values are not re-scanned for
/// other placeholders.
#[must_use]
pub fn fill(template: &str, replacements: &[(&str, &str)]) -> String {
    replacements
        .iter()
        .fold(template.to_string(), |acc, (placeholder, value)| {
            acc.replace(placeholder, value)
        })
}

/// Truncates `value` to at most `limit` characters.
#[must_use]
pub fn limit_string(value: &str, limit: usize) -> String {
    if value.chars().count() <= limit {
        return value.to_string();
    }
    value.chars().take(limit).collect()
}

/// Makes `name` safe to use as one path component.
#[must_use]
pub fn sanitize_filename(name: &str) -> String {
    let replaced = UNSAFE_CHARS.replace_all(name, "_");
    replaced.trim().trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_replaces_all_occurrences() {
        let filled = fill(
            "{UrlArtistName} [{ArtistId}] {UrlArtistName}",
            &[(URL_ARTIST_NAME, "Nina"), (ARTIST_ID, "42")],
        );
        assert_eq!(filled, "Nina [42] Nina");
    }

    #[test]
    fn test_fill_with_empty_values_clears_placeholders() {
        let filled = fill(
            "{ArtistName}{UrlArtistName}{ArtistId}",
            &[(ARTIST_NAME, ""), (URL_ARTIST_NAME, ""), (ARTIST_ID, "")],
        );
        assert!(filled.is_empty());
    }

    #[test]
    fn test_limit_string_counts_chars_not_bytes() {
        assert_eq!(limit_string("ÄÖÜabc", 4), "ÄÖÜa");
        assert_eq!(limit_string("short", 10), "short");
    }

    #[test]
    fn test_sanitize_filename_replaces_separators() {
        assert_eq!(sanitize_filename("AC/DC: Live?"), "AC_DC_ Live_");
        assert_eq!(sanitize_filename("  trailing dots... "), "trailing dots");
    }
}
