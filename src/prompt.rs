//! Interactive pickers for search results and artist listings.

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncWriteExt};
use tracing::warn;

use ripper_core::ConsoleInput;
use ripper_core::service::{
    ArtistCatalog, ArtistProfile, ArtistRelation, CatalogEntry, ListingMode, ServiceError,
};

/// Parses a single 1-based choice. Empty input means "none".
pub fn parse_choice(input: &str, len: usize) -> Option<usize> {
    let index = input.trim().parse::<usize>().ok()?;
    (1..=len).contains(&index).then(|| index - 1)
}

/// Parses a multi-selection: `all`, empty input, or 1-based numbers and
/// ranges separated by commas or spaces. Returns 0-based indices in listing
/// order without duplicates.
pub fn parse_selection(input: &str, len: usize) -> Vec<usize> {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
        return (0..len).collect();
    }

    let mut picked = vec![false; len];
    for token in trimmed.split([',', ' ']).filter(|token| !token.is_empty()) {
        let bounds = match token.split_once('-') {
            Some((start, end)) => (start.trim().parse::<usize>(), end.trim().parse::<usize>()),
            None => (token.parse::<usize>(), token.parse::<usize>()),
        };
        match bounds {
            (Ok(start), Ok(end)) if start >= 1 && start <= end && end <= len => {
                for slot in &mut picked[start - 1..end] {
                    *slot = true;
                }
            }
            _ => warn!(token, "ignoring invalid selection"),
        }
    }

    picked
        .iter()
        .enumerate()
        .filter_map(|(index, chosen)| chosen.then_some(index))
        .collect()
}

fn print_entries(entries: &[CatalogEntry]) {
    for (index, entry) in entries.iter().enumerate() {
        if entry.subtitle.is_empty() {
            println!("{:>3}. {}", index + 1, entry.title);
        } else {
            println!("{:>3}. {} - {}", index + 1, entry.title, entry.subtitle);
        }
    }
}

/// Prints `question` and reads one answer. End of input reads as an empty
/// answer.
async fn read_answer<R: AsyncRead + Unpin>(
    input: &ConsoleInput<R>,
    question: &str,
) -> std::io::Result<String> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(question.as_bytes()).await?;
    stdout.flush().await?;
    Ok(input.next_line().await?.unwrap_or_default())
}

/// Lets the user pick one search result. Returns its locator, or `None`
/// when nothing was chosen.
pub async fn choose_search_result<R: AsyncRead + Unpin>(
    input: &ConsoleInput<R>,
    results: &[CatalogEntry],
) -> std::io::Result<Option<String>> {
    if results.is_empty() {
        println!("No results found.");
        return Ok(None);
    }
    print_entries(results);
    let question = format!("Select a result (1-{}, empty to exit): ", results.len());
    let answer = read_answer(input, &question).await?;
    Ok(parse_choice(&answer, results.len()).map(|index| results[index].url.clone()))
}

/// Artist catalog wrapper that performs the interactive subset selection
/// for [`ListingMode::Select`].
pub struct SelectingCatalog<'a> {
    inner: &'a dyn ArtistCatalog,
    input: &'a ConsoleInput,
}

impl<'a> SelectingCatalog<'a> {
    pub fn new(inner: &'a dyn ArtistCatalog, input: &'a ConsoleInput) -> Self {
        Self { inner, input }
    }
}

#[async_trait]
impl ArtistCatalog for SelectingCatalog<'_> {
    async fn artist_profile(
        &self,
        locator: &str,
        token: &str,
    ) -> Result<ArtistProfile, ServiceError> {
        self.inner.artist_profile(locator, token).await
    }

    async fn list(
        &self,
        locator: &str,
        token: &str,
        relation: ArtistRelation,
        mode: ListingMode,
    ) -> Result<Vec<CatalogEntry>, ServiceError> {
        let entries = self
            .inner
            .list(locator, token, relation, ListingMode::All)
            .await?;
        if mode == ListingMode::All || entries.is_empty() {
            return Ok(entries);
        }

        println!("Artist {relation}:");
        print_entries(&entries);
        let answer = read_answer(
            self.input,
            "Select items (e.g. 1,3,5-7; empty or 'all' for everything): ",
        )
        .await
            .map_err(|error| ServiceError::failed("artist selection", &error.to_string()))?;
        let picked = parse_selection(&answer, entries.len());
        Ok(entries
            .into_iter()
            .enumerate()
            .filter(|(index, _)| picked.binary_search(index).is_ok())
            .map(|(_, entry)| entry)
            .collect())
    }
}
