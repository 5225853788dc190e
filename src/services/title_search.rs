use crate::{error::AppResult, models::Movie, services::providers::MovieCatalog};

/// Shortest query worth sending to the API, counted in characters after
/// trimming surrounding whitespace
pub const MIN_QUERY_CHARS: usize = 3;

/// Most results offered to the user
pub const MAX_SEARCH_RESULTS: usize = 5;

/// Service function for title search
///
/// The query is trimmed first. Queries shorter than `MIN_QUERY_CHARS`
/// characters after trimming return nothing without touching the API, so
/// `"  ab  "` counts as two characters. Otherwise the first
/// `MAX_SEARCH_RESULTS` matches from the configured MovieCatalog are returned.
pub async fn search_titles(catalog: &dyn MovieCatalog, query: &str) -> AppResult<Vec<Movie>> {
    let query = query.trim();
    if query.chars().count() < MIN_QUERY_CHARS {
        return Ok(Vec::new());
    }

    let mut titles = catalog.search(query).await?;
    titles.truncate(MAX_SEARCH_RESULTS);
    Ok(titles)
}
