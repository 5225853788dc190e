use crate::{error::AppResult, models::Movie, services::providers::MovieCatalog};

/// How many suggestions are on screen at once
pub const VISIBLE_SUGGESTIONS: usize = 12;

/// Top-rated pages merged into the pool
const POOL_PAGES: [u32; 2] = [1, 2];

/// Pre-fetched movies offered for quick favorite selection
///
/// The first `VISIBLE_SUGGESTIONS` entries are shown up front; the cursor
/// marks the next entry handed out as a replacement when one is picked.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SuggestionPool {
    movies: Vec<Movie>,
    cursor: usize,
}

impl SuggestionPool {
    /// Builds a pool from fetched movies, keeping only those with a poster
    pub fn from_movies(movies: Vec<Movie>) -> Self {
        let movies: Vec<Movie> = movies
            .into_iter()
            .filter(|m| m.poster_path.as_deref().is_some_and(|p| !p.is_empty()))
            .collect();
        let cursor = VISIBLE_SUGGESTIONS.min(movies.len());
        Self { movies, cursor }
    }

    /// Fetches the top-rated pages one after the other and builds the pool
    pub async fn load(catalog: &dyn MovieCatalog) -> AppResult<Self> {
        let mut movies = Vec::new();
        for page in POOL_PAGES {
            movies.extend(catalog.top_rated(page).await?);
        }

        let pool = Self::from_movies(movies);
        tracing::info!(
            pool = pool.len(),
            provider = catalog.name(),
            "Suggestion pool loaded"
        );
        Ok(pool)
    }

    /// The suggestions shown before any has been picked
    pub fn initial(&self) -> &[Movie] {
        &self.movies[..VISIBLE_SUGGESTIONS.min(self.movies.len())]
    }

    /// Hands out the next unused suggestion, or `None` once the pool is spent
    pub fn next_unused(&mut self) -> Option<Movie> {
        let next = self.movies.get(self.cursor).cloned();
        if next.is_some() {
            self.cursor += 1;
        }
        next
    }

    pub fn remaining(&self) -> usize {
        self.movies.len() - self.cursor
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}
