/// Movie metadata provider abstraction
///
/// The roulette only talks to the movie API through this trait, so the
/// session logic can be driven by a fake catalog in tests and a different
/// metadata service can be swapped in without touching candidate selection.
use crate::{
    error::AppResult,
    models::{GenreId, Movie, MovieId, WatchProvider},
};

pub mod tmdb;

pub use tmdb::TmdbClient;

/// Trait for movie metadata providers
///
/// Every method is a single HTTP round trip. Implementations fail fast:
/// no retries, and a non-success status is an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MovieCatalog: Send + Sync {
    /// One page of the top-rated list (pages start at 1)
    async fn top_rated(&self, page: u32) -> AppResult<Vec<Movie>>;

    /// Movies in all of the given genres, most popular first
    async fn discover_by_genres(&self, genres: &[GenreId]) -> AppResult<Vec<Movie>>;

    /// Movies recommended for viewers of `movie_id`
    async fn recommendations(&self, movie_id: MovieId) -> AppResult<Vec<Movie>>;

    /// Flat-rate streaming providers for `movie_id` in the configured region
    async fn watch_providers(&self, movie_id: MovieId) -> AppResult<Vec<WatchProvider>>;

    /// Title search
    async fn search(&self, query: &str) -> AppResult<Vec<Movie>>;

    /// Generally popular movies, used when there are no taste signals
    async fn popular(&self) -> AppResult<Vec<Movie>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
