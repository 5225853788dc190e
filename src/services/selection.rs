//! Selection engine: turns raw candidates into a single pick.
//!
//! Candidates flow through a chain of filters (dedup, renderable,
//! already watched) and one movie is drawn uniformly at random from what
//! survives. The random source is passed in so tests can seed it.

use crate::{
    error::{AppError, AppResult},
    models::{Movie, MovieId},
};
use rand::Rng;
use std::collections::{HashMap, HashSet};

/// Movies the user marked as watched this session, keyed by ID
pub type WatchedMovies = HashMap<MovieId, Movie>;

/// A single stage of candidate filtering.
///
/// Filters take ownership of the candidates and return the survivors in
/// their original relative order.
pub trait CandidateFilter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    fn apply(&self, candidates: Vec<Movie>, watched: &WatchedMovies) -> Vec<Movie>;
}

/// Keeps the first occurrence of each movie ID.
pub struct DedupFilter;

impl CandidateFilter for DedupFilter {
    fn name(&self) -> &str {
        "DedupFilter"
    }

    fn apply(&self, candidates: Vec<Movie>, _watched: &WatchedMovies) -> Vec<Movie> {
        let mut seen = HashSet::new();
        candidates
            .into_iter()
            .filter(|movie| seen.insert(movie.id))
            .collect()
    }
}

/// Drops movies without an overview or a poster.
pub struct RenderableFilter;

impl CandidateFilter for RenderableFilter {
    fn name(&self) -> &str {
        "RenderableFilter"
    }

    fn apply(&self, candidates: Vec<Movie>, _watched: &WatchedMovies) -> Vec<Movie> {
        candidates
            .into_iter()
            .filter(Movie::is_renderable)
            .collect()
    }
}

/// Drops movies the user has already watched.
pub struct AlreadyWatchedFilter;

impl CandidateFilter for AlreadyWatchedFilter {
    fn name(&self) -> &str {
        "AlreadyWatchedFilter"
    }

    fn apply(&self, candidates: Vec<Movie>, watched: &WatchedMovies) -> Vec<Movie> {
        candidates
            .into_iter()
            .filter(|movie| !watched.contains_key(&movie.id))
            .collect()
    }
}

/// Filter chain plus the random draw.
pub struct SelectionEngine {
    filters: Vec<Box<dyn CandidateFilter>>,
}

impl Default for SelectionEngine {
    fn default() -> Self {
        Self::new()
            .add_filter(DedupFilter)
            .add_filter(RenderableFilter)
            .add_filter(AlreadyWatchedFilter)
    }
}

impl SelectionEngine {
    /// Create an engine with no filters.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Add a filter to the chain (builder pattern).
    pub fn add_filter(mut self, filter: impl CandidateFilter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Runs every filter in order and returns the eligible candidates.
    pub fn eligible(&self, candidates: Vec<Movie>, watched: &WatchedMovies) -> Vec<Movie> {
        let mut current = candidates;
        for filter in &self.filters {
            let before = current.len();
            current = filter.apply(current, watched);
            tracing::debug!(
                filter = filter.name(),
                input = before,
                output = current.len(),
                "Filter applied"
            );
        }
        current
    }

    /// Picks one eligible candidate uniformly at random.
    ///
    /// Fails with `NoCandidates` when nothing survives the filters.
    pub fn select<R: Rng + ?Sized>(
        &self,
        candidates: Vec<Movie>,
        watched: &WatchedMovies,
        rng: &mut R,
    ) -> AppResult<Movie> {
        let mut eligible = self.eligible(candidates, watched);
        if eligible.is_empty() {
            return Err(AppError::NoCandidates);
        }

        let index = rng.random_range(0..eligible.len());
        let picked = eligible.swap_remove(index);

        tracing::info!(
            movie_id = picked.id,
            title = %picked.title,
            pool = eligible.len() + 1,
            "Movie selected"
        );

        Ok(picked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn movie(id: u64) -> Movie {
        Movie {
            id,
            title: format!("Movie {}", id),
            overview: "Overview".to_string(),
            poster_path: Some(format!("/{}.jpg", id)),
            release_date: None,
        }
    }

    fn ids(movies: &[Movie]) -> Vec<u64> {
        movies.iter().map(|m| m.id).collect()
    }

    #[test]
    fn test_dedup_keeps_first_occurrence_in_order() {
        let mut first_three = movie(3);
        first_three.title = "First".to_string();
        let mut second_three = movie(3);
        second_three.title = "Second".to_string();

        let candidates = vec![
            first_three,
            movie(1),
            second_three,
            movie(2),
            movie(1),
        ];
        let deduped = DedupFilter.apply(candidates, &WatchedMovies::new());

        assert_eq!(ids(&deduped), vec![3, 1, 2]);
        assert_eq!(deduped[0].title, "First");
    }

    #[test]
    fn test_renderable_filter() {
        let mut no_overview = movie(6);
        no_overview.overview = String::new();
        let mut no_poster = movie(8);
        no_poster.poster_path = None;

        let filtered =
            RenderableFilter.apply(vec![no_overview, movie(7), no_poster], &WatchedMovies::new());

        assert_eq!(ids(&filtered), vec![7]);
    }

    #[test]
    fn test_already_watched_filter() {
        let mut watched = WatchedMovies::new();
        watched.insert(100, movie(100));
        watched.insert(200, movie(200));

        let candidates = vec![movie(100), movie(101), movie(200), movie(300)];
        let filtered = AlreadyWatchedFilter.apply(candidates, &watched);

        assert_eq!(ids(&filtered), vec![101, 300]);
    }

    #[test]
    fn test_empty_engine_passes_everything() {
        let engine = SelectionEngine::new();
        let eligible = engine.eligible(vec![movie(1), movie(1)], &WatchedMovies::new());
        assert_eq!(eligible.len(), 2);
    }

    #[test]
    fn test_select_returns_unwatched_renderable_movie() {
        let engine = SelectionEngine::default();
        let mut watched = WatchedMovies::new();
        watched.insert(1, movie(1));
        let mut blank = movie(2);
        blank.overview = String::new();

        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let candidates = vec![movie(1), blank.clone(), movie(3), movie(4), movie(3)];
            let picked = engine.select(candidates, &watched, &mut rng).unwrap();
            assert!(picked.id == 3 || picked.id == 4);
            assert!(picked.is_renderable());
        }
    }

    #[test]
    fn test_select_fails_when_everything_watched() {
        let engine = SelectionEngine::default();
        let mut watched = WatchedMovies::new();
        watched.insert(1, movie(1));
        watched.insert(2, movie(2));

        let mut rng = StdRng::seed_from_u64(1);
        let result = engine.select(vec![movie(1), movie(2)], &watched, &mut rng);

        assert!(matches!(result, Err(AppError::NoCandidates)));
    }

    #[test]
    fn test_select_fails_on_empty_candidates() {
        let engine = SelectionEngine::default();
        let mut rng = StdRng::seed_from_u64(1);
        let result = engine.select(vec![], &WatchedMovies::new(), &mut rng);
        assert!(matches!(result, Err(AppError::NoCandidates)));
    }

    #[test]
    fn test_select_is_roughly_uniform() {
        let engine = SelectionEngine::default();
        let watched = WatchedMovies::new();
        let mut rng = StdRng::seed_from_u64(2024);

        let trials = 10_000;
        let mut first = 0;
        for _ in 0..trials {
            let picked = engine
                .select(vec![movie(1), movie(2)], &watched, &mut rng)
                .unwrap();
            if picked.id == 1 {
                first += 1;
            }
        }

        // Expect ~50%; allow a generous band for a fixed seed
        assert!(first > 4_500 && first < 5_500, "picked id 1 {} times", first);
    }

    #[test]
    fn test_select_same_seed_same_pick() {
        let engine = SelectionEngine::default();
        let watched = WatchedMovies::new();
        let candidates: Vec<Movie> = (1..=20).map(movie).collect();

        let a = engine
            .select(candidates.clone(), &watched, &mut StdRng::seed_from_u64(9))
            .unwrap();
        let b = engine
            .select(candidates, &watched, &mut StdRng::seed_from_u64(9))
            .unwrap();

        assert_eq!(a.id, b.id);
    }
}
