use crate::{
    error::{AppError, AppResult},
    models::{Movie, MovieId, UserPreferences},
    services::providers::MovieCatalog,
};
use std::sync::Arc;
use tokio::task::JoinSet;

/// Gathers the raw candidates for one spin
///
/// Explicit taste signals come first: genre discovery results, then the
/// recommendations for each favorite movie (fetched concurrently, appended
/// in favorite order). Popular movies are only used when both produce
/// nothing. The result may contain duplicates and unrenderable movies;
/// the selection engine deals with those.
pub async fn gather_candidates(
    catalog: Arc<dyn MovieCatalog>,
    preferences: &UserPreferences,
) -> AppResult<Vec<Movie>> {
    let mut candidates = Vec::new();

    if !preferences.genres().is_empty() {
        let by_genre = catalog.discover_by_genres(preferences.genres()).await?;
        tracing::debug!(
            genres = ?preferences.genres(),
            results = by_genre.len(),
            "Genre candidates gathered"
        );
        candidates.extend(by_genre);
    }

    if !preferences.favorites().is_empty() {
        let recommended =
            fetch_recommendations_batch(catalog.clone(), preferences.favorite_ids()).await?;
        candidates.extend(recommended);
    }

    if candidates.is_empty() {
        tracing::info!(
            provider = catalog.name(),
            "No taste-based candidates, falling back to popular movies"
        );
        candidates.extend(catalog.popular().await?);
    }

    tracing::info!(candidates = candidates.len(), "Candidates gathered");

    Ok(candidates)
}

/// Fetches recommendations for several movies in parallel
///
/// Results keep the order of `movie_ids`. Lookups are collected as they
/// finish, so the first failure fails the batch right away; the remaining
/// lookups are aborted when the set is dropped.
pub async fn fetch_recommendations_batch(
    catalog: Arc<dyn MovieCatalog>,
    movie_ids: Vec<MovieId>,
) -> AppResult<Vec<Movie>> {
    tracing::debug!(favorites = ?movie_ids, "Fetching recommendations batch");

    let mut tasks = JoinSet::new();
    for (index, movie_id) in movie_ids.iter().copied().enumerate() {
        let catalog = catalog.clone();
        tasks.spawn(async move { (index, movie_id, catalog.recommendations(movie_id).await) });
    }

    let mut batches: Vec<Vec<Movie>> = vec![Vec::new(); movie_ids.len()];

    while let Some(joined) = tasks.join_next().await {
        let (index, movie_id, outcome) = joined.map_err(|e| AppError::Internal(e.to_string()))?;

        match outcome {
            Ok(movies) => batches[index] = movies,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    movie_id = movie_id,
                    pending = tasks.len(),
                    "Recommendations fetch failed"
                );
                tasks.abort_all();
                return Err(e);
            }
        }
    }

    Ok(batches.into_iter().flatten().collect())
}
