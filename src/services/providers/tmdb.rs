/// TMDb (The Movie Database) API provider
///
/// All endpoints are plain GETs authenticated with the `api_key` query
/// parameter. List endpoints wrap movies in `{ "results": [...] }`; watch
/// providers are keyed by region code instead.
use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{GenreId, Movie, MovieId, MoviePage, WatchProvider, WatchProvidersResponse},
    services::providers::MovieCatalog,
};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;

#[derive(Clone)]
pub struct TmdbClient {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    language: String,
    region: String,
}

impl TmdbClient {
    pub fn new(api_key: String, api_url: String, language: String, region: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            language,
            region,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.tmdb_api_key.clone(),
            config.tmdb_api_url.clone(),
            config.tmdb_language.clone(),
            config.tmdb_region.clone(),
        )
    }

    /// GETs `path` with the auth and language parameters plus `params`,
    /// and decodes the JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> AppResult<T> {
        let url = format!("{}{}", self.api_url, path);

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("language", self.language.as_str()),
            ])
            .query(params)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, path = %path, "TMDb request failed");
                e
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, path = %path, "TMDb returned an error status");
            return Err(AppError::ExternalApi(format!(
                "TMDb API returned status {}: {}",
                status, body
            )));
        }

        let response_text = response.text().await?;
        tracing::debug!(path = %path, response = %response_text, "Raw TMDb API response");

        serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                path = %path,
                "Failed to deserialize TMDb response"
            );
            AppError::ExternalApi(format!("Failed to parse TMDb response: {}", e))
        })
    }

    async fn get_movies(&self, path: &str, params: &[(&str, &str)]) -> AppResult<Vec<Movie>> {
        let page: MoviePage = self.get_json(path, params).await?;

        tracing::debug!(
            path = %path,
            results = page.results.len(),
            provider = "tmdb",
            "Movie list fetched"
        );

        Ok(page.results)
    }
}

#[async_trait::async_trait]
impl MovieCatalog for TmdbClient {
    async fn top_rated(&self, page: u32) -> AppResult<Vec<Movie>> {
        let page = page.to_string();
        self.get_movies("/movie/top_rated", &[("page", page.as_str())])
            .await
    }

    async fn discover_by_genres(&self, genres: &[GenreId]) -> AppResult<Vec<Movie>> {
        let with_genres = join_genres(genres);
        self.get_movies(
            "/discover/movie",
            &[
                ("sort_by", "popularity.desc"),
                ("with_genres", with_genres.as_str()),
            ],
        )
        .await
    }

    async fn recommendations(&self, movie_id: MovieId) -> AppResult<Vec<Movie>> {
        self.get_movies(&format!("/movie/{}/recommendations", movie_id), &[])
            .await
    }

    async fn watch_providers(&self, movie_id: MovieId) -> AppResult<Vec<WatchProvider>> {
        let response: WatchProvidersResponse = self
            .get_json(&format!("/movie/{}/watch/providers", movie_id), &[])
            .await?;
        let providers = response.flatrate_for(&self.region);

        tracing::info!(
            movie_id = movie_id,
            region = %self.region,
            providers = providers.len(),
            provider = "tmdb",
            "Watch providers fetched"
        );

        Ok(providers)
    }

    async fn search(&self, query: &str) -> AppResult<Vec<Movie>> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        let titles = self.get_movies("/search/movie", &[("query", query)]).await?;

        tracing::info!(
            query = %query,
            results = titles.len(),
            provider = "tmdb",
            "Title search completed"
        );

        Ok(titles)
    }

    async fn popular(&self) -> AppResult<Vec<Movie>> {
        self.get_movies("/movie/popular", &[]).await
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}

/// Comma-separated genre list for `with_genres` (TMDb reads commas as AND)
fn join_genres(genres: &[GenreId]) -> String {
    genres
        .iter()
        .map(|g| g.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
