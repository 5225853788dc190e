use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

pub mod genre;
pub mod user;
pub mod user_preferences;

pub use genre::{Genre, GenreId, GENRES};
pub use user::User;
pub use user_preferences::{UserPreferences, MAX_FAVORITES};

/// TMDb movie identifier
pub type MovieId = u64;

/// A movie as returned by TMDb list endpoints
///
/// Identity is the `id`; everything else is display metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: MovieId,
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
}

impl Movie {
    /// True when the movie has something to show on a result card
    pub fn is_renderable(&self) -> bool {
        !self.overview.is_empty()
            && self
                .poster_path
                .as_deref()
                .is_some_and(|path| !path.is_empty())
    }

    /// Year parsed from `release_date` (`YYYY-MM-DD`)
    pub fn release_year(&self) -> Option<i32> {
        self.release_date
            .as_deref()
            .and_then(|date| NaiveDate::parse_from_str(date, "%Y-%m-%d").ok())
            .map(|date| date.year())
    }

    /// Full poster URL for the given image base, if the movie has a poster
    pub fn poster_url(&self, image_base: &str) -> Option<String> {
        self.poster_path
            .as_deref()
            .map(|path| format!("{}{}", image_base, path))
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

// ============================================================================
// TMDb API Types
// ============================================================================

/// Paged list response (`/movie/popular`, `/discover/movie`, ...)
#[derive(Debug, Clone, Deserialize)]
pub struct MoviePage {
    #[serde(default)]
    pub results: Vec<Movie>,
}

/// A streaming service carrying a title under a flat-rate subscription
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchProvider {
    #[serde(default)]
    pub logo_path: Option<String>,
    pub provider_name: String,
}

impl WatchProvider {
    pub fn logo_url(&self, logo_base: &str) -> Option<String> {
        self.logo_path
            .as_deref()
            .map(|path| format!("{}{}", logo_base, path))
    }
}

/// Response from `/movie/{id}/watch/providers`, keyed by region code
#[derive(Debug, Clone, Deserialize)]
pub struct WatchProvidersResponse {
    #[serde(default)]
    pub results: HashMap<String, RegionProviders>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegionProviders {
    #[serde(default)]
    pub flatrate: Option<Vec<WatchProvider>>,
}

impl WatchProvidersResponse {
    /// Flat-rate providers for one region; empty when the region is missing
    pub fn flatrate_for(mut self, region: &str) -> Vec<WatchProvider> {
        self.results
            .remove(region)
            .and_then(|providers| providers.flatrate)
            .unwrap_or_default()
    }
}

/// A spin result ready to be displayed
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub movie: Movie,
    pub providers: Vec<WatchProvider>,
    /// Spins remaining after this pick
    pub spins_left: u8,
}

impl Recommendation {
    /// No spins remain, so this pick is the final choice
    pub fn is_final(&self) -> bool {
        self.spins_left == 0
    }
}
