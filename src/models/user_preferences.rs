use serde::{Deserialize, Serialize};

use super::{GenreId, Movie, MovieId};

/// Most favorite movies a user can pick
pub const MAX_FAVORITES: usize = 3;

/// Taste signals used to gather candidates for a spin
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserPreferences {
    /// Selected genre IDs, in selection order, without duplicates
    genres: Vec<GenreId>,
    /// Favorite movies, unique by ID, at most `MAX_FAVORITES`
    favorites: Vec<Movie>,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self::new()
    }
}

impl UserPreferences {
    /// Creates empty user preferences
    pub fn new() -> Self {
        Self {
            genres: Vec::new(),
            favorites: Vec::new(),
        }
    }

    /// Builds preferences from raw input, dropping duplicates and extra favorites
    pub fn from_parts(
        genres: impl IntoIterator<Item = GenreId>,
        favorites: impl IntoIterator<Item = Movie>,
    ) -> Self {
        let mut prefs = Self::new();
        prefs.set_genres(genres);
        for movie in favorites {
            prefs.add_favorite(movie);
        }
        prefs
    }

    pub fn genres(&self) -> &[GenreId] {
        &self.genres
    }

    pub fn favorites(&self) -> &[Movie] {
        &self.favorites
    }

    /// Replaces the selected genres
    pub fn set_genres(&mut self, genres: impl IntoIterator<Item = GenreId>) {
        self.genres.clear();
        for genre in genres {
            if !self.genres.contains(&genre) {
                self.genres.push(genre);
            }
        }
    }

    /// Adds a favorite movie
    ///
    /// Returns `false` and leaves the list unchanged when the list is full
    /// or the movie is already a favorite.
    pub fn add_favorite(&mut self, movie: Movie) -> bool {
        if self.favorites.len() >= MAX_FAVORITES || self.is_favorite(movie.id) {
            return false;
        }
        self.favorites.push(movie);
        true
    }

    pub fn is_favorite(&self, movie_id: MovieId) -> bool {
        self.favorites.iter().any(|m| m.id == movie_id)
    }

    /// IDs of the favorite movies, in the order they were picked
    pub fn favorite_ids(&self) -> Vec<MovieId> {
        self.favorites.iter().map(|m| m.id).collect()
    }
}
