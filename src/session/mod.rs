//! Session state manager.
//!
//! `SessionManager` owns the session state and is the only thing that
//! mutates it. The front end calls its operations in response to user
//! input and reads `SessionState` to render.

pub mod auth;
pub mod id;
pub mod state;

pub use auth::{Authenticator, LoginMethod, SimulatedAuthenticator};
pub use id::SessionId;
pub use state::{FailureKind, Screen, SessionState, SpinFailure, SpinOutcome, MAX_SPINS};

use crate::{
    error::{AppError, AppResult},
    models::{GenreId, Movie, Recommendation, User, UserPreferences},
    services::{
        recommendations::gather_candidates, title_search, MovieCatalog, SelectionEngine,
        SuggestionPool,
    },
};
use rand::{rngs::StdRng, RngCore, SeedableRng};
use std::sync::Arc;

/// What happened when a suggestion was picked as a favorite
#[derive(Debug, Clone, PartialEq)]
pub enum SuggestionPick {
    /// Favorites full or movie already chosen; nothing changed
    Rejected,
    /// Added; `replacement` takes the picked movie's place, if the pool has one
    Added { replacement: Option<Movie> },
}

pub struct SessionManager {
    catalog: Arc<dyn MovieCatalog>,
    authenticator: Box<dyn Authenticator>,
    engine: SelectionEngine,
    rng: Box<dyn RngCore + Send + Sync>,
    state: SessionState,
}

impl SessionManager {
    pub fn new(catalog: Arc<dyn MovieCatalog>, authenticator: Box<dyn Authenticator>) -> Self {
        Self {
            catalog,
            authenticator,
            engine: SelectionEngine::default(),
            rng: Box::new(StdRng::from_os_rng()),
            state: SessionState::new(),
        }
    }

    /// Replaces the random source used to pick movies
    pub fn with_rng(mut self, rng: impl RngCore + Send + Sync + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn spins_left(&self) -> u8 {
        self.state.spins_left
    }

    pub fn watched_movies(&self) -> Vec<&Movie> {
        self.state.watched_movies()
    }

    pub fn last_outcome(&self) -> Option<&SpinOutcome> {
        self.state.last_outcome()
    }

    pub fn greeting(&self) -> Option<String> {
        self.state.user.as_ref().map(User::greeting)
    }

    fn require_user(&self) -> AppResult<()> {
        if self.state.user.is_none() {
            return Err(AppError::NotLoggedIn);
        }
        Ok(())
    }

    /// Fails unless the session is on one of the `allowed` screens
    fn require_screen(&self, allowed: &[Screen], action: &str) -> AppResult<()> {
        if !allowed.contains(&self.state.screen) {
            tracing::debug!(
                session_id = %self.state.session_id,
                screen = ?self.state.screen,
                action = action,
                "Operation not available on this screen"
            );
            return Err(AppError::InvalidInput(format!(
                "Cannot {} from the {} screen",
                action,
                self.state.screen.label()
            )));
        }
        Ok(())
    }

    /// Logs in and starts a fresh session
    ///
    /// Preferences, spins and watched movies are reset. A failure to load
    /// the suggestion pool is logged and leaves the pool empty; the login
    /// itself still succeeds.
    pub async fn login(&mut self, method: LoginMethod) -> AppResult<()> {
        let user = self.authenticator.authenticate(method).await?;
        self.state = SessionState::logged_in(user);

        tracing::info!(
            session_id = %self.state.session_id,
            method = ?method,
            authenticator = self.authenticator.name(),
            "User logged in"
        );

        match SuggestionPool::load(self.catalog.as_ref()).await {
            Ok(pool) => self.state.suggestions = pool,
            Err(e) => {
                tracing::error!(
                    session_id = %self.state.session_id,
                    error = %e,
                    "Failed to load movie suggestions"
                );
            }
        }

        Ok(())
    }

    /// Drops the user and everything derived from the session
    pub fn logout(&mut self) {
        tracing::info!(session_id = %self.state.session_id, "User logged out");
        self.state = SessionState::new();
    }

    /// Overwrites the preference snapshot
    pub fn save_preferences(&mut self, genres: Vec<GenreId>, favorites: Vec<Movie>) -> AppResult<()> {
        self.require_user()?;
        self.state.preferences = UserPreferences::from_parts(genres, favorites);
        Ok(())
    }

    /// Leaves preference selection: stores the genres, keeps the favorites
    /// picked so far and starts a new round of spins
    pub fn confirm_preferences(&mut self, genres: Vec<GenreId>) -> AppResult<()> {
        self.require_user()?;
        self.require_screen(&[Screen::PreferenceSelection], "confirm preferences")?;
        self.state.preferences.set_genres(genres);
        self.state.reset_spins();
        self.state.screen = Screen::Spinning;

        tracing::info!(
            session_id = %self.state.session_id,
            genres = ?self.state.preferences.genres(),
            favorites = ?self.state.preferences.favorite_ids(),
            "Preferences confirmed"
        );
        Ok(())
    }

    /// Adds a favorite; `false` when the list is full or it is already there
    pub fn add_favorite(&mut self, movie: Movie) -> AppResult<bool> {
        self.require_user()?;
        Ok(self.state.preferences.add_favorite(movie))
    }

    /// Picks a suggestion as a favorite and pulls its replacement on success
    pub fn choose_suggestion(&mut self, movie: Movie) -> AppResult<SuggestionPick> {
        if !self.add_favorite(movie)? {
            return Ok(SuggestionPick::Rejected);
        }
        Ok(SuggestionPick::Added {
            replacement: self.next_suggestion(),
        })
    }

    /// Next unused movie from the suggestion pool
    pub fn next_suggestion(&mut self) -> Option<Movie> {
        self.state.suggestions.next_unused()
    }

    /// Marks a movie as watched; `false` if it already was
    pub fn record_watched(&mut self, movie: Movie) -> bool {
        let inserted = self.state.record_watched(movie);
        tracing::debug!(
            session_id = %self.state.session_id,
            inserted = inserted,
            watched = self.state.watched.len(),
            "Watched movie recorded"
        );
        inserted
    }

    pub async fn search_titles(&self, query: &str) -> AppResult<Vec<Movie>> {
        self.require_user()?;
        title_search::search_titles(self.catalog.as_ref(), query).await
    }

    /// Runs one spin
    ///
    /// Returns `Ok(None)` without doing anything when no spins are left.
    /// Otherwise one spin is used up whether or not the pick succeeds, and
    /// the outcome is kept as the last outcome for display.
    pub async fn spin(&mut self) -> AppResult<Option<Recommendation>> {
        self.require_user()?;
        self.require_screen(&[Screen::Spinning, Screen::ResultShown], "spin")?;
        if !self.state.take_spin() {
            tracing::debug!(session_id = %self.state.session_id, "No spins left, ignoring spin");
            return Ok(None);
        }
        self.state.screen = Screen::Spinning;

        let result = self.run_spin().await;
        match &result {
            Ok(rec) => {
                tracing::info!(
                    session_id = %self.state.session_id,
                    movie_id = rec.movie.id,
                    spins_left = rec.spins_left,
                    providers = rec.providers.len(),
                    "Spin succeeded"
                );
                self.state.last_outcome = Some(SpinOutcome::Picked(rec.clone()));
            }
            Err(e) => {
                tracing::warn!(
                    session_id = %self.state.session_id,
                    error = %e,
                    spins_left = self.state.spins_left,
                    "Spin failed"
                );
                self.state.last_outcome = Some(SpinOutcome::Failed(SpinFailure::from(e)));
            }
        }
        self.state.screen = Screen::ResultShown;

        result.map(Some)
    }

    async fn run_spin(&mut self) -> AppResult<Recommendation> {
        let candidates = gather_candidates(self.catalog.clone(), &self.state.preferences).await?;
        let movie = self
            .engine
            .select(candidates, &self.state.watched, &mut *self.rng)?;
        let providers = self.catalog.watch_providers(movie.id).await?;

        Ok(Recommendation {
            movie,
            providers,
            spins_left: self.state.spins_left,
        })
    }

    /// Records the movie on the result card as watched, then spins again
    pub async fn mark_watched(&mut self) -> AppResult<Option<Recommendation>> {
        self.require_user()?;
        self.require_screen(&[Screen::ResultShown], "mark a movie as watched")?;
        let movie = self
            .state
            .current_pick()
            .map(|rec| rec.movie.clone())
            .ok_or_else(|| AppError::InvalidInput("There is no movie to mark as watched".to_string()))?;

        self.record_watched(movie);
        self.spin().await
    }

    pub fn open_gallery(&mut self) -> AppResult<Vec<&Movie>> {
        self.require_user()?;
        self.state.screen = Screen::Gallery;
        Ok(self.state.watched_movies())
    }

    pub fn back_to_preferences(&mut self) -> AppResult<()> {
        self.require_user()?;
        self.state.screen = Screen::PreferenceSelection;
        Ok(())
    }
}
