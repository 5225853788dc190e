use crate::{
    error::AppError,
    models::{Movie, Recommendation, User, UserPreferences},
    services::{SuggestionPool, WatchedMovies},
};

use super::SessionId;

/// Spins granted per round of preferences
pub const MAX_SPINS: u8 = 3;

/// Which screen the front end should show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    LoggedOut,
    PreferenceSelection,
    Spinning,
    ResultShown,
    Gallery,
}

impl Screen {
    pub fn label(self) -> &'static str {
        match self {
            Screen::LoggedOut => "login",
            Screen::PreferenceSelection => "preferences",
            Screen::Spinning => "spinning",
            Screen::ResultShown => "result",
            Screen::Gallery => "gallery",
        }
    }
}

/// Broad reason a spin failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Communication,
    NoCandidates,
    Other,
}

/// A failed spin, kept for display
#[derive(Debug, Clone, PartialEq)]
pub struct SpinFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl From<&AppError> for SpinFailure {
    fn from(error: &AppError) -> Self {
        let kind = if error.is_communication() {
            FailureKind::Communication
        } else if matches!(error, AppError::NoCandidates) {
            FailureKind::NoCandidates
        } else {
            FailureKind::Other
        };

        Self {
            kind,
            message: error.user_message(),
        }
    }
}

/// Result of the last spin
#[derive(Debug, Clone, PartialEq)]
pub enum SpinOutcome {
    Picked(Recommendation),
    Failed(SpinFailure),
}

/// Everything the roulette knows about the current session
///
/// Only `SessionManager` mutates this; the front end reads it to render.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub(crate) session_id: SessionId,
    pub(crate) user: Option<User>,
    pub(crate) preferences: UserPreferences,
    pub(crate) spins_left: u8,
    pub(crate) watched: WatchedMovies,
    pub(crate) suggestions: SuggestionPool,
    pub(crate) screen: Screen,
    pub(crate) last_outcome: Option<SpinOutcome>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    /// Creates a logged-out session
    pub fn new() -> Self {
        Self {
            session_id: SessionId::new(),
            user: None,
            preferences: UserPreferences::new(),
            spins_left: MAX_SPINS,
            watched: WatchedMovies::new(),
            suggestions: SuggestionPool::default(),
            screen: Screen::LoggedOut,
            last_outcome: None,
        }
    }

    /// Creates a fresh session for a user who just logged in
    pub fn logged_in(user: User) -> Self {
        Self {
            user: Some(user),
            screen: Screen::PreferenceSelection,
            ..Self::new()
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn preferences(&self) -> &UserPreferences {
        &self.preferences
    }

    pub fn spins_left(&self) -> u8 {
        self.spins_left
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn suggestions(&self) -> &SuggestionPool {
        &self.suggestions
    }

    pub fn last_outcome(&self) -> Option<&SpinOutcome> {
        self.last_outcome.as_ref()
    }

    pub fn is_watched(&self, movie: &Movie) -> bool {
        self.watched.contains_key(&movie.id)
    }

    /// Watched movies, sorted by title for display
    pub fn watched_movies(&self) -> Vec<&Movie> {
        let mut movies: Vec<&Movie> = self.watched.values().collect();
        movies.sort_by(|a, b| a.title.cmp(&b.title).then(a.id.cmp(&b.id)));
        movies
    }

    /// The movie currently on the result card, if the last spin succeeded
    pub fn current_pick(&self) -> Option<&Recommendation> {
        match &self.last_outcome {
            Some(SpinOutcome::Picked(rec)) => Some(rec),
            _ => None,
        }
    }

    pub(crate) fn reset_spins(&mut self) {
        self.spins_left = MAX_SPINS;
        self.last_outcome = None;
    }

    /// Uses up one spin; `false` when none are left
    pub(crate) fn take_spin(&mut self) -> bool {
        if self.spins_left == 0 {
            return false;
        }
        self.spins_left -= 1;
        true
    }

    /// Inserts into the watched mapping; `false` if it was already there
    pub(crate) fn record_watched(&mut self, movie: Movie) -> bool {
        if self.watched.contains_key(&movie.id) {
            return false;
        }
        self.watched.insert(movie.id, movie);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: u64, title: &str) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            overview: "Overview".to_string(),
            poster_path: Some(format!("/{}.jpg", id)),
            release_date: None,
        }
    }

    #[test]
    fn test_new_state_is_logged_out() {
        let state = SessionState::new();
        assert_eq!(state.screen(), Screen::LoggedOut);
        assert!(state.user().is_none());
        assert_eq!(state.spins_left(), MAX_SPINS);
        assert!(state.watched_movies().is_empty());
        assert!(state.last_outcome().is_none());
    }

    #[test]
    fn test_logged_in_state() {
        let state = SessionState::logged_in(User::guest());
        assert_eq!(state.screen(), Screen::PreferenceSelection);
        assert!(state.user().is_some_and(|u| u.is_anonymous));
    }

    #[test]
    fn test_take_spin_floors_at_zero() {
        let mut state = SessionState::new();
        assert!(state.take_spin());
        assert!(state.take_spin());
        assert!(state.take_spin());
        assert_eq!(state.spins_left(), 0);
        assert!(!state.take_spin());
        assert_eq!(state.spins_left(), 0);

        state.reset_spins();
        assert_eq!(state.spins_left(), MAX_SPINS);
    }

    #[test]
    fn test_record_watched_is_idempotent() {
        let mut state = SessionState::new();
        assert!(state.record_watched(movie(1, "Alien")));
        assert!(!state.record_watched(movie(1, "Alien")));
        assert_eq!(state.watched_movies().len(), 1);
        assert!(state.is_watched(&movie(1, "Alien")));
    }

    #[test]
    fn test_watched_movies_sorted_by_title() {
        let mut state = SessionState::new();
        state.record_watched(movie(2, "Zodiac"));
        state.record_watched(movie(1, "Alien"));
        state.record_watched(movie(3, "Memento"));

        let titles: Vec<&str> = state
            .watched_movies()
            .iter()
            .map(|m| m.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Alien", "Memento", "Zodiac"]);
    }

    #[test]
    fn test_spin_failure_from_error() {
        let failure = SpinFailure::from(&AppError::NoCandidates);
        assert_eq!(failure.kind, FailureKind::NoCandidates);
        assert_eq!(failure.message, "No new movies found matching these criteria.");

        let failure = SpinFailure::from(&AppError::ExternalApi("502".to_string()));
        assert_eq!(failure.kind, FailureKind::Communication);

        let failure = SpinFailure::from(&AppError::Internal("join".to_string()));
        assert_eq!(failure.kind, FailureKind::Other);
    }
}
