//! Line-oriented terminal front end.
//!
//! Reads one command per line, calls the matching `SessionManager`
//! operation and prints the resulting screen. It holds no session data of
//! its own beyond what is on screen (search results and the suggestion
//! grid).

pub mod render;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{GenreId, Movie, Recommendation},
    session::{LoginMethod, SessionManager, SpinOutcome, SuggestionPick},
};
use render::RenderContext;
use std::str::FromStr;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// One line of user input
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Login(LoginMethod),
    Logout,
    Genres,
    Search(String),
    Fav(usize),
    Suggest,
    Pick(usize),
    Go(Vec<GenreId>),
    Spin,
    Watched,
    Gallery,
    Back,
    Help,
    Quit,
}

fn parse_index(arg: &str) -> AppResult<usize> {
    arg.trim()
        .parse::<usize>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| AppError::InvalidInput(format!("'{}' is not a list number", arg.trim())))
}

fn parse_genres(arg: &str) -> AppResult<Vec<GenreId>> {
    arg.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<GenreId>()
                .map_err(|_| AppError::InvalidInput(format!("'{}' is not a genre id", part)))
        })
        .collect()
}

impl FromStr for Command {
    type Err = AppError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (name, arg) = match line.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (line, ""),
        };

        match name.to_lowercase().as_str() {
            "login" => Ok(Command::Login(arg.parse()?)),
            "logout" => Ok(Command::Logout),
            "genres" => Ok(Command::Genres),
            "search" => Ok(Command::Search(arg.to_string())),
            "fav" => Ok(Command::Fav(parse_index(arg)?)),
            "suggest" => Ok(Command::Suggest),
            "pick" => Ok(Command::Pick(parse_index(arg)?)),
            "go" => Ok(Command::Go(parse_genres(arg)?)),
            "spin" => Ok(Command::Spin),
            "watched" => Ok(Command::Watched),
            "gallery" => Ok(Command::Gallery),
            "back" => Ok(Command::Back),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(AppError::InvalidInput(format!(
                "Unknown command '{}'. Type `help` for the list.",
                other
            ))),
        }
    }
}

pub struct Console {
    session: SessionManager,
    ctx: RenderContext,
    search_results: Vec<Movie>,
    suggestion_grid: Vec<Movie>,
}

impl Console {
    pub fn new(session: SessionManager, config: &Config) -> Self {
        Self {
            session,
            ctx: RenderContext {
                image_url: config.tmdb_image_url.clone(),
                logo_url: config.tmdb_logo_url.clone(),
                region: config.tmdb_region.clone(),
            },
            search_results: Vec::new(),
            suggestion_grid: Vec::new(),
        }
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    fn preferences_screen(&self) -> String {
        let greeting = self.session.greeting().unwrap_or_default();
        let mut out = render::render_preferences(&greeting, self.session.state().preferences());
        out.push_str(&render::render_suggestions(&self.suggestion_grid));
        out.push_str("Use `search`, `pick` and `genres`, then `go <genre ids>` to start.\n");
        out
    }

    fn spin_screen(&self, result: AppResult<Option<Recommendation>>) -> AppResult<String> {
        match result {
            Ok(Some(rec)) => Ok(render::render_result_card(&rec, &self.ctx)),
            Ok(None) => Ok("No spins left. Type `back` to change your preferences.\n".to_string()),
            Err(AppError::NotLoggedIn) => Err(AppError::NotLoggedIn),
            Err(AppError::InvalidInput(msg)) => Err(AppError::InvalidInput(msg)),
            Err(_) => match self.session.last_outcome() {
                Some(SpinOutcome::Failed(failure)) => Ok(render::render_failure(failure)),
                _ => Err(AppError::Internal("spin failed without an outcome".to_string())),
            },
        }
    }

    /// Runs one command and returns the text to show
    pub async fn execute(&mut self, command: Command) -> AppResult<String> {
        match command {
            Command::Login(method) => {
                self.session.login(method).await?;
                self.search_results.clear();
                self.suggestion_grid = self.session.state().suggestions().initial().to_vec();
                Ok(self.preferences_screen())
            }
            Command::Logout => {
                self.session.logout();
                self.search_results.clear();
                self.suggestion_grid.clear();
                Ok("Logged out. Type `login google` or `login guest`.\n".to_string())
            }
            Command::Genres => Ok(render::render_genres(
                self.session.state().preferences().genres(),
            )),
            Command::Search(query) => {
                self.search_results = self.session.search_titles(&query).await?;
                Ok(render::render_search_results(&self.search_results))
            }
            Command::Fav(n) => {
                let movie = self
                    .search_results
                    .get(n - 1)
                    .cloned()
                    .ok_or_else(|| AppError::InvalidInput(format!("No search result {}", n)))?;
                let added = self.session.add_favorite(movie)?;
                self.search_results.clear();
                if !added {
                    return Ok("Could not add: you already have it or three favorites.\n".to_string());
                }
                Ok(self.preferences_screen())
            }
            Command::Suggest => Ok(render::render_suggestions(&self.suggestion_grid)),
            Command::Pick(n) => {
                let movie = self
                    .suggestion_grid
                    .get(n - 1)
                    .cloned()
                    .ok_or_else(|| AppError::InvalidInput(format!("No suggestion {}", n)))?;
                match self.session.choose_suggestion(movie)? {
                    SuggestionPick::Rejected => {
                        Ok("Could not add: you already have it or three favorites.\n".to_string())
                    }
                    SuggestionPick::Added { replacement } => {
                        match replacement {
                            Some(next) => self.suggestion_grid[n - 1] = next,
                            None => {
                                self.suggestion_grid.remove(n - 1);
                            }
                        }
                        Ok(self.preferences_screen())
                    }
                }
            }
            Command::Go(genres) => {
                self.session.confirm_preferences(genres)?;
                Ok(format!(
                    "Ready! You have {} spins. Type `spin`.\n",
                    self.session.spins_left()
                ))
            }
            Command::Spin => {
                let result = self.session.spin().await;
                self.spin_screen(result)
            }
            Command::Watched => {
                let result = self.session.mark_watched().await;
                self.spin_screen(result)
            }
            Command::Gallery => {
                let movies = self.session.open_gallery()?;
                Ok(render::render_gallery(&movies, &self.ctx))
            }
            Command::Back => {
                self.session.back_to_preferences()?;
                Ok(self.preferences_screen())
            }
            Command::Help => Ok(render::HELP.to_string()),
            Command::Quit => Ok("Bye!\n".to_string()),
        }
    }

    /// Reads commands until `quit` or end of input
    pub async fn run<R, W>(&mut self, input: R, mut output: W) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        output
            .write_all(b"Movie roulette. Type `login google` or `login guest` to start, `help` for commands.\n")
            .await?;

        let mut lines = input.lines();
        loop {
            output.write_all(b"> ").await?;
            output.flush().await?;

            let Some(line) = lines.next_line().await? else {
                break;
            };
            if line.trim().is_empty() {
                continue;
            }

            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(e) => {
                    output.write_all(format!("{}\n", e.user_message()).as_bytes()).await?;
                    continue;
                }
            };
            let quit = command == Command::Quit;

            let text = match self.execute(command).await {
                Ok(text) => text,
                Err(e) => {
                    tracing::debug!(error = %e, "Command failed");
                    format!("{}\n", e.user_message())
                }
            };
            output.write_all(text.as_bytes()).await?;

            if quit {
                break;
            }
        }

        output.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            "login guest".parse::<Command>().unwrap(),
            Command::Login(LoginMethod::Guest)
        );
        assert_eq!(
            "  search  the matrix ".parse::<Command>().unwrap(),
            Command::Search("the matrix".to_string())
        );
        assert_eq!("fav 2".parse::<Command>().unwrap(), Command::Fav(2));
        assert_eq!("PICK 12".parse::<Command>().unwrap(), Command::Pick(12));
        assert_eq!("spin".parse::<Command>().unwrap(), Command::Spin);
        assert_eq!("exit".parse::<Command>().unwrap(), Command::Quit);
    }

    #[test]
    fn test_parse_go_genres() {
        assert_eq!(
            "go 28,12 878".parse::<Command>().unwrap(),
            Command::Go(vec![28, 12, 878])
        );
        assert_eq!("go".parse::<Command>().unwrap(), Command::Go(vec![]));
        assert!("go action".parse::<Command>().is_err());
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!("fav 0".parse::<Command>().is_err());
        assert!("pick x".parse::<Command>().is_err());
        assert!("login facebook".parse::<Command>().is_err());
        assert!(matches!(
            "dance".parse::<Command>(),
            Err(AppError::InvalidInput(_))
        ));
    }
}
