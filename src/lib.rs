//! Movie roulette: pick genres and favorite movies, spin, and get a random
//! recommendation from TMDb that you have not watched yet this session.

pub mod config;
pub mod console;
pub mod error;
pub mod models;
pub mod services;
pub mod session;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use session::SessionManager;
