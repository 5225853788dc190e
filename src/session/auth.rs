/// Login strategies
///
/// Logging in only establishes who is using the roulette; nothing is
/// verified. The trait is the seam where a real identity provider would
/// plug in.
use crate::{
    error::{AppError, AppResult},
    models::User,
};
use std::str::FromStr;

/// How the user chose to log in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginMethod {
    Google,
    Guest,
}

impl FromStr for LoginMethod {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "google" => Ok(LoginMethod::Google),
            "guest" => Ok(LoginMethod::Guest),
            other => Err(AppError::InvalidInput(format!(
                "Unknown login method '{}', use 'google' or 'guest'",
                other
            ))),
        }
    }
}

/// Trait for login providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait Authenticator: Send + Sync {
    /// Resolves the user for a login attempt
    async fn authenticate(&self, method: LoginMethod) -> AppResult<User>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Accepts every login without verification
#[derive(Debug, Clone, Default)]
pub struct SimulatedAuthenticator;

#[async_trait::async_trait]
impl Authenticator for SimulatedAuthenticator {
    async fn authenticate(&self, method: LoginMethod) -> AppResult<User> {
        let user = match method {
            LoginMethod::Google => User::named("Alex"),
            LoginMethod::Guest => User::guest(),
        };
        Ok(user)
    }

    fn name(&self) -> &'static str {
        "simulated"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_login_method() {
        assert_eq!("google".parse::<LoginMethod>().unwrap(), LoginMethod::Google);
        assert_eq!(" Guest ".parse::<LoginMethod>().unwrap(), LoginMethod::Guest);
        assert!(matches!(
            "github".parse::<LoginMethod>(),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_simulated_google_login() {
        let user = SimulatedAuthenticator
            .authenticate(LoginMethod::Google)
            .await
            .unwrap();
        assert_eq!(user.first_name(), "Alex");
        assert!(!user.is_anonymous);
    }

    #[tokio::test]
    async fn test_simulated_guest_login() {
        let user = SimulatedAuthenticator
            .authenticate(LoginMethod::Guest)
            .await
            .unwrap();
        assert!(user.is_anonymous);
        assert_eq!(SimulatedAuthenticator.name(), "simulated");
    }
}
