/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("No new movies found matching these criteria")]
    NoCandidates,

    #[error("No user is logged in")]
    NotLoggedIn,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// True for failures talking to the movie API (transport or status)
    pub fn is_communication(&self) -> bool {
        matches!(self, AppError::HttpClient(_) | AppError::ExternalApi(_))
    }

    /// Text shown to the user when an operation fails
    pub fn user_message(&self) -> String {
        match self {
            AppError::HttpClient(_) | AppError::ExternalApi(_) => {
                "Failed to communicate with the movie API.".to_string()
            }
            AppError::NoCandidates => "No new movies found matching these criteria.".to_string(),
            AppError::NotLoggedIn => "Please log in first.".to_string(),
            AppError::InvalidInput(msg) => msg.clone(),
            AppError::Internal(_) => "Something went wrong, please try again.".to_string(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
