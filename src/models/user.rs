use serde::{Deserialize, Serialize};

/// The person using the roulette
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    /// Name shown in the greeting
    pub display_name: Option<String>,
    /// Guest sessions are anonymous
    pub is_anonymous: bool,
}

impl User {
    /// Creates a named user
    pub fn named(display_name: impl Into<String>) -> Self {
        Self {
            display_name: Some(display_name.into()),
            is_anonymous: false,
        }
    }

    /// Creates an anonymous guest
    pub fn guest() -> Self {
        Self {
            display_name: Some("Guest".to_string()),
            is_anonymous: true,
        }
    }

    /// First word of the display name, or "Guest"
    pub fn first_name(&self) -> &str {
        self.display_name
            .as_deref()
            .and_then(|name| name.split_whitespace().next())
            .unwrap_or("Guest")
    }

    pub fn greeting(&self) -> String {
        format!("Hello, {}!", self.first_name())
    }
}
