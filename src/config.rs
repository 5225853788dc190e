use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDb API key, sent as the `api_key` query parameter
    pub tmdb_api_key: String,

    /// TMDb API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Language/locale sent with every request
    #[serde(default = "default_tmdb_language")]
    pub tmdb_language: String,

    /// Region code used to pick watch providers
    #[serde(default = "default_tmdb_region")]
    pub tmdb_region: String,

    /// Base URL for poster images
    #[serde(default = "default_tmdb_image_url")]
    pub tmdb_image_url: String,

    /// Base URL for provider logos
    #[serde(default = "default_tmdb_logo_url")]
    pub tmdb_logo_url: String,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_tmdb_language() -> String {
    "pt-BR".to_string()
}

fn default_tmdb_region() -> String {
    "BR".to_string()
}

fn default_tmdb_image_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_tmdb_logo_url() -> String {
    "https://image.tmdb.org/t/p/w92".to_string()
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied() {
        let vars = vec![("TMDB_API_KEY".to_string(), "secret".to_string())];
        let config: Config = envy::from_iter(vars).unwrap();

        assert_eq!(config.tmdb_api_key, "secret");
        assert_eq!(config.tmdb_api_url, "https://api.themoviedb.org/3");
        assert_eq!(config.tmdb_language, "pt-BR");
        assert_eq!(config.tmdb_region, "BR");
        assert_eq!(config.tmdb_image_url, "https://image.tmdb.org/t/p/w500");
        assert_eq!(config.tmdb_logo_url, "https://image.tmdb.org/t/p/w92");
    }

    #[test]
    fn test_overrides() {
        let vars = vec![
            ("TMDB_API_KEY".to_string(), "secret".to_string()),
            ("TMDB_LANGUAGE".to_string(), "en-US".to_string()),
            ("TMDB_REGION".to_string(), "US".to_string()),
        ];
        let config: Config = envy::from_iter(vars).unwrap();

        assert_eq!(config.tmdb_language, "en-US");
        assert_eq!(config.tmdb_region, "US");
    }

    #[test]
    fn test_missing_api_key_fails() {
        let vars: Vec<(String, String)> = vec![];
        let result = envy::from_iter::<_, Config>(vars);
        assert!(result.is_err());
    }
}
