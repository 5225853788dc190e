use std::sync::Arc;

use cine_roulette::{
    console::Console,
    services::TmdbClient,
    session::{SessionManager, SimulatedAuthenticator},
    Config,
};
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they don't interleave with the screens on stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("cine_roulette=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    tracing::info!(
        api_url = %config.tmdb_api_url,
        language = %config.tmdb_language,
        region = %config.tmdb_region,
        "Configuration loaded"
    );

    let catalog = Arc::new(TmdbClient::from_config(&config));
    let session = SessionManager::new(catalog, Box::new(SimulatedAuthenticator));

    let mut console = Console::new(session, &config);
    console
        .run(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await
}
