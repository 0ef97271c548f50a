use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use team_trivia::{config::ServerConfig, router, state::AppState, types::GameConfig};

#[tokio::main]
async fn main() {
    // Load .env file if present (before any env var reads)
    if let Err(e) = dotenvy::dotenv() {
        // Not an error if .env doesn't exist, only log if it's a different issue
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "team_trivia=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting team trivia...");

    let server_config = ServerConfig::from_env();
    let game_config = GameConfig::from_env();
    tracing::info!(
        "Teams of {}, {} questions at {}s each",
        game_config.team_capacity,
        game_config.questions_per_game,
        game_config.question_seconds
    );

    let state = Arc::new(AppState::with_config(game_config));
    let app = router(state, &server_config.static_dir);

    tracing::info!("Listening on http://{}", server_config.bind);

    let listener = match tokio::net::TcpListener::bind(server_config.bind).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", server_config.bind, e);
            std::process::exit(1);
        }
    };
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
    }
}
