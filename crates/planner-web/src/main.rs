//! Web interface for the AI travel planner.
//!
//! Serves the login, sign-up and planner pages as server-rendered HTML, plus
//! a small JSON API for scripted clients.

mod config;
mod cookie;
mod error;
mod markdown;
mod routes;
mod state;

use std::sync::Arc;

use database::Database;
use ollama_brain::OllamaBrain;
use planner::{AuthProvider, FirebaseAuth, FirebaseConfig, LocalAuth, Planner, SqliteStore};
use tower_http::services::ServeDir;
use tracing::info;

use crate::config::{AuthBackend, Config};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!(addr = %config.addr, "Starting planner web server");

    // Connect to database
    let db = Database::connect(&config.database_url).await?;
    db.migrate().await?;

    let generator = OllamaBrain::from_env()?;
    info!(
        host = %generator.config().host,
        model = %generator.config().model,
        "Text generator ready"
    );

    let auth: Arc<dyn AuthProvider> = match config.auth_backend {
        AuthBackend::Local => Arc::new(LocalAuth::new(db.clone())),
        AuthBackend::Firebase => Arc::new(FirebaseAuth::new(FirebaseConfig::from_env()?)?),
    };

    // Build application state
    let store = Arc::new(SqliteStore::new(db));
    let planner = Planner::new(Arc::new(generator), store, auth);
    info!(
        generator = planner.generator.generator_name(),
        auth = planner.identity.provider_name(),
        "Planner ready"
    );
    let state = AppState::new(planner, config.history_limit);

    // Build router
    let app = routes::router()
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state);

    // Start server
    info!(addr = %config.addr, "Planner web server listening");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
