//! Crop Recommendation Platform - Backend Server

use std::{net::SocketAddr, time::Duration};

use crop_server::{create_app, AppState, Config};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before the log filter and config read the environment
    dotenvy::dotenv().ok();
    init_tracing();

    let config = Config::load()?;

    tracing::info!("Starting Crop Recommendation Server");
    tracing::info!("Environment: {}", config.environment);
    tracing::debug!(weather = ?config.weather, "Weather configuration");
    if config.weather.api_key.is_empty() {
        tracing::warn!("No weather API key configured; recommendations will use rainfall 0");
    }

    // Create database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .acquire_timeout(Duration::from_secs(30))
        .connect(&config.database.url)
        .await?;

    tracing::info!("Database connection established");

    // Run migrations in development
    if config.environment == "development" {
        tracing::info!("Running database migrations...");
        sqlx::migrate!("./migrations").run(&db_pool).await?;
        tracing::info!("Migrations completed");
    }

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let state = AppState::new(db_pool, config)?;

    let seeded = state.crop_service().seed_defaults().await?;
    if seeded > 0 {
        tracing::info!("Loaded {} default crops", seeded);
    }

    let app = create_app(state);

    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Human-readable logs by default; JSON lines when `CROP_LOG_FORMAT=json`
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "crop_server=debug,tower_http=debug,sqlx=warn".into());
    let json = std::env::var("CROP_LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
