use anyhow::Context;
use tracing_subscriber::EnvFilter;

use club_manager_api::database::DatabaseManager;
use club_manager_api::{build_router, AppConfig, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL and the role secrets.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=info,sqlx=warn")),
        )
        .init();

    let config = AppConfig::from_env().context("invalid configuration")?;
    tracing::info!("Starting club manager API in {:?} mode", config.environment);

    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to the database")?;

    if config.database.run_migrations {
        DatabaseManager::migrate(&pool).await.context("failed to run migrations")?;
    }

    let bind_addr = config.bind_addr();
    let state = AppState::from_config(pool, config).context("failed to set up media or email")?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    tracing::info!("Listening on http://{}", bind_addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
