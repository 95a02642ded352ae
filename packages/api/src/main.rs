use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use api::config::AppConfig;
use api::state::AppState;
use api::{build_router, database, seed};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_target(false)
        .init();

    let config = AppConfig::load().context("Failed to load config")?;

    let db = database::init_db(&config.database)
        .await
        .context("Failed to initialize database")?;

    seed::ensure_indexes(&db)
        .await
        .context("Failed to ensure indexes")?;
    if config.seed.categories {
        seed::seed_categories(&db)
            .await
            .context("Failed to seed categories")?;
    }
    if config.seed.demo_listings {
        seed::seed_demo_listings(&db)
            .await
            .context("Failed to seed demo listings")?;
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!(
        origins = ?config.server.cors.allow_origins,
        "Yellow Book API listening on http://{}",
        addr
    );

    let app = build_router(AppState { db, config });

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}
