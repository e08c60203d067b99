//! Process entry point: env config, pool, optional startup migrations,
//! router, generated API docs, serve.

use std::net::Ipv4Addr;

use axum::routing::get;
use axum::{Json, Router};
use sqlx::postgres::PgPoolOptions;
use tedly::config::{AppConfig, POOL_MAX_CONNECTIONS, POOL_MIN_CONNECTIONS};
use tedly::openapi::openapi_with_server;
use tedly::{app_router, apply_migrations, AppState};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("tedly=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    let pool = PgPoolOptions::new()
        .min_connections(POOL_MIN_CONNECTIONS)
        .max_connections(POOL_MAX_CONNECTIONS)
        .connect_with(config.connect_options())
        .await?;

    if config.run_migrations_on_start {
        tracing::info!("Running database migrations...");
        apply_migrations(&pool).await?;
        tracing::info!("Database migrations completed successfully");
    } else {
        tracing::info!("Skipping automatic migrations. To enable, set RUN_MIGRATIONS_ON_START=true");
    }

    let doc = openapi_with_server(&config.base_url);
    let state = AppState { pool };
    let app = Router::new().merge(app_router(state)).route(
        "/api-docs/openapi.json",
        get(move || {
            let doc = doc.clone();
            async move { Json(doc) }
        }),
    );

    let listener = TcpListener::bind((Ipv4Addr::UNSPECIFIED, config.port)).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
