//! QuillPress server binary: wires adapters to services and serves HTTP.

use std::sync::Arc;

use chrono::Duration;
use secrecy::ExposeSecret;
use tracing_subscriber::EnvFilter;

use api_adapters::{build_router, AppState};
use auth_adapters::{Argon2Hasher, HmacSessionCodec};
use configs::AppConfig;
use services::{ContentService, IdentityService, SessionManager};
use storage_adapters::{SqliteAccountRepo, SqliteCategoryRepo, SqlitePostRepo};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,quillpress=debug")),
        )
        .init();

    let cfg = AppConfig::load()?;

    let pool = storage_adapters::connect(&cfg.database.url).await?;
    tracing::info!(url = %cfg.database.url, "database ready");

    let accounts = Arc::new(SqliteAccountRepo::new(pool.clone()));
    let posts = Arc::new(SqlitePostRepo::new(pool.clone()));
    let categories = Arc::new(SqliteCategoryRepo::new(pool));

    let hasher = Arc::new(Argon2Hasher);
    let codec = Arc::new(HmacSessionCodec::new(
        cfg.session.secret.expose_secret().as_bytes(),
    ));

    let state = AppState {
        identity: Arc::new(IdentityService::new(accounts.clone(), hasher)),
        sessions: Arc::new(SessionManager::new(
            codec,
            Duration::days(cfg.session.ttl_days),
        )),
        content: Arc::new(ContentService::new(posts, categories)),
        accounts,
        cookie_name: cfg.session.cookie_name.clone(),
    };

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&cfg.http.bind).await?;
    tracing::info!(addr = %cfg.http.bind, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
