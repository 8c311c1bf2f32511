//! Seeds a development database with one author and a handful of posts.
//!
//! Idempotence is not a goal: run it once against a fresh database, or
//! expect unique-constraint validation errors on the second run.

use std::sync::Arc;

use auth_adapters::Argon2Hasher;
use configs::AppConfig;
use domains::validate::PostInput;
use services::{ContentService, IdentityService};
use storage_adapters::{SqliteAccountRepo, SqliteCategoryRepo, SqlitePostRepo};

const SEED_EMAIL: &str = "author@example.com";
const SEED_PASSWORD: &str = "correct horse battery staple";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();

    let cfg = AppConfig::load()?;
    let pool = storage_adapters::connect(&cfg.database.url).await?;

    let accounts = Arc::new(SqliteAccountRepo::new(pool.clone()));
    let identity = IdentityService::new(accounts, Arc::new(Argon2Hasher));
    let content = ContentService::new(
        Arc::new(SqlitePostRepo::new(pool.clone())),
        Arc::new(SqliteCategoryRepo::new(pool)),
    );

    let author = identity.register(SEED_EMAIL, SEED_PASSWORD).await?;
    tracing::info!(email = SEED_EMAIL, "seed account created");

    let rust = content.create_category("Rust").await?;
    let meta = content.create_category("Meta").await?;

    content
        .create_post(
            author.id,
            PostInput {
                title: "Hello, QuillPress".to_string(),
                content: "This is the first post on a freshly seeded instance. \
                          Log in with the seed account to start writing."
                    .to_string(),
                excerpt: Some("A freshly seeded instance says hello.".to_string()),
                featured_image_url: None,
                is_published: true,
                category_ids: vec![meta.id],
            },
        )
        .await?;

    content
        .create_post(
            author.id,
            PostInput {
                title: "Drafting in the open".to_string(),
                content: "Drafts stay invisible to readers until published. \
                          This one is waiting in the admin dashboard."
                    .to_string(),
                excerpt: None,
                featured_image_url: None,
                is_published: false,
                category_ids: vec![rust.id, meta.id],
            },
        )
        .await?;

    tracing::info!("seeded two posts and two categories");
    println!("seeded {SEED_EMAIL} (password: {SEED_PASSWORD})");
    Ok(())
}
