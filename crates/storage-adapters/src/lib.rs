//! # storage-adapters
//!
//! SQLite (sqlx) implementations of the repository ports, plus pool setup and
//! embedded migrations.

pub mod accounts;
pub mod categories;
pub mod posts;

use std::str::FromStr;

use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

pub use accounts::SqliteAccountRepo;
pub use categories::SqliteCategoryRepo;
pub use posts::SqlitePostRepo;

pub static MIGRATOR: Migrator = sqlx::migrate!();

/// Opens (creating if missing) a database at `url` and applies migrations.
pub async fn connect(url: &str) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal);
    let pool = SqlitePoolOptions::new().connect_with(options).await?;
    MIGRATOR.run(&pool).await?;
    Ok(pool)
}

/// In-memory database for tests. Pinned to a single connection: each SQLite
/// `:memory:` connection is its own database.
pub async fn connect_in_memory() -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;
    MIGRATOR.run(&pool).await?;
    Ok(pool)
}

/// Maps a sqlx error to the domain's repo error, recognizing SQLite unique
/// constraint messages like `UNIQUE constraint failed: posts.slug`.
pub(crate) fn map_sqlx_error(err: sqlx::Error) -> domains::error::RepoError {
    use domains::error::RepoError;

    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            let message = db.message().to_string();
            let field = if message.contains("accounts.email") {
                "email"
            } else if message.contains("posts.slug") {
                "slug"
            } else if message.contains("categories.") {
                "name"
            } else if message.contains("post_categories") {
                "categories"
            } else {
                "record"
            };
            return RepoError::UniqueViolation { field };
        }
    }
    RepoError::Internal(err.into())
}
