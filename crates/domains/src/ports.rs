//! # Core Traits (Ports)
//!
//! Adapter crates implement these traits; services only ever see the trait
//! objects. The `testing` feature exposes mockall-generated `MockXxx` types
//! for external test crates.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::RepoError;
use crate::models::{Account, Category, NewAccount, NewPost, Post, PostChanges, PostWithCategories};
use crate::session::SessionClaims;

/// Account persistence. Emails arrive already normalized.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait AccountRepo: Send + Sync {
    /// Fails with `RepoError::UniqueViolation { field: "email" }` when the
    /// normalized email is already taken, including when two registrations
    /// race past the application-level check.
    async fn insert(&self, account: NewAccount) -> Result<Account, RepoError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, RepoError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, RepoError>;
}

/// Post persistence, including the category join and the view counter.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait PostRepo: Send + Sync {
    /// Inserts the post and its category join rows in one transaction.
    /// Slug collisions among active posts surface as
    /// `UniqueViolation { field: "slug" }`.
    async fn insert(&self, post: NewPost, category_ids: Vec<Uuid>) -> Result<Post, RepoError>;

    /// Applies field changes and replaces the category set, transactionally.
    async fn update(
        &self,
        id: Uuid,
        changes: PostChanges,
        category_ids: Vec<Uuid>,
    ) -> Result<Post, RepoError>;

    /// Newest-published-first public listing; never touches view counts.
    async fn list_published(&self, limit: i64) -> Result<Vec<Post>, RepoError>;

    /// Owner's posts, newest-created-first, categories eager-fetched with a
    /// single batch query.
    async fn list_owned(
        &self,
        owner_id: Uuid,
        include_discarded: bool,
    ) -> Result<Vec<PostWithCategories>, RepoError>;

    /// Filters to `is_published AND discarded_at IS NULL`.
    async fn find_published_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError>;

    /// Owner-scoped lookup: the scoping IS the authorization boundary. A slug
    /// owned by someone else comes back `None`, indistinguishable from a slug
    /// that does not exist.
    async fn find_owned_by_slug(
        &self,
        owner_id: Uuid,
        slug: &str,
        include_discarded: bool,
    ) -> Result<Option<Post>, RepoError>;

    /// Categories of a single post, for the public post page and edit form.
    async fn categories_of(&self, post_id: Uuid) -> Result<Vec<Category>, RepoError>;

    /// Sets or clears the discard timestamp. Leaves `is_published` alone.
    async fn set_discarded(
        &self,
        id: Uuid,
        discarded_at: Option<chrono::DateTime<chrono::Utc>>,
    ) -> Result<(), RepoError>;

    /// Single server-side `views_count = views_count + 1`. Must be atomic at
    /// the storage layer; concurrent calls may never lose an increment.
    async fn increment_views(&self, id: Uuid) -> Result<(), RepoError>;
}

/// Category persistence. No ownership scoping.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait CategoryRepo: Send + Sync {
    /// `UniqueViolation { field: "name" }` on duplicates.
    async fn insert(&self, category: Category) -> Result<Category, RepoError>;
    async fn delete(&self, id: Uuid) -> Result<bool, RepoError>;
    async fn list(&self) -> Result<Vec<Category>, RepoError>;
}

/// One-way password hashing.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, plaintext: &str) -> Result<String, anyhow::Error>;
    /// False on any mismatch or unparsable hash; never errors.
    fn verify(&self, plaintext: &str, hash: &str) -> bool;
}

/// Signing and verification of the opaque session token.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait SessionCodec: Send + Sync {
    fn encode(&self, claims: &SessionClaims) -> String;
    /// `None` for anything that is not a well-formed token signed by us.
    fn decode(&self, token: &str) -> Option<SessionClaims>;
}
