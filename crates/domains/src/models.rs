//! # Domain Models
//!
//! These structs represent the core entities of Quillpress.
//! We use UUID v4 for globally unique identification.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An author account. Created via the seed/console path only — there is no
/// self-serve signup endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    /// Always stored normalized: trimmed and lower-cased.
    pub email: String,
    /// Argon2 hash, never the plaintext.
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for [`Account`]. The email must already be normalized and
/// the hash already computed by the identity service.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// A blog post. Soft deletion is modeled by `discarded_at`: `None` means
/// active, `Some(ts)` means discarded. `is_published` is an independent axis
/// and survives discard/restore unchanged, so all four combinations of the
/// two fields are reachable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    /// Derived from the title; unique among non-discarded posts.
    pub slug: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub featured_image_url: Option<String>,
    pub views_count: i64,
    pub is_published: bool,
    pub discarded_at: Option<DateTime<Utc>>,
    pub account_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn is_discarded(&self) -> bool {
        self.discarded_at.is_some()
    }

    /// Visible to the public: published and not discarded.
    pub fn is_publicly_visible(&self) -> bool {
        self.is_published && self.discarded_at.is_none()
    }
}

/// A post together with its eagerly-fetched categories, as returned by the
/// owner listing (one batch query for all join rows, not one per post).
#[derive(Debug, Clone)]
pub struct PostWithCategories {
    pub post: Post,
    pub categories: Vec<Category>,
}

/// Insert payload for [`Post`]. Slug is derived by the caller before the
/// repository ever sees the record.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub featured_image_url: Option<String>,
    pub is_published: bool,
    pub account_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Update payload for [`Post`]. The slug carries the recomputed value when
/// the title changed, otherwise the existing one.
#[derive(Debug, Clone)]
pub struct PostChanges {
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub featured_image_url: Option<String>,
    pub is_published: bool,
    pub updated_at: DateTime<Utc>,
}

/// A post category. Not ownership-scoped: any authenticated actor may manage
/// the shared category list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_post() -> Post {
        Post {
            id: Uuid::new_v4(),
            title: "Hello".into(),
            slug: "hello".into(),
            content: "Some content here".into(),
            excerpt: None,
            featured_image_url: None,
            views_count: 0,
            is_published: false,
            discarded_at: None,
            account_id: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn draft_is_not_publicly_visible() {
        let post = sample_post();
        assert!(!post.is_discarded());
        assert!(!post.is_publicly_visible());
    }

    #[test]
    fn published_flag_alone_does_not_survive_discard_visibility() {
        // All four combinations of (is_published, discarded_at) are reachable;
        // only published + active is public.
        let mut post = sample_post();
        post.is_published = true;
        assert!(post.is_publicly_visible());

        post.discarded_at = Some(Utc::now());
        assert!(post.is_discarded());
        assert!(!post.is_publicly_visible());
        // The flag itself is retained through discard.
        assert!(post.is_published);
    }
}
