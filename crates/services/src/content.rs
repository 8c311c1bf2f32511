//! The content store service: post CRUD, the publication state machine, the
//! category list, and the public read path with its view-count side effect.
//!
//! Ownership scoping happens inside the repository lookup
//! (`find_owned_by_slug`), not as an after-the-fact check, so the
//! "404, never 403" policy cannot be forgotten by an individual endpoint.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use domains::error::ValidationErrors;
use domains::models::{Category, NewPost, Post, PostChanges, PostWithCategories};
use domains::ports::{CategoryRepo, PostRepo};
use domains::slug::derive_slug;
use domains::validate::{validate_category, validate_post, PostInput};

use crate::error::ServiceError;

/// How many published posts the home page shows.
pub const HOME_PAGE_LIMIT: i64 = 20;

pub struct ContentService {
    posts: Arc<dyn PostRepo>,
    categories: Arc<dyn CategoryRepo>,
}

impl ContentService {
    pub fn new(posts: Arc<dyn PostRepo>, categories: Arc<dyn CategoryRepo>) -> Self {
        Self { posts, categories }
    }

    // ── Public read side ────────────────────────────────────────────────────

    /// Home page listing. View counts are untouched here.
    pub async fn list_published(&self) -> Result<Vec<Post>, ServiceError> {
        Ok(self.posts.list_published(HOME_PAGE_LIMIT).await?)
    }

    /// One successful public read of a published, non-discarded post — the
    /// only place the view counter is incremented.
    #[tracing::instrument(skip(self))]
    pub async fn read_published(
        &self,
        slug: &str,
    ) -> Result<(Post, Vec<Category>), ServiceError> {
        let Some(mut post) = self.posts.find_published_by_slug(slug).await? else {
            return Err(ServiceError::NotFound("post"));
        };
        self.posts.increment_views(post.id).await?;
        post.views_count += 1; // reflect the increment we just made
        let categories = self.posts.categories_of(post.id).await?;
        Ok((post, categories))
    }

    // ── Owner side ──────────────────────────────────────────────────────────

    /// The owner's admin listing: everything they own, discarded included,
    /// newest first, categories fetched in one batch.
    pub async fn list_owned(
        &self,
        owner_id: Uuid,
    ) -> Result<Vec<PostWithCategories>, ServiceError> {
        Ok(self.posts.list_owned(owner_id, true).await?)
    }

    /// Owner-scoped fetch for the edit form. Never increments views.
    pub async fn find_owned(
        &self,
        owner_id: Uuid,
        slug: &str,
    ) -> Result<(Post, Vec<Category>), ServiceError> {
        let Some(post) = self.posts.find_owned_by_slug(owner_id, slug, false).await? else {
            return Err(ServiceError::NotFound("post"));
        };
        let categories = self.posts.categories_of(post.id).await?;
        Ok((post, categories))
    }

    #[tracing::instrument(skip(self, input), fields(title = %input.title))]
    pub async fn create_post(
        &self,
        owner_id: Uuid,
        input: PostInput,
    ) -> Result<Post, ServiceError> {
        let errors = validate_post(&input);
        if !errors.is_empty() {
            return Err(ServiceError::Validation(errors));
        }

        let now = Utc::now();
        let post = NewPost {
            id: Uuid::new_v4(),
            slug: derive_slug(&input.title),
            title: input.title,
            content: input.content,
            excerpt: input.excerpt,
            featured_image_url: input.featured_image_url,
            is_published: input.is_published,
            account_id: owner_id,
            created_at: now,
        };
        let post = self.posts.insert(post, input.category_ids).await?;
        tracing::info!(post_id = %post.id, slug = %post.slug, "post created");
        Ok(post)
    }

    /// Updates a post the caller owns. The slug is recomputed exactly when
    /// the title changed; uniqueness among active posts is re-checked by the
    /// storage constraint on write.
    #[tracing::instrument(skip(self, input))]
    pub async fn update_post(
        &self,
        owner_id: Uuid,
        slug: &str,
        input: PostInput,
    ) -> Result<Post, ServiceError> {
        let Some(existing) = self.posts.find_owned_by_slug(owner_id, slug, false).await? else {
            return Err(ServiceError::NotFound("post"));
        };

        let errors = validate_post(&input);
        if !errors.is_empty() {
            return Err(ServiceError::Validation(errors));
        }

        let new_slug = if input.title == existing.title {
            existing.slug.clone()
        } else {
            derive_slug(&input.title)
        };
        let changes = PostChanges {
            title: input.title,
            slug: new_slug,
            content: input.content,
            excerpt: input.excerpt,
            featured_image_url: input.featured_image_url,
            is_published: input.is_published,
            updated_at: Utc::now(),
        };
        Ok(self
            .posts
            .update(existing.id, changes, input.category_ids)
            .await?)
    }

    // ── Publication state machine ───────────────────────────────────────────

    /// {Draft, Published} → Discarded. Sets the timestamp only; the
    /// published flag is deliberately left as it was, so restore brings the
    /// post back exactly as visible (or not) as before.
    #[tracing::instrument(skip(self))]
    pub async fn discard(&self, owner_id: Uuid, slug: &str) -> Result<Post, ServiceError> {
        let Some(mut post) = self.posts.find_owned_by_slug(owner_id, slug, false).await? else {
            return Err(ServiceError::NotFound("post"));
        };
        let now = Utc::now();
        self.posts.set_discarded(post.id, Some(now)).await?;
        post.discarded_at = Some(now);
        tracing::info!(post_id = %post.id, "post discarded");
        Ok(post)
    }

    /// Discarded → whichever of {Draft, Published} it was at discard time.
    #[tracing::instrument(skip(self))]
    pub async fn restore(&self, owner_id: Uuid, slug: &str) -> Result<Post, ServiceError> {
        let Some(mut post) = self.posts.find_owned_by_slug(owner_id, slug, true).await? else {
            return Err(ServiceError::NotFound("post"));
        };
        if post.discarded_at.is_none() {
            // Active posts have nothing to restore.
            return Err(ServiceError::NotFound("post"));
        }
        self.posts.set_discarded(post.id, None).await?;
        post.discarded_at = None;
        tracing::info!(post_id = %post.id, "post restored");
        Ok(post)
    }

    // ── Categories (no ownership scoping) ───────────────────────────────────

    pub async fn list_categories(&self) -> Result<Vec<Category>, ServiceError> {
        Ok(self.categories.list().await?)
    }

    #[tracing::instrument(skip(self))]
    pub async fn create_category(&self, name: &str) -> Result<Category, ServiceError> {
        let name = name.trim();
        let errors = validate_category(name);
        if !errors.is_empty() {
            return Err(ServiceError::Validation(errors));
        }
        let category = Category {
            id: Uuid::new_v4(),
            name: name.to_string(),
            slug: derive_slug(name),
        };
        Ok(self.categories.insert(category).await?)
    }

    /// Removes a category; join rows cascade, posts are untouched.
    pub async fn delete_category(&self, id: Uuid) -> Result<(), ServiceError> {
        if self.categories.delete(id).await? {
            Ok(())
        } else {
            Err(ServiceError::NotFound("category"))
        }
    }
}
