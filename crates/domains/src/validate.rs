//! Field validation rules for accounts and posts.
//!
//! Rules are pure and accumulate into [`ValidationErrors`] so a submitting
//! form can be re-rendered with every message at once.

use uuid::Uuid;

use crate::error::ValidationErrors;
use crate::slug::derive_slug;

pub const TITLE_MIN: usize = 3;
pub const TITLE_MAX: usize = 200;
pub const CONTENT_MIN: usize = 10;
pub const CONTENT_MAX: usize = 1_000_000;
pub const EXCERPT_MAX: usize = 500;
pub const PASSWORD_MIN: usize = 6;

/// A submitted post form, after the HTTP layer has mapped empty optional
/// fields to `None`.
#[derive(Debug, Clone, Default)]
pub struct PostInput {
    pub title: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub featured_image_url: Option<String>,
    pub is_published: bool,
    pub category_ids: Vec<Uuid>,
}

/// Lower-cases and trims an email. Applied before every comparison and every
/// persistence, so uniqueness is effectively case-insensitive.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_ascii_lowercase()
}

/// Minimal structural check: one `@`, non-empty local part, domain with a dot
/// and no whitespace. Deliverability is not our problem.
pub fn email_is_valid(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && domain.len() >= 3
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.chars().any(char::is_whitespace)
}

/// Validates a registration submission. `email` must already be normalized.
pub fn validate_registration(email: &str, password: &str) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    if !email_is_valid(email) {
        errors.add("email", "is not a valid email address");
    }
    if password.chars().count() < PASSWORD_MIN {
        errors.add(
            "password",
            format!("is too short (minimum is {PASSWORD_MIN} characters)"),
        );
    }
    errors
}

/// Only plain web URLs are allowed for the featured image; `javascript:` and
/// `data:` schemes must never reach a template.
pub fn image_url_is_valid(url: &str) -> bool {
    let lower = url.trim().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Runs every post invariant over a submission. Character counts, not bytes.
pub fn validate_post(input: &PostInput) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    let title_len = input.title.chars().count();
    if title_len < TITLE_MIN {
        errors.add(
            "title",
            format!("is too short (minimum is {TITLE_MIN} characters)"),
        );
    } else if title_len > TITLE_MAX {
        errors.add(
            "title",
            format!("is too long (maximum is {TITLE_MAX} characters)"),
        );
    } else if derive_slug(&input.title).is_empty() {
        errors.add("title", "must contain at least one letter or digit");
    }

    let content_len = input.content.chars().count();
    if content_len < CONTENT_MIN {
        errors.add(
            "content",
            format!("is too short (minimum is {CONTENT_MIN} characters)"),
        );
    } else if content_len > CONTENT_MAX {
        errors.add(
            "content",
            format!("is too long (maximum is {CONTENT_MAX} characters)"),
        );
    }

    if let Some(excerpt) = &input.excerpt {
        if excerpt.chars().count() > EXCERPT_MAX {
            errors.add(
                "excerpt",
                format!("is too long (maximum is {EXCERPT_MAX} characters)"),
            );
        }
    }

    if let Some(url) = &input.featured_image_url {
        if !image_url_is_valid(url) {
            errors.add("featured_image_url", "must be an http or https URL");
        }
    }

    errors
}

/// Validates a category name. Uniqueness is left to the storage constraint.
pub fn validate_category(name: &str) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    if name.trim().is_empty() {
        errors.add("name", "can't be blank");
    } else if derive_slug(name).is_empty() {
        errors.add("name", "must contain at least one letter or digit");
    }
    errors
}
