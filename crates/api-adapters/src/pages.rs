//! Askama page types. Presentation is deliberately bare: semantic HTML with
//! no styling ambition.

use askama::Template;
use uuid::Uuid;

use domains::models::{Category, Post, PostWithCategories};

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomePage {
    pub signed_in: bool,
    pub posts: Vec<Post>,
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginPage {
    pub signed_in: bool,
    pub error: Option<String>,
    pub notice: Option<String>,
    /// Submitted value, echoed back on a failed attempt.
    pub email: String,
}

#[derive(Template)]
#[template(path = "admin.html")]
pub struct AdminPage {
    pub signed_in: bool,
    pub posts: Vec<PostWithCategories>,
}

#[derive(Template)]
#[template(path = "post.html")]
pub struct PostPage {
    pub signed_in: bool,
    pub post: Post,
    pub categories: Vec<Category>,
}

/// Field values for the post form — either blank defaults or the submitted
/// values being re-rendered alongside validation errors.
pub struct PostFormValues {
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub featured_image_url: String,
    pub is_published: bool,
}

impl Default for PostFormValues {
    fn default() -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            excerpt: String::new(),
            featured_image_url: String::new(),
            is_published: false,
        }
    }
}

pub struct CategoryOption {
    pub id: Uuid,
    pub name: String,
    pub checked: bool,
}

#[derive(Template)]
#[template(path = "post_form.html")]
pub struct PostFormPage {
    pub signed_in: bool,
    pub heading: String,
    /// Submit target: `/posts` for create, `/posts/{slug}?_method=patch`
    /// for update.
    pub action: String,
    pub errors: Vec<String>,
    pub form: PostFormValues,
    pub categories: Vec<CategoryOption>,
}

#[derive(Template)]
#[template(path = "categories.html")]
pub struct CategoriesPage {
    pub signed_in: bool,
    pub errors: Vec<String>,
    /// Echoed name field on a failed create.
    pub name: String,
    pub categories: Vec<Category>,
}
