//! Core domain layer for Quillpress.
//!
//! Pure models, validation rules, and the port traits that adapter crates
//! implement. Nothing in here performs I/O.

pub mod error;
pub mod models;
pub mod ports;
pub mod session;
pub mod slug;
pub mod validate;

pub use error::{FieldError, RepoError, ValidationErrors};
pub use models::{Account, Category, NewAccount, NewPost, Post, PostChanges, PostWithCategories};
pub use session::{SessionClaims, SessionState};
