//! Use-case layer for Quillpress.
//!
//! Services orchestrate the domain ports: identity (register/authenticate),
//! session lifecycle, the access gate's public/protected decision, and the
//! content store with its publication state machine.

pub mod content;
pub mod error;
pub mod gate;
pub mod identity;
pub mod session;

pub use content::ContentService;
pub use error::ServiceError;
pub use identity::IdentityService;
pub use session::SessionManager;
