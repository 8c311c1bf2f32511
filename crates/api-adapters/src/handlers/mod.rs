//! Request handlers, grouped the way the routing table reads: public pages,
//! session lifecycle, owner-scoped post management, categories.

pub mod categories;
pub mod posts;
pub mod public;
pub mod sessions;
