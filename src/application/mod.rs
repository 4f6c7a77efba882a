//! Application layer services implementing business logic.
//!
//! Services coordinate validation, code generation, and repository calls,
//! and give HTTP handlers a small API to work with.
//!
//! - [`services::link_service::LinkService`] - Short link creation, lookup, and deletion

pub mod services;
