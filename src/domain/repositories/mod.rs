//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations; the PostgreSQL
//! implementation lives in `crate::infrastructure::persistence`. A mock is
//! generated with `mockall` for unit tests.
//!
//! # Testing
//!
//! See integration tests in `tests/repository_link.rs` for usage examples.

pub mod link_repository;

pub use link_repository::LinkRepository;

#[cfg(test)]
pub use link_repository::MockLinkRepository;
