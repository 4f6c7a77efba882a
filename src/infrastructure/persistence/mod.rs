//! PostgreSQL repository implementations.
//!
//! Queries are runtime-checked `sqlx::query_as` calls mapped through
//! `FromRow` row types.
//!
//! - [`PgLinkRepository`] - Link storage, lookup, deletion, and click counters

pub mod pg_link_repository;

pub use pg_link_repository::PgLinkRepository;
