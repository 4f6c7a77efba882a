//! Repository trait for short link data access.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing short links.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new short link with zero clicks.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the code already exists.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Lists every link, newest first.
    async fn list_all(&self) -> Result<Vec<Link>, AppError>;

    /// Adds one click and stamps `last_clicked` with the current time.
    ///
    /// Unknown codes are a no-op, not an error.
    async fn increment_clicks(&self, code: &str) -> Result<(), AppError>;

    /// Hard-deletes a link.
    ///
    /// Returns `Ok(true)` if a row was removed, `Ok(false)` if the code was unknown.
    async fn delete(&self, code: &str) -> Result<bool, AppError>;

    /// Counts stored links.
    async fn count(&self) -> Result<i64, AppError>;
}
