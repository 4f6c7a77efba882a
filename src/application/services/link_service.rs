//! Link creation, lookup, and deletion service.

use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{generate_code, is_valid_code, validate_custom_code};
use crate::utils::url_validator::validate_long_url;
use serde_json::json;

/// Service for creating, resolving, and deleting short links.
///
/// Validates input before it reaches the store. Generated codes are not
/// checked for collisions up front; the store's unique constraint reports
/// them as [`AppError::Conflict`].
pub struct LinkService {
    link_repository: Arc<dyn LinkRepository>,
    code_length: usize,
}

impl LinkService {
    /// Creates a new link service generating codes of `code_length` characters.
    pub fn new(link_repository: Arc<dyn LinkRepository>, code_length: usize) -> Self {
        Self {
            link_repository,
            code_length,
        }
    }

    /// Creates a short link.
    ///
    /// # Arguments
    ///
    /// - `long_url` - The redirect target, stored exactly as given
    /// - `custom_code` - Optional custom short code; a random one is generated otherwise
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL or custom code is invalid.
    /// Returns [`AppError::Conflict`] if the code already exists.
    pub async fn create_link(
        &self,
        long_url: String,
        custom_code: Option<String>,
    ) -> Result<Link, AppError> {
        validate_long_url(&long_url).map_err(|e| {
            AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
        })?;

        let code = match custom_code {
            Some(custom) => {
                validate_custom_code(&custom)?;
                custom
            }
            None => generate_code(self.code_length),
        };

        let new_link = NewLink {
            code: code.clone(),
            long_url,
        };

        self.link_repository
            .create(new_link)
            .await
            .map_err(|e| match e {
                AppError::Conflict { .. } => {
                    AppError::conflict("Code already exists", json!({ "code": code }))
                }
                other => other,
            })
    }

    /// Retrieves a link by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches the code.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_link_by_code(&self, code: &str) -> Result<Link, AppError> {
        self.link_repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "code": code })))
    }

    /// Resolves a code for redirection.
    ///
    /// Codes that cannot exist (wrong length or characters) are reported as
    /// not found without touching the database.
    pub async fn resolve(&self, code: &str) -> Result<Link, AppError> {
        if !is_valid_code(code) {
            return Err(AppError::not_found(
                "Link not found",
                json!({ "code": code }),
            ));
        }

        self.get_link_by_code(code).await
    }

    /// Lists all links, newest first.
    pub async fn list_links(&self) -> Result<Vec<Link>, AppError> {
        self.link_repository.list_all().await
    }

    /// Deletes a link permanently.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code is unknown (including a
    /// second delete of the same code).
    pub async fn delete_link(&self, code: &str) -> Result<(), AppError> {
        if self.link_repository.delete(code).await? {
            Ok(())
        } else {
            Err(AppError::not_found(
                "Link not found",
                json!({ "code": code }),
            ))
        }
    }

    /// Counts stored links.
    pub async fn count_links(&self) -> Result<i64, AppError> {
        self.link_repository.count().await
    }
}
