//! Short code generation and validation utilities.
//!
//! Codes are drawn uniformly from the 62-character alphanumeric alphabet.
//! Uniqueness is not checked here; a collision surfaces as a conflict from
//! the link store.

use crate::error::AppError;
use rand::{Rng, distr::Alphanumeric};
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

/// Shortest accepted code, also the default generated length.
pub const MIN_CODE_LENGTH: usize = 6;

/// Longest accepted code.
pub const MAX_CODE_LENGTH: usize = 8;

/// Compiled regex for short code validation.
pub static CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]{6,8}$").expect("static regex is valid"));

/// Codes that would shadow fixed routes.
const RESERVED_CODES: &[&str] = &["health"];

/// Generates a random alphanumeric short code of `length` characters.
///
/// Never returns a reserved code.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code(6);
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code(length: usize) -> String {
    let mut rng = rand::rng();
    loop {
        let code: String = (&mut rng)
            .sample_iter(&Alphanumeric)
            .take(length)
            .map(char::from)
            .collect();
        if !RESERVED_CODES.contains(&code.as_str()) {
            return code;
        }
    }
}

/// Returns true if `code` is 6-8 ASCII letters or digits.
pub fn is_valid_code(code: &str) -> bool {
    CODE_REGEX.is_match(code)
}

/// Validates a user-provided custom short code.
///
/// # Rules
///
/// - Length: 6-8 characters
/// - Allowed characters: ASCII letters and digits
/// - Cannot be a reserved system code
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_custom_code(code: &str) -> Result<(), AppError> {
    if !is_valid_code(code) {
        return Err(AppError::bad_request(
            "Code must be 6-8 alphanumeric characters",
            json!({ "code": code }),
        ));
    }

    if RESERVED_CODES.contains(&code) {
        return Err(AppError::bad_request(
            "This code is reserved",
            json!({ "code": code }),
        ));
    }

    Ok(())
}
