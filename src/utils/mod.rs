//! Utility functions for code generation and input validation.
//!
//! - [`code_generator`] - Short code generation and validation
//! - [`url_validator`] - Long URL well-formedness checks

pub mod code_generator;
pub mod url_validator;
