//! Long URL validation.
//!
//! The URL is stored exactly as submitted; this module only decides whether
//! it is acceptable as a redirect target.

use url::Url;

/// Reasons a long URL is rejected.
#[derive(Debug, thiserror::Error)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must include a host")]
    MissingHost,
}

/// Checks that `input` is an absolute `http`/`https` URL with a host.
///
/// Rejects `javascript:`, `data:`, `file:` and other schemes that make no
/// sense as redirect targets.
///
/// # Errors
///
/// See [`UrlValidationError`].
pub fn validate_long_url(input: &str) -> Result<Url, UrlValidationError> {
    let url = Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::MissingHost);
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_http_and_https() {
        assert!(validate_long_url("http://example.com").is_ok());
        assert!(validate_long_url("https://example.com/path?q=1#frag").is_ok());
        assert!(validate_long_url("https://example.com:8443/").is_ok());
    }

    #[test]
    fn test_rejects_relative_and_garbage() {
        assert!(matches!(
            validate_long_url("example.com"),
            Err(UrlValidationError::InvalidFormat(_))
        ));
        assert!(matches!(
            validate_long_url("not a url"),
            Err(UrlValidationError::InvalidFormat(_))
        ));
        assert!(validate_long_url("").is_err());
    }

    #[test]
    fn test_rejects_dangerous_schemes() {
        for input in [
            "javascript:alert(1)",
            "data:text/html,hi",
            "file:///etc/passwd",
            "ftp://example.com",
        ] {
            assert!(
                matches!(
                    validate_long_url(input),
                    Err(UrlValidationError::UnsupportedProtocol)
                ),
                "{input}"
            );
        }
    }
}
