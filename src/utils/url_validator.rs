//! Destination URL validation.
//!
//! Only absolute `http`/`https` URLs up to [`MAX_URL_LENGTH`] characters are
//! accepted. The URL is checked, not rewritten: the stored destination is
//! exactly what the client sent.

use url::Url;

pub const MAX_URL_LENGTH: usize = 2048;

/// Reasons a destination URL is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrlValidationError {
    #[error("URL must not be empty")]
    Empty,

    #[error("URL is {length} characters long (max {MAX_URL_LENGTH})")]
    TooLong { length: usize },

    #[error("URL is not a valid absolute URL: {0}")]
    InvalidFormat(String),

    #[error("URL scheme '{0}' is not allowed, use http or https")]
    UnsupportedScheme(String),

    #[error("URL contains a control character at position {position}")]
    ControlCharacter { position: usize },
}

/// Validates a destination URL.
///
/// # Errors
///
/// - [`UrlValidationError::Empty`] for an empty string
/// - [`UrlValidationError::TooLong`] above [`MAX_URL_LENGTH`] characters
/// - [`UrlValidationError::ControlCharacter`] for any ASCII control character,
///   since the stored string is sent verbatim as a `Location` header
/// - [`UrlValidationError::InvalidFormat`] if it does not parse as an absolute URL
/// - [`UrlValidationError::UnsupportedScheme`] for anything but `http`/`https`
pub fn validate_url(input: &str) -> Result<(), UrlValidationError> {
    if input.is_empty() {
        return Err(UrlValidationError::Empty);
    }

    let length = input.chars().count();
    if length > MAX_URL_LENGTH {
        return Err(UrlValidationError::TooLong { length });
    }

    if let Some(position) = input.chars().position(|c| c.is_ascii_control()) {
        return Err(UrlValidationError::ControlCharacter { position });
    }

    let url = Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(UrlValidationError::UnsupportedScheme(other.to_string())),
    }
}

pub fn is_valid_url(input: &str) -> bool {
    validate_url(input).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_and_https_accepted() {
        assert!(is_valid_url("http://example.com"));
        assert!(is_valid_url("https://example.com/a/b?x=1#frag"));
        assert!(is_valid_url("HTTPS://EXAMPLE.COM/Path"));
        assert!(is_valid_url("https://127.0.0.1:8443/"));
    }

    #[test]
    fn test_empty_rejected() {
        assert_eq!(validate_url(""), Err(UrlValidationError::Empty));
    }

    #[test]
    fn test_relative_rejected() {
        assert!(matches!(
            validate_url("example.com/path"),
            Err(UrlValidationError::InvalidFormat(_))
        ));
        assert!(matches!(
            validate_url("/just/a/path"),
            Err(UrlValidationError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_other_schemes_rejected() {
        for url in [
            "ftp://example.com",
            "javascript:alert(1)",
            "data:text/plain,hi",
            "file:///etc/passwd",
            "mailto:someone@example.com",
        ] {
            assert!(
                matches!(validate_url(url), Err(UrlValidationError::UnsupportedScheme(_))),
                "{url} should be rejected"
            );
        }
    }

    #[test]
    fn test_length_limit() {
        let base = "https://example.com/";
        let at_limit = format!("{base}{}", "a".repeat(MAX_URL_LENGTH - base.len()));
        let over_limit = format!("{at_limit}a");

        assert!(is_valid_url(&at_limit));
        assert_eq!(
            validate_url(&over_limit),
            Err(UrlValidationError::TooLong {
                length: MAX_URL_LENGTH + 1
            })
        );
    }

    #[test]
    fn test_control_characters_rejected() {
        for url in [
            "https://example.com/a\nb",
            "https://exa\rmple.com/",
            "https://example.com/a\tb",
            "https://example.com/a\u{1}b",
            "https://example.com/a\u{0}b",
            "https://example.com/\u{7f}",
        ] {
            assert!(
                matches!(
                    validate_url(url),
                    Err(UrlValidationError::ControlCharacter { .. })
                ),
                "{url:?} should be rejected"
            );
        }

        assert_eq!(
            validate_url("https://example.com/a\nb"),
            Err(UrlValidationError::ControlCharacter { position: 21 })
        );
    }
}
