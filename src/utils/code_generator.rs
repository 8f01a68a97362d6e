//! Short code generation and validation utilities.
//!
//! Codes are 6 to 8 characters drawn from `[A-Za-z0-9]`, compared
//! case-sensitively. A small set of words is reserved because it collides
//! with top-level route segments.

use rand::Rng;
use regex::Regex;
use std::sync::LazyLock;

use crate::error::AppError;

/// The 62-character code alphabet.
pub const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

pub const MIN_CODE_LENGTH: usize = 6;
pub const MAX_CODE_LENGTH: usize = 8;

/// Codes that cannot be used as short links (compared case-insensitively).
///
/// The server's list is authoritative; clients may reserve more as a hint.
pub const RESERVED_CODES: &[&str] = &["api", "healthz", "code"];

static CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]{6,8}$").unwrap());

/// Generates a random short code using the thread-local CSPRNG.
///
/// The length is uniform over 6..=8 and every position is uniform over
/// [`ALPHABET`]. No validation is performed here.
pub fn generate_code() -> String {
    generate_code_with(&mut rand::rng())
}

/// Generates a code from the given randomness source.
pub fn generate_code_with<R: Rng + ?Sized>(rng: &mut R) -> String {
    let length = rng.random_range(MIN_CODE_LENGTH..=MAX_CODE_LENGTH);

    (0..length)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Full-string match of `^[A-Za-z0-9]{6,8}$`.
pub fn is_valid_format(code: &str) -> bool {
    CODE_REGEX.is_match(code)
}

/// Case-insensitive membership in [`RESERVED_CODES`].
pub fn is_reserved(code: &str) -> bool {
    RESERVED_CODES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(code))
}

/// A code is acceptable when it is well-formed and not reserved.
pub fn is_acceptable(code: &str) -> bool {
    is_valid_format(code) && !is_reserved(code)
}

/// Validates a user-provided custom short code.
///
/// # Errors
///
/// - [`AppError::InvalidCode`] if the code is empty or not 6-8 ASCII letters/digits
/// - [`AppError::ReservedCode`] if the code is a reserved word
pub fn validate_custom_code(code: &str) -> Result<(), AppError> {
    if code.is_empty() {
        return Err(AppError::InvalidCode("code must not be empty".to_string()));
    }

    if !is_valid_format(code) {
        return Err(AppError::InvalidCode(
            "code must be 6-8 characters of A-Z, a-z or 0-9".to_string(),
        ));
    }

    if is_reserved(code) {
        return Err(AppError::ReservedCode(code.to_string()));
    }

    Ok(())
}
