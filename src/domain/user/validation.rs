//! User input validation

use thiserror::Error;

/// Errors that can occur during user validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserValidationError {
    #[error("Username cannot be empty")]
    EmptyUsername,

    #[error("Username exceeds maximum length of {0} characters")]
    UsernameTooLong(usize),

    #[error("Username cannot start or end with whitespace")]
    UsernamePadded,

    #[error("Password cannot be empty")]
    EmptyPassword,

    #[error("Fingerprint cannot be empty")]
    EmptyFingerprint,

    #[error("Fingerprint exceeds maximum length of {0} characters")]
    FingerprintTooLong(usize),
}

const MAX_USERNAME_LENGTH: usize = 64;
const MAX_FINGERPRINT_LENGTH: usize = 4096;

/// Validate a username
///
/// Rules:
/// - Cannot be empty or blank
/// - Maximum 64 characters
/// - No leading or trailing whitespace
pub fn validate_username(username: &str) -> Result<(), UserValidationError> {
    if username.trim().is_empty() {
        return Err(UserValidationError::EmptyUsername);
    }

    if username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(UserValidationError::UsernameTooLong(MAX_USERNAME_LENGTH));
    }

    if username.trim() != username {
        return Err(UserValidationError::UsernamePadded);
    }

    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), UserValidationError> {
    if password.is_empty() {
        return Err(UserValidationError::EmptyPassword);
    }
    Ok(())
}

/// Fingerprints are opaque client-generated strings; only emptiness and
/// size are checked.
pub fn validate_fingerprint(fingerprint: &str) -> Result<(), UserValidationError> {
    if fingerprint.is_empty() {
        return Err(UserValidationError::EmptyFingerprint);
    }

    if fingerprint.chars().count() > MAX_FINGERPRINT_LENGTH {
        return Err(UserValidationError::FingerprintTooLong(MAX_FINGERPRINT_LENGTH));
    }

    Ok(())
}
