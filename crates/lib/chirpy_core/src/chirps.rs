//! Chirp body rules.

use thiserror::Error;

/// Maximum chirp length, in characters.
pub const MAX_CHIRP_LENGTH: usize = 140;

/// Chirp validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChirpError {
    #[error("Chirp is empty")]
    Empty,

    #[error("Chirp is too long")]
    TooLong,
}

/// Check that a chirp body is non-blank and at most [`MAX_CHIRP_LENGTH`] characters.
pub fn validate_body(body: &str) -> Result<(), ChirpError> {
    if body.trim().is_empty() {
        return Err(ChirpError::Empty);
    }
    if body.chars().count() > MAX_CHIRP_LENGTH {
        return Err(ChirpError::TooLong);
    }
    Ok(())
}
