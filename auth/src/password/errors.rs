use thiserror::Error;

/// Error type for password hashing.
///
/// Verification never fails with an error; a bad digest is simply a mismatch.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}
