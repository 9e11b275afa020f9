use thiserror::Error;

/// Reasons a token could not be issued or accepted.
///
/// Callers log these and answer with a generic message; the variant itself is
/// never shown to clients.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("No signing secret is configured")]
    SecretUnavailable,

    #[error("Failed to sign token: {0}")]
    SigningFailed(String),

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is expired")]
    Expired,
}
