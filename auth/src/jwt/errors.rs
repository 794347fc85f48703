use thiserror::Error;

/// Error type for token operations.
///
/// Verification failures are split into distinct variants so callers can
/// react to the kind (expired vs. tampered vs. incomplete) without parsing
/// messages.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is malformed or its signature is invalid: {0}")]
    DecodingFailed(String),

    #[error("Token is expired")]
    TokenExpired,

    #[error("Missing required claim: {0}")]
    MissingClaim(&'static str),
}
