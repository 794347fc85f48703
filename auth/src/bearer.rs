use http::header::AUTHORIZATION;
use http::HeaderMap;
use thiserror::Error;

/// Error type for credential extraction.
///
/// A missing header and a present-but-malformed one are distinct so the
/// caller can log a precise reason while still returning a uniform 401.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BearerError {
    #[error("Missing authorization header")]
    MissingHeader,

    #[error("Malformed authorization header")]
    Malformed,
}

/// Pull the bearer token out of a request's `Authorization` header.
///
/// Accepts exactly `Bearer <token>`: a case-insensitive `bearer` scheme
/// followed by a single token and nothing more. Any other shape of the
/// header value is malformed.
///
/// # Errors
/// * `MissingHeader` - No `Authorization` header present
/// * `Malformed` - Header present but not `Bearer <token>`
pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, BearerError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(BearerError::MissingHeader)?
        .to_str()
        .map_err(|_| BearerError::Malformed)?;

    let mut parts = value.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => Ok(token),
        _ => Err(BearerError::Malformed),
    }
}
