use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::JwtError;

/// Hours a token stays valid when no TTL is given at issuance.
const DEFAULT_TTL_HOURS: i64 = 24;

/// Signed-token codec: issues and verifies compact HS256 tokens.
///
/// The algorithm is fixed at construction and enforced on verification, so a
/// token cannot pick its own algorithm. The signing secret is the only state;
/// verification needs nothing else.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    default_ttl: Duration,
}

impl JwtHandler {
    /// Create a handler with a signing secret and the default 24 hour TTL.
    ///
    /// # Arguments
    /// * `secret` - HMAC secret, at least 32 bytes for HS256
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            default_ttl: Duration::hours(DEFAULT_TTL_HOURS),
        }
    }

    /// Override the default token lifetime.
    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    /// Issue a signed token.
    ///
    /// Stamps `iat = now` and `exp = now + ttl` (the handler default when
    /// `ttl` is `None`) into the claims before signing; any extra claims
    /// already merged into `claims` are carried through.
    ///
    /// # Errors
    /// * `EncodingFailed` - Serialization or signing failed
    pub fn issue(&self, mut claims: Claims, ttl: Option<Duration>) -> Result<String, JwtError> {
        let now = Utc::now();
        claims.iat = Some(now.timestamp());
        claims.exp = Some((now + ttl.unwrap_or(self.default_ttl)).timestamp());

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify a token's signature and expiry, returning its claims.
    ///
    /// # Errors
    /// * `TokenExpired` - `exp` is in the past
    /// * `DecodingFailed` - Malformed token, wrong algorithm, or signature
    ///   does not validate against the secret
    /// * `MissingClaim("sub")` - No usable subject claim
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        let validation = Validation::new(self.algorithm);

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                    _ => JwtError::DecodingFailed(e.to_string()),
                }
            })?;

        let claims = token_data.claims;
        if claims.subject().is_none() {
            return Err(JwtError::MissingClaim("sub"));
        }

        Ok(claims)
    }
}
