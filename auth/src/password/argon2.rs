use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::PasswordError;

/// One-way salted password hasher (Argon2id).
///
/// Every call to [`hash`](PasswordHasher::hash) draws a fresh random salt, so
/// hashing the same password twice yields two different encoded strings that
/// both verify. The plaintext is never stored; only the PHC-format string
/// (algorithm, parameters, salt, digest) is meant to be persisted.
pub struct PasswordHasher;

impl PasswordHasher {
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password for storage.
    ///
    /// # Arguments
    /// * `password` - Plaintext password
    ///
    /// # Returns
    /// PHC string containing salt and digest
    ///
    /// # Errors
    /// * `HashingFailed` - The underlying algorithm rejected the input
    ///   (e.g. a password beyond its maximum length) or failed internally.
    ///   Inputs are never truncated to fit.
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a plaintext password against a stored hash.
    ///
    /// Recomputes the digest with the salt embedded in `hash` and compares in
    /// constant time. A mismatch is `Ok(false)`, not an error.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to check
    /// * `hash` - Stored PHC string
    ///
    /// # Errors
    /// * `VerificationFailed` - The stored hash is not a parseable PHC
    ///   string. Callers should treat this as a data-integrity problem, not
    ///   a wrong password.
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| PasswordError::VerificationFailed(format!("invalid stored hash: {}", e)))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
