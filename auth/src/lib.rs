//! Authentication core for the issue tracker
//!
//! Everything stateful about a session lives inside the signed token, so
//! this crate needs no session store and no HTTP framework:
//! - Password hashing (Argon2id, salted, PHC string format)
//! - Signed time-limited bearer tokens (HS256)
//! - Bearer-credential extraction from a request header map
//! - Request authentication against a pluggable user store
//!
//! The signing secret is injected at construction and never read from
//! globals, which keeps every piece trivially testable with a fixture
//! secret.
//!
//! # Examples
//!
//! ## Password hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("pass_word!").unwrap();
//! assert!(hasher.verify("pass_word!", &hash).unwrap());
//! assert!(!hasher.verify("guess", &hash).unwrap());
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{Claims, JwtHandler};
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!!!");
//! let token = handler.issue(Claims::for_subject("u1"), None).unwrap();
//! let claims = handler.verify(&token).unwrap();
//! assert_eq!(claims.subject(), Some("u1"));
//! ```
//!
//! ## Login flow
//! ```
//! use auth::{Authenticator, Claims};
//!
//! let authenticator = Authenticator::new(b"secret_key_at_least_32_bytes_long!!!");
//!
//! // Registration: hash once, persist the hash.
//! let stored_hash = authenticator.hash_password("pass_word!").unwrap();
//!
//! // Login: verify the hash, get a bearer token.
//! let token = authenticator
//!     .login("pass_word!", &stored_hash, Claims::for_subject("u1"))
//!     .unwrap();
//! assert_eq!(authenticator.verify_token(&token).unwrap().subject(), Some("u1"));
//! ```

pub mod authenticator;
pub mod bearer;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::Identity;
pub use authenticator::StoreError;
pub use authenticator::UserAccount;
pub use authenticator::UserStore;
pub use bearer::extract_bearer;
pub use bearer::BearerError;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
