use async_trait::async_trait;
use chrono::Duration;
use http::HeaderMap;
use thiserror::Error;

use crate::bearer::extract_bearer;
use crate::bearer::BearerError;
use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// User record as seen by the authenticator.
///
/// Owned by the backing store; the authenticator only reads it.
#[derive(Debug, Clone)]
pub struct UserAccount {
    pub id: String,
    pub email: String,
    pub username: String,
    pub full_name: Option<String>,
    pub is_active: bool,
    pub password_hash: String,
}

/// Public projection of an authenticated user.
///
/// Built fresh on every request; never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: String,
    pub email: String,
    pub username: String,
    pub full_name: Option<String>,
}

impl From<&UserAccount> for Identity {
    fn from(account: &UserAccount) -> Self {
        Self {
            id: account.id.clone(),
            email: account.email.clone(),
            username: account.username.clone(),
            full_name: account.full_name.clone(),
        }
    }
}

/// Failure of the backing user store itself.
///
/// Deliberately not an authentication failure: a store outage must surface
/// as a server error, never as "bad token".
#[derive(Debug, Clone, Error)]
#[error("User store unavailable: {0}")]
pub struct StoreError(pub String);

/// Port to the external user store.
///
/// `Ok(None)` means the record genuinely does not exist; infrastructure
/// trouble is a `StoreError`.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_user_by_id(&self, id: &str) -> Result<Option<UserAccount>, StoreError>;
}

/// Authentication failures, one variant per rejection cause.
///
/// All variants except `Store` are terminal 401-class outcomes; the boundary
/// is expected to present a generic message and keep the specific
/// [`reason`](AuthenticationError::reason) code for logs.
#[derive(Debug, Error)]
pub enum AuthenticationError {
    #[error("Missing authorization header")]
    MissingHeader,

    #[error("Malformed authorization header")]
    MalformedHeader,

    #[error("Token is expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token has no subject")]
    MissingSubject,

    #[error("User not found")]
    UserNotFound,

    #[error("User account is inactive")]
    InactiveAccount,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AuthenticationError {
    /// Stable internal reason code for structured logging.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::MissingHeader => "missing_header",
            Self::MalformedHeader => "malformed_header",
            Self::TokenExpired => "expired",
            Self::InvalidToken(_) => "invalid_token",
            Self::MissingSubject => "missing_subject",
            Self::UserNotFound => "user_not_found",
            Self::InactiveAccount => "inactive_account",
            Self::InvalidCredentials => "invalid_credentials",
            Self::Password(_) => "password_error",
            Self::Store(_) => "store_unavailable",
        }
    }
}

impl From<BearerError> for AuthenticationError {
    fn from(err: BearerError) -> Self {
        match err {
            BearerError::MissingHeader => Self::MissingHeader,
            BearerError::Malformed => Self::MalformedHeader,
        }
    }
}

impl From<JwtError> for AuthenticationError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::TokenExpired => Self::TokenExpired,
            JwtError::MissingClaim(_) => Self::MissingSubject,
            JwtError::EncodingFailed(msg) | JwtError::DecodingFailed(msg) => {
                Self::InvalidToken(msg)
            }
        }
    }
}

/// Authentication coordinator.
///
/// Combines password hashing and the token codec, and runs the request-level
/// flow: extract bearer token, verify it, look the subject up in the store,
/// enforce the active-account policy, project an [`Identity`]. Stateless
/// besides the signing secret, so a single instance is shared across
/// requests.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
}

impl Authenticator {
    /// Create an authenticator with the given signing secret and the
    /// default 24 hour token lifetime.
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret),
        }
    }

    /// Override the default token lifetime.
    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.jwt_handler = self.jwt_handler.with_default_ttl(ttl);
        self
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue an access token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password presented at login
    /// * `stored_hash` - The account's stored password hash
    /// * `claims` - Claims to sign into the token (`exp`/`iat` are stamped)
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `Password` - Stored hash unreadable
    /// * `InvalidToken` - Token signing failed
    pub fn login(
        &self,
        password: &str,
        stored_hash: &str,
        claims: Claims,
    ) -> Result<String, AuthenticationError> {
        let is_valid = self.password_hasher.verify(password, stored_hash)?;
        if !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.jwt_handler.issue(claims, None)?)
    }

    /// Issue a token without a password check (registration, tests).
    ///
    /// # Errors
    /// * `JwtError` - Token signing failed
    pub fn issue_token(&self, claims: Claims, ttl: Option<Duration>) -> Result<String, JwtError> {
        self.jwt_handler.issue(claims, ttl)
    }

    /// Verify a raw token and return its claims.
    ///
    /// # Errors
    /// * `JwtError` - Expired, malformed, or missing subject
    pub fn verify_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.jwt_handler.verify(token)
    }

    /// Authenticate an inbound request.
    ///
    /// Flow: extract the bearer token from `headers`, verify it, look up
    /// the subject in `store`, reject inactive accounts, and return the
    /// public identity. Every failure is terminal for the request.
    ///
    /// # Errors
    /// * `MissingHeader` / `MalformedHeader` - No usable bearer credential
    /// * `TokenExpired` / `InvalidToken` / `MissingSubject` - Bad token
    /// * `UserNotFound` - Subject has no matching account
    /// * `InactiveAccount` - Account exists but is deactivated
    /// * `Store` - The lookup itself failed (not an auth failure)
    pub async fn authenticate<S>(
        &self,
        headers: &HeaderMap,
        store: &S,
    ) -> Result<Identity, AuthenticationError>
    where
        S: UserStore + ?Sized,
    {
        let token = extract_bearer(headers)?;
        let claims = self.jwt_handler.verify(token)?;
        let subject = claims
            .subject()
            .ok_or(AuthenticationError::MissingSubject)?;

        let account = store
            .find_user_by_id(subject)
            .await?
            .ok_or(AuthenticationError::UserNotFound)?;

        if !account.is_active {
            return Err(AuthenticationError::InactiveAccount);
        }

        Ok(Identity::from(&account))
    }
}
