use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

/// Token claims payload.
///
/// `sub` and `exp` are strongly typed; arbitrary extra claims can be merged
/// in at issuance time via the flattened `extra` map. A token is
/// self-contained: everything needed to authenticate a request (besides the
/// signing secret) lives here.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject - the authenticated user's unique id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Expiration time (Unix timestamp, seconds)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Issued at (Unix timestamp, seconds)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Additional custom claims (flattened into the payload)
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Claims {
    /// Create empty claims.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create claims for a subject. `exp` and `iat` are stamped by
    /// [`JwtHandler::issue`](crate::jwt::JwtHandler::issue).
    pub fn for_subject(sub: impl ToString) -> Self {
        Self {
            sub: Some(sub.to_string()),
            ..Self::default()
        }
    }

    /// Set subject.
    pub fn with_subject(mut self, sub: impl ToString) -> Self {
        self.sub = Some(sub.to_string());
        self
    }

    /// Set expiration (Unix timestamp). Normally stamped at issuance;
    /// useful in tests to craft already-expired tokens.
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }

    /// Merge a custom claim.
    pub fn with_extra(mut self, key: impl ToString, value: impl Serialize) -> Self {
        if let Ok(json_value) = serde_json::to_value(value) {
            self.extra.insert(key.to_string(), json_value);
        }
        self
    }

    /// Subject claim, if present and non-empty.
    pub fn subject(&self) -> Option<&str> {
        self.sub.as_deref().filter(|s| !s.is_empty())
    }
}
