//! Defines the bearer token returned by the log in endpoint and the slot the
//! client keeps it in.

use std::{
    fmt::{Debug, Display},
    sync::{Arc, PoisonError, RwLock},
};

use serde::{Deserialize, Serialize};

const BEARER_PREFIX: &str = "Bearer ";

/// A bearer credential, always stored with the `"Bearer "` prefix so it can be
/// sent verbatim in the `Authorization` header.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct AuthToken(String);

impl AuthToken {
    /// Wrap the raw token from a log in response.
    ///
    /// The `"Bearer "` prefix is added unless the server already included it.
    pub fn new(raw: &str) -> Self {
        if raw.starts_with(BEARER_PREFIX) {
            Self(raw.to_owned())
        } else {
            Self(format!("{BEARER_PREFIX}{raw}"))
        }
    }

    /// The header value, including the `"Bearer "` prefix.
    pub fn as_header_value(&self) -> &str {
        &self.0
    }

    /// Whether there is anything after the prefix.
    pub fn is_empty(&self) -> bool {
        self.0.trim_start_matches(BEARER_PREFIX).is_empty()
    }

    /// A form of the token that is safe to log.
    pub fn redacted(&self) -> String {
        let secret = self.0.trim_start_matches(BEARER_PREFIX);
        let visible: String = secret.chars().take(4).collect();

        format!("{BEARER_PREFIX}{visible}********")
    }
}

impl From<String> for AuthToken {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

impl From<AuthToken> for String {
    fn from(value: AuthToken) -> Self {
        value.0
    }
}

// The token is a secret, keep it out of debug output.
impl Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("AuthToken").field(&self.redacted()).finish()
    }
}

impl Display for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.redacted())
    }
}

/// Holds at most one token, shared between clones of the client.
#[derive(Debug, Clone, Default)]
pub struct TokenSlot(Arc<RwLock<Option<AuthToken>>>);

impl TokenSlot {
    /// The current token, if logged in.
    pub fn get(&self) -> Option<AuthToken> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the current token.
    pub fn set(&self, token: AuthToken) {
        *self.0.write().unwrap_or_else(PoisonError::into_inner) = Some(token);
    }

    /// Forget the current token.
    pub fn clear(&self) {
        *self.0.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Whether a non-empty token is held.
    pub fn is_logged_in(&self) -> bool {
        self.get().is_some_and(|token| !token.is_empty())
    }
}
