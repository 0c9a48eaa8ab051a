use crate::config::AuthConfig;
use axum::http::{header::AUTHORIZATION, HeaderMap};
use std::collections::HashMap;


/// Bearer token from the `Authorization` header, trimmed.
///
/// The scheme is matched case-insensitively.
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<String, TokenError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(TokenError::Missing)?
        .to_str()
        .map_err(|_| TokenError::InvalidFormat)?;

    let (scheme, token) = value.split_once(' ').ok_or(TokenError::InvalidFormat)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(TokenError::InvalidFormat);
    }

    match token.trim() {
        "" => Err(TokenError::Empty),
        token => Ok(token.to_string()),
    }
}

/// Bearer header problems
#[derive(Debug, PartialEq, Clone)]
pub enum TokenError {
    Missing,
    /// Not of the form `Bearer <token>`
    InvalidFormat,
    Empty,
}

impl std::fmt::Display for TokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenError::Missing => write!(f, "Missing bearer token"),
            TokenError::InvalidFormat => write!(f, "Expected 'Authorization: Bearer <token>'"),
            TokenError::Empty => write!(f, "Bearer token is empty"),
        }
    }
}

impl std::error::Error for TokenError {}

/// Who is making a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    User(String),
    Anonymous,
}

impl Identity {
    /// Owner key for store lookups
    pub fn owner(&self) -> Option<&str> {
        match self {
            Identity::User(id) => Some(id),
            Identity::Anonymous => None,
        }
    }
}

/// Known bearer tokens and the users they belong to
#[derive(Debug, Clone, Default)]
pub struct UserRegistry {
    users: HashMap<String, String>,
}

impl UserRegistry {
    pub fn new(users: HashMap<String, String>) -> Self {
        Self { users }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.users.clone())
    }

    /// User id for `token`, if registered
    pub fn lookup(&self, token: &str) -> Option<&str> {
        self.users.get(token).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

/// Authentication failures surfaced as 401
#[derive(Debug, PartialEq, Clone)]
pub enum AuthError {
    Token(TokenError),
    UnknownToken,
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::Token(e) => write!(f, "{}", e),
            AuthError::UnknownToken => write!(f, "Invalid authorization token"),
        }
    }
}

impl std::error::Error for AuthError {}

/// Resolve the caller from request headers.
///
/// With auth disabled, or with no Authorization header, the caller is
/// anonymous. A header that is present but malformed or unknown is an error.
pub fn resolve_identity(
    headers: &HeaderMap,
    registry: &UserRegistry,
    enabled: bool,
) -> Result<Identity, AuthError> {
    if !enabled {
        return Ok(Identity::Anonymous);
    }

    let token = match extract_bearer_token(headers) {
        Ok(token) => token,
        Err(TokenError::Missing) => return Ok(Identity::Anonymous),
        Err(e) => return Err(AuthError::Token(e)),
    };

    resolve_token(&token, registry)
}

/// Resolve a raw token (e.g. from a WebSocket query string)
pub fn resolve_token(token: &str, registry: &UserRegistry) -> Result<Identity, AuthError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::Token(TokenError::Empty));
    }

    registry
        .lookup(token)
        .map(|user| Identity::User(user.to_string()))
        .ok_or(AuthError::UnknownToken)
}
