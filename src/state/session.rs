//! Session store: the single source of truth for the logged-in user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Guards read the session on every navigation; only login, logout and
//! hydrate cleanup write it. The persisted form is two storage entries (token
//! and identity JSON) so a reload restores the session without a request.
//!
//! INVARIANTS
//! ==========
//! - A [`Session`] without a token has an empty name and no roles.
//! - Storage never keeps an identity without a token.
//! - An expired token is removed the first time it is read.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::StorageKeys;
use crate::net::api::AuthTransport;
use crate::net::error::ApiError;
use crate::net::types::{Credentials, UserIdentity};
use crate::util::storage::{BrowserStorage, SessionStorage};
use crate::util::token::{TokenClaims, decode_claims, now_secs};

/// Persisted identity of the logged-in user.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub name: String,
    pub roles: BTreeSet<String>,
}

impl UserInfo {
    pub fn new<I, R>(name: impl Into<String>, roles: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: AsRef<str>,
    {
        Self { name: name.into().trim().to_owned(), roles: normalize_roles(roles) }
    }

    fn from_claims(claims: &TokenClaims) -> Option<Self> {
        claims.display_name().map(|name| Self::new(name, &claims.roles))
    }

    /// `Some(self)` when the identity names a user.
    fn named(self) -> Option<Self> {
        (!self.name.is_empty()).then_some(self)
    }
}

impl From<UserIdentity> for UserInfo {
    fn from(identity: UserIdentity) -> Self {
        Self::new(identity.name, identity.roles)
    }
}

/// Trim role identifiers and drop blanks.
pub fn normalize_roles<I, R>(roles: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = R>,
    R: AsRef<str>,
{
    roles
        .into_iter()
        .map(|role| role.as_ref().trim().to_owned())
        .filter(|role| !role.is_empty())
        .collect()
}

/// Snapshot of the authentication state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
    user_name: String,
    roles: BTreeSet<String>,
    expires_at: Option<u64>,
}

impl Session {
    /// No logged-in user.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Logged-in session. A blank token yields [`Session::anonymous`].
    #[must_use]
    pub fn authenticated(token: impl Into<String>, user: UserInfo, expires_at: Option<u64>) -> Self {
        let token = token.into();
        if token.trim().is_empty() {
            return Self::anonymous();
        }
        Self { token: Some(token), user_name: user.name, roles: user.roles, expires_at }
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    #[must_use]
    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    #[must_use]
    pub fn roles(&self) -> &BTreeSet<String> {
        &self.roles
    }

    #[must_use]
    pub fn expires_at(&self) -> Option<u64> {
        self.expires_at
    }

    /// A token is present and not expired at `now_secs`.
    #[must_use]
    pub fn is_authenticated_at(&self, now_secs: u64) -> bool {
        self.token.is_some() && !self.expires_at.is_some_and(|exp| exp <= now_secs)
    }

    /// [`Session::is_authenticated_at`] against the wall clock.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated_at(now_secs())
    }

    /// Identity of a valid session.
    #[must_use]
    pub fn user_info(&self) -> Option<UserInfo> {
        self.is_authenticated()
            .then(|| UserInfo { name: self.user_name.clone(), roles: self.roles.clone() })
    }
}

/// Reads and writes the persisted session.
///
/// Cloning shares the underlying storage.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
    keys: StorageKeys,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").field("keys", &self.keys).finish_non_exhaustive()
    }
}

impl SessionStore {
    pub fn new(storage: Arc<dyn SessionStorage>, keys: StorageKeys) -> Self {
        Self { storage, keys }
    }

    /// Store backed by `localStorage`.
    #[must_use]
    pub fn browser(keys: StorageKeys) -> Self {
        Self::new(Arc::new(BrowserStorage), keys)
    }

    /// Restore the session from storage, clearing anything stale.
    #[must_use]
    pub fn hydrate(&self) -> Session {
        self.hydrate_at(now_secs())
    }

    pub(crate) fn hydrate_at(&self, now: u64) -> Session {
        let Some(token) = self.storage.get(&self.keys.token).filter(|t| !t.trim().is_empty()) else {
            self.storage.remove(&self.keys.identity);
            return Session::anonymous();
        };

        let claims = decode_claims(&token);
        if claims.as_ref().is_some_and(|c| c.is_expired_at(now)) {
            leptos::logging::log!("stored session expired; clearing");
            self.logout();
            return Session::anonymous();
        }

        let stored = self
            .storage
            .get(&self.keys.identity)
            .and_then(|raw| serde_json::from_str::<UserInfo>(&raw).ok())
            .map(|user| UserInfo::new(user.name, user.roles))
            .and_then(UserInfo::named);
        let Some(user) = stored.or_else(|| claims.as_ref().and_then(UserInfo::from_claims)) else {
            leptos::logging::warn!("stored session has no identity; clearing");
            self.logout();
            return Session::anonymous();
        };

        Session::authenticated(token, user, claims.and_then(|c| c.exp))
    }

    /// Whether storage holds a non-expired session.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.hydrate().is_authenticated()
    }

    /// Identity of the stored session, if valid.
    #[must_use]
    pub fn user_info(&self) -> Option<UserInfo> {
        self.hydrate().user_info()
    }

    /// Exchange `credentials` for a token and persist the new session.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Validation`] for blank credentials (nothing is sent).
    /// - [`ApiError::Auth`] when the server rejects the credentials or the
    ///   response carries no usable token or identity.
    /// - Any transport error from `transport`.
    pub async fn login<T: AuthTransport>(&self, transport: &T, credentials: &Credentials) -> Result<Session, ApiError> {
        if !credentials.is_complete() {
            return Err(ApiError::Validation("username and password are required".to_owned()));
        }

        let response = transport.login(credentials).await?;
        let token = response.token.trim().to_owned();
        if token.is_empty() {
            return Err(ApiError::Auth("login response carried no token".to_owned()));
        }

        let claims = decode_claims(&token);
        if claims.as_ref().is_some_and(|c| c.is_expired_at(now_secs())) {
            return Err(ApiError::Auth("issued token is already expired".to_owned()));
        }

        let user = response
            .user
            .map(UserInfo::from)
            .and_then(UserInfo::named)
            .or_else(|| claims.as_ref().and_then(UserInfo::from_claims))
            .ok_or_else(|| ApiError::Auth("login response carried no identity".to_owned()))?;

        self.persist(&token, &user)?;
        leptos::logging::log!("login succeeded: user={}", user.name);
        Ok(Session::authenticated(token, user, claims.and_then(|c| c.exp)))
    }

    /// Clear the persisted token and identity. Never fails.
    pub fn logout(&self) {
        self.storage.remove(&self.keys.token);
        self.storage.remove(&self.keys.identity);
    }

    fn persist(&self, token: &str, user: &UserInfo) -> Result<(), ApiError> {
        let identity = serde_json::to_string(user).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.storage.set(&self.keys.token, token);
        self.storage.set(&self.keys.identity, &identity);
        Ok(())
    }
}
