//! Auth facade: session state exposed to components and guards.
//!
//! SYSTEM CONTEXT
//! ==============
//! `provide_auth` installs one [`AuthContext`] at the application root;
//! guards and pages reach it through [`use_auth`]. The context owns the
//! reactive [`AuthState`] and the [`SessionStore`] behind it, with an explicit
//! init (`hydrate`) and teardown (`logout`).
//!
//! ERROR HANDLING
//! ==============
//! Login failures are logged and reported as `false`; nothing propagates into
//! the view tree.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::collections::BTreeSet;

use leptos::prelude::*;

use super::session::{Session, SessionStore};
use crate::config::ClientConfig;
use crate::guard::policy::{RoleMatch, RoleRequirement};
use crate::net::api::{ApiClient, AuthTransport};
use crate::net::error::ApiError;
use crate::net::types::Credentials;
use crate::util::token::now_secs;

/// Authentication state tracking the current session and loading status.
///
/// `loading` stays true until the persisted session has been read, so guards
/// can hold off instead of redirecting a user who is in fact logged in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub session: Session,
    pub loading: bool,
}

impl AuthState {
    /// State before the persisted session has been read.
    #[must_use]
    pub fn pending() -> Self {
        Self { session: Session::anonymous(), loading: true }
    }

    #[must_use]
    pub fn loaded(session: Session) -> Self {
        Self { session, loading: false }
    }
}

/// Handle to the auth state and session store. Cheap to copy.
#[derive(Clone, Copy)]
pub struct AuthContext {
    state: RwSignal<AuthState>,
    store: StoredValue<SessionStore>,
    api_base_url: StoredValue<String>,
}

impl AuthContext {
    pub fn new(store: SessionStore, api_base_url: impl Into<String>) -> Self {
        Self {
            state: RwSignal::new(AuthState::pending()),
            store: StoredValue::new(store),
            api_base_url: StoredValue::new(api_base_url.into()),
        }
    }

    /// Read the persisted session and finish loading.
    pub fn hydrate(&self) {
        let session = self.store.with_value(SessionStore::hydrate);
        self.state.set(AuthState::loaded(session));
    }

    /// Underlying signal, for components that need the whole state.
    #[must_use]
    pub fn state(&self) -> RwSignal<AuthState> {
        self.state
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.with(|s| s.loading)
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.with(|s| !s.loading && s.session.is_authenticated_at(now_secs()))
    }

    #[must_use]
    pub fn user_name(&self) -> String {
        self.state.with(|s| s.session.user_name().to_owned())
    }

    #[must_use]
    pub fn user_roles(&self) -> BTreeSet<String> {
        self.state.with(|s| s.session.roles().clone())
    }

    /// Whether the current user holds any role of `requirement`.
    #[must_use]
    pub fn has_role(&self, requirement: impl Into<RoleRequirement>) -> bool {
        let requirement = requirement.into();
        self.state.with(|s| requirement.is_satisfied_by(s.session.roles(), RoleMatch::Any))
    }

    /// Current session without subscribing. An expired session is torn down
    /// here and reported as anonymous.
    #[must_use]
    pub fn session_snapshot(&self) -> Session {
        let session = self.state.with_untracked(|s| s.session.clone());
        if session.token().is_some() && !session.is_authenticated_at(now_secs()) {
            leptos::logging::log!("session expired; logging out");
            self.logout();
            return Session::anonymous();
        }
        session
    }

    /// API client carrying the current bearer token.
    #[must_use]
    pub fn api(&self) -> ApiClient {
        let token = self.state.with_untracked(|s| s.session.token().map(str::to_owned));
        ApiClient::new(self.api_base_url.get_value()).with_token(token)
    }

    /// Log in against the configured API.
    pub async fn login(&self, credentials: Credentials) -> bool {
        let transport = ApiClient::new(self.api_base_url.get_value());
        self.login_with(&transport, credentials).await
    }

    /// Log in through `transport`; `true` when a session was established.
    pub async fn login_with<T: AuthTransport>(&self, transport: &T, credentials: Credentials) -> bool {
        let store = self.store.get_value();
        match store.login(transport, &credentials).await {
            Ok(session) => {
                self.state.set(AuthState::loaded(session));
                true
            }
            Err(e) => {
                leptos::logging::warn!("login failed: user={} error={e}", credentials.username);
                false
            }
        }
    }

    /// Drop the session from storage and state. Never fails.
    pub fn logout(&self) {
        self.store.with_value(SessionStore::logout);
        self.state.set(AuthState::loaded(Session::anonymous()));
    }

    /// React to an API failure; an auth rejection ends the session.
    pub fn handle_error(&self, error: &ApiError) {
        if error.is_auth() {
            leptos::logging::warn!("API rejected session token: {error}");
            self.logout();
        }
    }
}

/// Create the auth context for the app and hydrate it once mounted.
pub fn provide_auth(config: &ClientConfig) -> AuthContext {
    let auth = AuthContext::new(SessionStore::browser(config.storage.clone()), config.api_base_url.clone());
    provide_context(auth);
    Effect::new(move || auth.hydrate());
    auth
}

/// Auth context installed by [`provide_auth`].
///
/// # Panics
///
/// Panics when called outside the application root.
pub fn use_auth() -> AuthContext {
    expect_context::<AuthContext>()
}
