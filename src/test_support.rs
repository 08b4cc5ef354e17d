//! Shared fixtures for unit tests.

use std::sync::Arc;

use base64::Engine as _;
use leptos::prelude::Set;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use crate::config::StorageKeys;
use crate::state::auth::{AuthContext, AuthState};
use crate::state::session::{Session, SessionStore, UserInfo};
use crate::util::storage::MemoryStorage;

/// Expiry far enough in the future for any test run.
pub const FAR_FUTURE: u64 = 4_102_444_800;

/// Build an unsigned JWT-shaped token carrying `claims`.
pub fn jwt(claims: &serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{header}.{payload}.signature")
}

/// Auth context over fresh in-memory storage, still loading.
pub fn pending_auth() -> (AuthContext, MemoryStorage) {
    let storage = MemoryStorage::new();
    let store = SessionStore::new(Arc::new(storage.clone()), StorageKeys::default());
    (AuthContext::new(store, "/api"), storage)
}

/// Hydrated auth context with a live session holding `roles`.
pub fn signed_in(roles: &[&str]) -> AuthContext {
    let (auth, _) = pending_auth();
    let session = Session::authenticated("token", UserInfo::new("Ana", roles), Some(FAR_FUTURE));
    auth.state().set(AuthState::loaded(session));
    auth
}

/// Hydrated auth context with no session.
pub fn signed_out() -> AuthContext {
    let (auth, _) = pending_auth();
    auth.hydrate();
    auth
}
