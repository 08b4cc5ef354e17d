use std::cell::Cell;

use futures::executor::block_on;

use super::*;
use crate::net::types::LoginResponse;
use crate::test_support::{FAR_FUTURE, jwt};
use crate::util::storage::MemoryStorage;

struct FakeTransport {
    response: Result<LoginResponse, ApiError>,
    calls: Cell<usize>,
}

impl FakeTransport {
    fn replying(response: Result<LoginResponse, ApiError>) -> Self {
        Self { response, calls: Cell::new(0) }
    }

    fn token(token: String) -> Self {
        Self::replying(Ok(LoginResponse { token, user: None }))
    }
}

impl AuthTransport for FakeTransport {
    async fn login(&self, _credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        self.calls.set(self.calls.get() + 1);
        self.response.clone()
    }
}

fn store() -> (SessionStore, MemoryStorage) {
    let storage = MemoryStorage::new();
    (SessionStore::new(Arc::new(storage.clone()), StorageKeys::default()), storage)
}

fn creds() -> Credentials {
    Credentials::new("ana", "secret")
}

fn manager_token() -> String {
    jwt(&serde_json::json!({ "sub": "ana", "name": "Ana", "roles": ["MANAGER"], "exp": FAR_FUTURE }))
}

// =============================================================
// Session invariants
// =============================================================

#[test]
fn anonymous_session_has_no_identity() {
    let session = Session::anonymous();
    assert_eq!(session.token(), None);
    assert!(session.user_name().is_empty());
    assert!(session.roles().is_empty());
    assert!(!session.is_authenticated());
    assert_eq!(session.user_info(), None);
}

#[test]
fn blank_token_yields_anonymous_session() {
    let session = Session::authenticated("  ", UserInfo::new("Ana", ["MANAGER"]), None);
    assert_eq!(session, Session::anonymous());
}

#[test]
fn session_expires_at_exp_instant() {
    let session = Session::authenticated("t", UserInfo::new("Ana", ["MANAGER"]), Some(100));
    assert!(session.is_authenticated_at(99));
    assert!(!session.is_authenticated_at(100));
}

#[test]
fn user_info_normalizes_roles() {
    let user = UserInfo::new(" Ana ", [" MANAGER", "", "EMPLOYEE ", "MANAGER"]);
    assert_eq!(user.name, "Ana");
    assert_eq!(user.roles, normalize_roles(["EMPLOYEE", "MANAGER"]));
}

// =============================================================
// login
// =============================================================

#[test]
fn login_persists_token_and_identity_from_claims() {
    let (store, storage) = store();
    let transport = FakeTransport::token(manager_token());

    let session = block_on(store.login(&transport, &creds())).expect("login");

    assert!(session.is_authenticated());
    assert_eq!(session.user_name(), "Ana");
    assert!(session.roles().contains("MANAGER"));
    assert_eq!(session.expires_at(), Some(FAR_FUTURE));
    assert_eq!(storage.get("backoffice.token"), Some(manager_token()));
    assert!(storage.get("backoffice.user").is_some());
    assert!(store.is_authenticated());
}

#[test]
fn login_prefers_response_identity_over_claims() {
    let (store, _) = store();
    let transport = FakeTransport::replying(Ok(LoginResponse {
        token: manager_token(),
        user: Some(UserIdentity { name: "Ana Souza".to_owned(), roles: vec!["EMPLOYEE".to_owned()] }),
    }));

    let session = block_on(store.login(&transport, &creds())).expect("login");

    assert_eq!(session.user_name(), "Ana Souza");
    assert_eq!(session.roles(), &normalize_roles(["EMPLOYEE"]));
}

#[test]
fn login_accepts_opaque_token_with_response_identity() {
    let (store, _) = store();
    let transport = FakeTransport::replying(Ok(LoginResponse {
        token: "opaque-token".to_owned(),
        user: Some(UserIdentity { name: "Bob".to_owned(), roles: vec!["EMPLOYEE".to_owned()] }),
    }));

    let session = block_on(store.login(&transport, &creds())).expect("login");

    assert_eq!(session.token(), Some("opaque-token"));
    assert_eq!(session.expires_at(), None);
    assert_eq!(store.user_info(), Some(UserInfo::new("Bob", ["EMPLOYEE"])));
}

#[test]
fn login_rejects_blank_credentials_without_request() {
    let (store, storage) = store();
    let transport = FakeTransport::token(manager_token());

    let err = block_on(store.login(&transport, &Credentials::new("ana", "  "))).expect_err("blank");

    assert!(matches!(err, ApiError::Validation(_)));
    assert_eq!(transport.calls.get(), 0);
    assert!(storage.is_empty());
}

#[test]
fn login_propagates_auth_failure_and_keeps_storage_empty() {
    let (store, storage) = store();
    let transport = FakeTransport::replying(Err(ApiError::Auth("invalid credentials".to_owned())));

    let err = block_on(store.login(&transport, &creds())).expect_err("rejected");

    assert!(err.is_auth());
    assert!(storage.is_empty());
    assert!(!store.is_authenticated());
}

#[test]
fn login_propagates_network_failure() {
    let (store, _) = store();
    let transport = FakeTransport::replying(Err(ApiError::Network("offline".to_owned())));

    let err = block_on(store.login(&transport, &creds())).expect_err("offline");

    assert_eq!(err, ApiError::Network("offline".to_owned()));
}

#[test]
fn login_rejects_expired_token() {
    let (store, storage) = store();
    let expired = jwt(&serde_json::json!({ "sub": "ana", "roles": ["MANAGER"], "exp": 1 }));
    let transport = FakeTransport::token(expired);

    let err = block_on(store.login(&transport, &creds())).expect_err("expired");

    assert!(err.is_auth());
    assert!(storage.is_empty());
}

#[test]
fn login_rejects_token_without_identity() {
    let (store, _) = store();
    let transport = FakeTransport::token("opaque".to_owned());

    let err = block_on(store.login(&transport, &creds())).expect_err("no identity");

    assert!(err.is_auth());
}

#[test]
fn login_rejects_blank_response_name_without_claims() {
    let (store, storage) = store();
    let transport = FakeTransport::replying(Ok(LoginResponse {
        token: "opaque-token".to_owned(),
        user: Some(UserIdentity { name: "   ".to_owned(), roles: vec![] }),
    }));

    let err = block_on(store.login(&transport, &creds())).expect_err("blank name");

    assert!(err.is_auth());
    assert!(storage.is_empty());
    assert!(!store.is_authenticated());
}

#[test]
fn login_falls_back_to_claims_when_response_name_is_blank() {
    let (store, _) = store();
    let transport = FakeTransport::replying(Ok(LoginResponse {
        token: manager_token(),
        user: Some(UserIdentity { name: " ".to_owned(), roles: vec!["EMPLOYEE".to_owned()] }),
    }));

    let session = block_on(store.login(&transport, &creds())).expect("login");

    assert_eq!(session.user_name(), "Ana");
    assert_eq!(session.roles(), &normalize_roles(["MANAGER"]));
}

#[test]
fn login_rejects_empty_token() {
    let (store, _) = store();
    let transport = FakeTransport::token("   ".to_owned());

    assert!(block_on(store.login(&transport, &creds())).expect_err("empty").is_auth());
}

// =============================================================
// hydrate / logout
// =============================================================

#[test]
fn hydrate_restores_persisted_session() {
    let (store, _) = store();
    block_on(store.login(&FakeTransport::token(manager_token()), &creds())).expect("login");

    let reloaded = SessionStore::new(store.storage.clone(), StorageKeys::default()).hydrate();

    assert!(reloaded.is_authenticated());
    assert_eq!(reloaded.user_name(), "Ana");
}

#[test]
fn hydrate_without_token_clears_stale_identity() {
    let (store, storage) = store();
    storage.set("backoffice.user", r#"{"name":"Ana","roles":["MANAGER"]}"#);

    assert_eq!(store.hydrate(), Session::anonymous());
    assert!(storage.is_empty());
}

#[test]
fn hydrate_clears_expired_token() {
    let (store, storage) = store();
    storage.set("backoffice.token", &jwt(&serde_json::json!({ "sub": "ana", "exp": 50 })));
    storage.set("backoffice.user", r#"{"name":"Ana","roles":["MANAGER"]}"#);

    assert_eq!(store.hydrate_at(60), Session::anonymous());
    assert!(storage.is_empty());
}

#[test]
fn hydrate_recovers_identity_from_claims() {
    let (store, _) = store();
    store.storage.set("backoffice.token", &manager_token());

    let session = store.hydrate();

    assert_eq!(session.user_name(), "Ana");
    assert!(session.roles().contains("MANAGER"));
}

#[test]
fn hydrate_clears_opaque_token_without_identity() {
    let (store, storage) = store();
    storage.set("backoffice.token", "opaque");

    assert_eq!(store.hydrate(), Session::anonymous());
    assert!(storage.is_empty());
}

#[test]
fn hydrate_ignores_corrupt_identity_when_claims_suffice() {
    let (store, storage) = store();
    storage.set("backoffice.token", &manager_token());
    storage.set("backoffice.user", "{not json");

    assert_eq!(store.hydrate().user_name(), "Ana");
}

#[test]
fn hydrate_clears_opaque_token_with_blank_stored_name() {
    let (store, storage) = store();
    storage.set("backoffice.token", "opaque-token");
    storage.set("backoffice.user", r#"{"name":"   ","roles":[]}"#);

    assert_eq!(store.hydrate(), Session::anonymous());
    assert!(storage.is_empty());
}

#[test]
fn hydrate_prefers_claims_over_blank_stored_name() {
    let (store, storage) = store();
    storage.set("backoffice.token", &manager_token());
    storage.set("backoffice.user", r#"{"name":"","roles":["EMPLOYEE"]}"#);

    let session = store.hydrate();

    assert_eq!(session.user_name(), "Ana");
    assert_eq!(session.roles(), &normalize_roles(["MANAGER"]));
}

#[test]
fn logout_clears_storage_unconditionally() {
    let (store, storage) = store();
    store.logout();
    assert!(storage.is_empty());

    block_on(store.login(&FakeTransport::token(manager_token()), &creds())).expect("login");
    store.logout();

    assert!(storage.is_empty());
    assert!(!store.is_authenticated());
    assert_eq!(store.user_info(), None);
}
