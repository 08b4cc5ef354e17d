use super::*;

#[test]
fn new_trims_trailing_slashes_from_base() {
    let client = ApiClient::new("https://api.example.com/v1//");
    assert_eq!(client.base_url(), "https://api.example.com/v1");
}

#[test]
fn url_joins_with_single_slash() {
    let client = ApiClient::new("/api");
    assert_eq!(client.url("/clients"), "/api/clients");
    assert_eq!(client.url("clients"), "/api/clients");
}

#[test]
fn authorization_formats_bearer_header() {
    let client = ApiClient::new("/api").with_token(Some("abc.def.ghi".to_owned()));
    assert_eq!(client.authorization().as_deref(), Some("Bearer abc.def.ghi"));
}

#[test]
fn authorization_absent_without_token() {
    assert_eq!(ApiClient::new("/api").authorization(), None);
    let blank = ApiClient::new("/api").with_token(Some("  ".to_owned()));
    assert_eq!(blank.authorization(), None);
}

#[test]
fn check_status_accepts_success_range() {
    assert_eq!(check_status(200), Ok(()));
    assert_eq!(check_status(204), Ok(()));
}

#[test]
fn check_status_maps_unauthorized_to_auth() {
    assert!(check_status(401).expect_err("401").is_auth());
}

#[test]
fn check_status_maps_other_failures_to_status() {
    assert_eq!(check_status(403), Err(ApiError::Status { status: 403 }));
    assert_eq!(check_status(500), Err(ApiError::Status { status: 500 }));
}

#[test]
fn calls_fail_with_network_error_off_browser() {
    let client = ApiClient::new("/api").with_token(Some("t".to_owned()));
    let result = futures::executor::block_on(client.list::<serde_json::Value>(Resource::Clients));
    assert_eq!(result, Err(ApiError::Network("not available on server".to_owned())));
}

#[test]
fn login_fails_with_network_error_off_browser() {
    let client = ApiClient::new("/api");
    let result = futures::executor::block_on(client.login(&Credentials::new("ana", "pw")));
    assert!(matches!(result, Err(ApiError::Network(_))));
}
