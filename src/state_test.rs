use super::test_helpers::*;
use super::*;

#[test]
fn new_without_backend_exposes_no_url() {
    let state = test_app_state();
    assert!(state.backend.is_none());
    assert!(state.backend_url().is_none());
}

#[test]
fn new_with_backend_exposes_url() {
    let state = test_app_state_with_backend(Arc::new(MockBackend::default()));
    assert!(state.backend.is_some());
    assert_eq!(state.backend_url(), Some(TEST_BACKEND_URL));
}

#[test]
fn same_secret_yields_same_cookie_key() {
    let a = test_app_state();
    let b = test_app_state();
    assert_eq!(a.cookie_key.master(), b.cookie_key.master());
}

#[test]
fn missing_secret_generates_distinct_keys() {
    let a = AppState::new(PortalConfig::default(), None);
    let b = AppState::new(PortalConfig::default(), None);
    assert_ne!(a.cookie_key.master(), b.cookie_key.master());
}

#[test]
fn cookie_key_extracts_from_state() {
    let state = test_app_state();
    let key = Key::from_ref(&state);
    assert_eq!(key.master(), state.cookie_key.master());
}

#[test]
fn session_cookie_helper_round_trips() {
    let state = test_app_state();
    let cookie = session_cookie(&state, &crate::session::AdminSession::new("tok", serde_json::json!("a")));
    assert!(cookie.starts_with("portal_session="));
}
