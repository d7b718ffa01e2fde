use std::sync::Arc;

use tower::ServiceExt;

use super::*;
use crate::routes::app;
use crate::state::test_helpers::*;

async fn config_json(state: AppState, cookie: Option<&str>) -> serde_json::Value {
    let response = app(state)
        .oneshot(request("GET", "/api/config", cookie, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    serde_json::from_str(&body_text(response).await).unwrap()
}

#[tokio::test]
async fn api_config_anonymous_without_backend_is_all_null() {
    let json = config_json(test_app_state(), None).await;
    assert_eq!(json, serde_json::json!({ "backend_url": null, "access_token": null }));
}

#[tokio::test]
async fn api_config_reports_backend_and_token() {
    let state = test_app_state_with_backend(Arc::new(MockBackend::default()));
    let cookie = session_cookie(&state, &AdminSession::new("tok-7", serde_json::json!("alice")));
    let json = config_json(state, Some(&cookie)).await;
    assert_eq!(json, serde_json::json!({ "backend_url": TEST_BACKEND_URL, "access_token": "tok-7" }));
}

#[tokio::test]
async fn api_config_has_exactly_two_fields() {
    let state = test_app_state_with_backend(Arc::new(MockBackend::default()));
    let json = config_json(state, None).await;
    let object = json.as_object().unwrap();
    assert_eq!(object.len(), 2);
    assert!(object.contains_key("backend_url"));
    assert!(object["access_token"].is_null());
}

#[tokio::test]
async fn gated_pages_render_with_session() {
    let state = test_app_state();
    let cookie = session_cookie(&state, &AdminSession::new("tok", serde_json::json!({ "username": "root" })));
    let cases = [
        ("/dashboard", "Welcome, root"),
        ("/enrollment", r#"action="/enroll""#),
        ("/attendance", "/static/attendance.js"),
    ];
    for (uri, needle) in cases {
        let response = app(state.clone())
            .oneshot(request("GET", uri, Some(&cookie), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
        assert!(body_text(response).await.contains(needle), "{uri} missing {needle:?}");
    }
}

#[tokio::test]
async fn gated_pages_make_no_backend_calls() {
    let backend = Arc::new(MockBackend::default());
    let state = test_app_state_with_backend(backend.clone());
    let cookie = session_cookie(&state, &AdminSession::new("tok", serde_json::json!("a")));
    for uri in ["/dashboard", "/enrollment", "/attendance"] {
        let _ = app(state.clone())
            .oneshot(request("GET", uri, Some(&cookie), None))
            .await
            .unwrap();
    }
    assert!(backend.tokens().is_empty());
}

#[tokio::test]
async fn healthz_is_ok() {
    let response = app(test_app_state())
        .oneshot(request("GET", "/healthz", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
