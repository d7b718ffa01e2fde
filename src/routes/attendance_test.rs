use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::http::header::{CONTENT_TYPE, COOKIE};
use tower::ServiceExt;

use super::*;
use crate::routes::{FRAME_BODY_LIMIT, app};
use crate::state::test_helpers::*;

fn frame_request(cookie: &str) -> Request<Body> {
    sized_frame_request(cookie, vec![0xFF, 0xD8, 0xFF, 0xE0])
}

fn sized_frame_request(cookie: &str, frame: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/attendance/frame")
        .header(COOKIE, cookie)
        .header(CONTENT_TYPE, "image/jpeg")
        .body(Body::from(frame))
        .unwrap()
}

#[tokio::test]
async fn frame_passes_backend_json_through() {
    let backend = Arc::new(MockBackend {
        attendance: Box::new(|| Ok(serde_json::json!({ "attendance": { "first_name": "Ada" } }))),
        ..MockBackend::default()
    });
    let state = test_app_state_with_backend(backend.clone());
    let cookie = session_cookie(&state, &AdminSession::new("tok-f", serde_json::json!("a")));

    let response = app(state).oneshot(frame_request(&cookie)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["attendance"]["first_name"], "Ada");
    assert_eq!(backend.tokens(), vec!["tok-f".to_owned()]);
}

#[tokio::test]
async fn frame_above_default_body_limit_is_forwarded() {
    let backend = Arc::new(MockBackend::default());
    let state = test_app_state_with_backend(backend.clone());
    let cookie = session_cookie(&state, &AdminSession::new("tok-big", serde_json::json!("a")));

    // Larger than axum's 2 MB default.
    let frame = vec![0xAB; 3 * 1024 * 1024];
    let response = app(state).oneshot(sized_frame_request(&cookie, frame)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(backend.tokens(), vec!["tok-big".to_owned()]);
}

#[tokio::test]
async fn frame_over_limit_is_413_without_backend_call() {
    let backend = Arc::new(MockBackend::default());
    let state = test_app_state_with_backend(backend.clone());
    let cookie = session_cookie(&state, &AdminSession::new("tok", serde_json::json!("a")));

    let frame = vec![0xAB; FRAME_BODY_LIMIT + 1];
    let response = app(state).oneshot(sized_frame_request(&cookie, frame)).await.unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(backend.tokens().is_empty());
}

#[tokio::test]
async fn absent_without_backend_is_json_500() {
    let state = test_app_state();
    let cookie = session_cookie(&state, &AdminSession::new("tok", serde_json::json!("a")));
    let response = app(state)
        .oneshot(request("GET", "/api/attendance/absent", Some(&cookie), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["error"], MISCONFIGURED);
}

#[test]
fn passthrough_maps_errors() {
    let cases = [
        (BackendError::Transport("refused".into()), StatusCode::SERVICE_UNAVAILABLE),
        (BackendError::Rejected { status: 403, body: String::new() }, StatusCode::FORBIDDEN),
        (BackendError::Rejected { status: 42, body: String::new() }, StatusCode::BAD_GATEWAY),
        (BackendError::Parse("bad json".into()), StatusCode::BAD_GATEWAY),
    ];
    for (err, expected) in cases {
        assert_eq!(passthrough(Err(err)).status(), expected);
    }
}
