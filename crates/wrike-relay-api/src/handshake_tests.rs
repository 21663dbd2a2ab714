use super::*;

fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
    let mut map = HeaderMap::new();
    for (name, value) in pairs {
        map.insert(*name, HeaderValue::from_static(value));
    }
    map
}

#[test]
fn test_no_handshake_headers() {
    assert_eq!(Handshake::detect(&headers(&[])), None);
    assert_eq!(
        Handshake::detect(&headers(&[("content-type", "application/json")])),
        None
    );
}

#[test]
fn test_request_token_detected() {
    let handshake = Handshake::detect(&headers(&[("x-request-token", "abc123")])).unwrap();

    assert_eq!(
        handshake,
        Handshake::RequestToken(HeaderValue::from_static("abc123"))
    );
    assert_eq!(handshake.kind(), "request_token");
}

#[test]
fn test_request_token_wins_over_hook_secret() {
    let handshake = Handshake::detect(&headers(&[
        ("x-hook-secret", "secret"),
        ("x-request-token", "token"),
    ]))
    .unwrap();

    assert!(matches!(handshake, Handshake::RequestToken(_)));
}

#[test]
fn test_empty_values_are_ignored() {
    let handshake =
        Handshake::detect(&headers(&[("x-request-token", ""), ("x-hook-secret", "s3")])).unwrap();

    assert_eq!(
        handshake,
        Handshake::HookSecret(HeaderValue::from_static("s3"))
    );
}

#[tokio::test]
async fn test_request_token_is_echoed_in_body() {
    let response = Handshake::RequestToken(HeaderValue::from_static("tok-~-42")).into_response();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"tok-~-42");
}

#[tokio::test]
async fn test_hook_secret_is_echoed_in_header() {
    let response = Handshake::HookSecret(HeaderValue::from_static("s3cr3t")).into_response();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-hook-secret"], "s3cr3t");
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(body.is_empty());
}
