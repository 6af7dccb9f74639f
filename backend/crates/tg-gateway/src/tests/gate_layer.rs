use super::{
    DEFAULT_LOOKUP_TIMEOUT, app, body_json, gateway_with, get_request, host, router,
    seeded_directory, token,
};
use crate::{GatewayState, X_FORWARDED_FOR};

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use tower::ServiceExt;

#[tokio::test]
async fn given_owner_token_when_calling_admin_route_on_own_tenant_then_ok() {
    // Given
    let owner = token("alice", "tenant1", "owner");

    // When
    let response = app()
        .oneshot(get_request("/admin/health", &host("tenant1"), Some(&owner)))
        .await
        .unwrap();

    // Then
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["user"], "alice");
    assert_eq!(body["tenant"], "tenant1");
    assert_eq!(body["role"], "owner");
}

#[tokio::test]
async fn given_tenant1_token_when_calling_tenant2_then_401_tenant_mismatch() {
    let owner = token("alice", "tenant1", "owner");

    let response = app()
        .oneshot(get_request("/admin/health", &host("tenant2"), Some(&owner)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["detail"], "token tenant mismatch");
}

#[tokio::test]
async fn given_analyst_token_when_calling_owner_route_then_403() {
    let analyst = token("bob", "tenant1", "analyst");

    let response = app()
        .oneshot(get_request("/admin/health", &host("tenant1"), Some(&analyst)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        body_json(response).await["detail"],
        "insufficient role: need 'owner', have 'analyst'"
    );
}

#[tokio::test]
async fn given_no_token_when_calling_authenticated_route_then_401_missing_token() {
    let response = app()
        .oneshot(get_request("/api/me", &host("tenant1"), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["detail"], "missing token");
}

#[tokio::test]
async fn given_malformed_token_when_calling_public_route_then_401_invalid_token() {
    let response = app()
        .oneshot(get_request("/public", &host("tenant1"), Some("not-a-jwt")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let detail = body_json(response).await["detail"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(detail.starts_with("invalid token: "));
}

#[tokio::test]
async fn given_forged_token_when_calling_authenticated_route_then_401() {
    let forged = tg_auth::TokenCodec::new(tg_auth::TokenCodecConfig::new(
        tg_auth::SigningSecret::Configured(b"some-other-secret-at-least-32-bytes".to_vec()),
    ))
    .unwrap()
    .encode("mallory", "tenant1", "admin", std::time::Duration::from_secs(60))
    .unwrap();

    let response = app()
        .oneshot(get_request("/api/me", &host("tenant1"), Some(&forged)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_json(response).await["detail"],
        "invalid token: signature verification failed"
    );
}

#[tokio::test]
async fn given_no_tenant_label_when_route_requires_tenant_then_400() {
    let response = app()
        .oneshot(get_request("/required", "lvh.me", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["detail"], "tenant not provided");
}

#[tokio::test]
async fn given_unregistered_tenant_when_route_requires_known_tenant_then_404() {
    let response = app()
        .oneshot(get_request("/known", &host("ghost"), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["detail"], "unknown tenant");
}

#[tokio::test]
async fn given_registered_tenant_when_route_requires_known_tenant_then_ok() {
    let response = app()
        .oneshot(get_request("/known", &host("tenant2"), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["tenant"], "tenant2");
}

#[tokio::test]
async fn given_unconfigured_rate_class_when_called_then_500_generic_body() {
    let response = app()
        .oneshot(get_request("/misconfigured", &host("tenant1"), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["detail"], "internal server error");
}

#[tokio::test]
async fn given_handler_outside_gate_when_extracting_context_then_500() {
    let response = app()
        .oneshot(get_request("/ungated", &host("tenant1"), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn given_exhausted_quota_when_calling_again_then_429_with_retry_after() {
    // Given - one request per window
    let app = router(GatewayState::new(
        gateway_with(seeded_directory(), 1, DEFAULT_LOOKUP_TIMEOUT),
        false,
    ));
    let first = app
        .clone()
        .oneshot(get_request("/public", &host("tenant1"), None))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    // When
    let second = app
        .oneshot(get_request("/public", &host("tenant1"), None))
        .await
        .unwrap();

    // Then
    assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
    let retry_after: u64 = second.headers()[header::RETRY_AFTER]
        .to_str()
        .unwrap()
        .parse()
        .unwrap();
    assert!((1..=60).contains(&retry_after));
    assert_eq!(body_json(second).await["detail"], "rate limit exceeded");
}

#[tokio::test]
async fn given_eleven_requests_at_default_quota_when_sent_then_only_last_is_429() {
    let app = app();
    let mut statuses = Vec::new();

    for _ in 0..11 {
        let response = app
            .clone()
            .oneshot(get_request("/public", &host("tenant1"), None))
            .await
            .unwrap();
        statuses.push(response.status());
    }

    assert!(statuses[..10].iter().all(|s| *s == StatusCode::OK));
    assert_eq!(statuses[10], StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn given_login_route_when_auth_class_exhausted_then_default_class_unaffected() {
    let app = app();

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(get_request("/login", &host("tenant1"), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
    let limited = app
        .clone()
        .oneshot(get_request("/login", &host("tenant1"), None))
        .await
        .unwrap();
    let public = app
        .oneshot(get_request("/public", &host("tenant1"), None))
        .await
        .unwrap();

    assert_eq!(limited.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(public.status(), StatusCode::OK);
}

#[tokio::test]
async fn given_trusted_forwarded_for_when_clients_differ_then_buckets_are_separate() {
    let app = router(GatewayState::new(
        gateway_with(seeded_directory(), 1, DEFAULT_LOOKUP_TIMEOUT),
        true,
    ));
    let from = |client: &str| {
        Request::builder()
            .uri("/public")
            .header(header::HOST, host("tenant1"))
            .header(X_FORWARDED_FOR, format!("{client}, 10.0.0.254"))
            .body(Body::empty())
            .unwrap()
    };

    let a1 = app.clone().oneshot(from("203.0.113.1")).await.unwrap();
    let a2 = app.clone().oneshot(from("203.0.113.1")).await.unwrap();
    let b1 = app.oneshot(from("203.0.113.2")).await.unwrap();

    assert_eq!(a1.status(), StatusCode::OK);
    assert_eq!(a2.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(b1.status(), StatusCode::OK);
}

#[tokio::test]
async fn given_forwarded_request_when_handled_then_context_carries_request_id() {
    let analyst = token("bob", "tenant1", "analyst");
    let request = Request::builder()
        .uri("/api/me")
        .header(header::HOST, host("tenant1"))
        .header(header::AUTHORIZATION, format!("bearer {analyst}"))
        .header("x-request-id", "trace-42")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-request-id"], "trace-42");
    let body = body_json(response).await;
    assert_eq!(body["request_id"], "trace-42");
    assert_eq!(body["user"], "bob");
}
