use super::body_json;
use crate::Rejection;

use std::panic::Location;

use axum::{
    http::{StatusCode, header},
    response::IntoResponse,
};
use error_location::ErrorLocation;
use tg_auth::{AuthError, Role};

fn here() -> ErrorLocation {
    ErrorLocation::from(Location::caller())
}

#[test]
fn given_each_rejection_when_mapped_then_status_matches_table() {
    let cases = [
        (Rejection::missing_token(), StatusCode::UNAUTHORIZED),
        (Rejection::invalid_credentials(), StatusCode::UNAUTHORIZED),
        (Rejection::missing_tenant(), StatusCode::BAD_REQUEST),
        (Rejection::unknown_tenant("ghost"), StatusCode::NOT_FOUND),
        (
            Rejection::lookup_unavailable("timeout"),
            StatusCode::SERVICE_UNAVAILABLE,
        ),
        (Rejection::rate_limited(5), StatusCode::TOO_MANY_REQUESTS),
        (
            Rejection::internal("boom"),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
    ];

    for (rejection, status) in cases {
        assert_eq!(rejection.status(), status, "{}", rejection.kind());
    }
}

#[test]
fn given_expired_token_error_when_converted_then_invalid_token_with_reason() {
    let rejection = Rejection::from(AuthError::TokenExpired { location: here() });

    assert_eq!(rejection.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(rejection.detail(), "invalid token: signature has expired");
}

#[test]
fn given_forbidden_error_when_converted_then_403_with_roles() {
    let rejection = Rejection::from(AuthError::Forbidden {
        required: Role::Admin,
        actual: "owner".to_string(),
        location: here(),
    });

    assert_eq!(rejection.status(), StatusCode::FORBIDDEN);
    assert_eq!(rejection.kind(), "forbidden");
    assert_eq!(
        rejection.detail(),
        "insufficient role: need 'admin', have 'owner'"
    );
}

#[test]
fn given_config_error_when_converted_then_internal_without_leaking_message() {
    let rejection = Rejection::from(AuthError::Config {
        message: "rate class 'x' is not configured".to_string(),
        location: here(),
    });

    assert_eq!(rejection.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(rejection.detail(), "internal server error");
}

#[test]
fn given_zero_retry_hint_when_rate_limited_then_clamped_to_one_second() {
    match Rejection::rate_limited(0) {
        Rejection::RateLimited {
            retry_after_secs, ..
        } => assert_eq!(retry_after_secs, 1),
        other => panic!("Expected RateLimited, got {other:?}"),
    }
}

#[tokio::test]
async fn given_rate_limited_when_rendered_then_retry_after_header_and_detail_body() {
    let response = Rejection::rate_limited(17).into_response();

    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(response.headers()[header::RETRY_AFTER], "17");
    assert_eq!(body_json(response).await["detail"], "rate limit exceeded");
}

#[tokio::test]
async fn given_directory_failure_when_rendered_then_internal_message_hidden() {
    let response = Rejection::lookup_unavailable("sqlite: database is locked").into_response();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert!(response.headers().get(header::RETRY_AFTER).is_none());
    assert_eq!(
        body_json(response).await["detail"],
        "tenant directory unavailable"
    );
}
