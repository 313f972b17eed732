mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{get, post_json, send, test_app};
use dashboard_api::{
    auth::{credentials::hash_password, TokenService},
    config::{AppConfig, VerifierKind, DEVELOPMENT_JWT_SECRET},
};

#[tokio::test]
async fn health_endpoint_responds() {
    let res = send(test_app(), get("/health")).await;

    assert_eq!(res.status, StatusCode::OK);
    let body = res.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "ok");
}

#[tokio::test]
async fn login_with_remember_me_sets_thirty_day_cookie() {
    let res = send(
        test_app(),
        post_json(
            "/api/auth/login",
            &json!({ "email": "admin@purrify.ca", "password": "password123", "rememberMe": true }),
        ),
    )
    .await;

    assert_eq!(res.status, StatusCode::OK);

    let cookie = res.set_cookie().expect("auth cookie is set");
    assert!(cookie.starts_with("auth-token="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Strict"));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("Max-Age=2592000"));
    assert!(!cookie.contains("Secure"));

    let body = res.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["id"], "1");
    assert_eq!(body["user"]["name"], "Admin User");
    assert_eq!(body["user"]["role"], "admin");

    let token = body["token"].as_str().unwrap();
    let claims = TokenService::new(DEVELOPMENT_JWT_SECRET)
        .unwrap()
        .verify(token)
        .unwrap();
    assert_eq!(claims.user_id, "1");
    assert_eq!(claims.email, "admin@purrify.ca");
    assert_eq!(claims.exp - claims.iat, 30 * 24 * 60 * 60);
}

#[tokio::test]
async fn login_without_remember_me_lasts_one_day() {
    let res = send(
        test_app(),
        post_json(
            "/api/auth/login",
            &json!({ "email": "sales@purrify.ca", "password": "password123" }),
        ),
    )
    .await;

    assert_eq!(res.status, StatusCode::OK);
    assert!(res.set_cookie().unwrap().contains("Max-Age=86400"));
    assert_eq!(res.json()["user"]["role"], "sales");
}

#[tokio::test]
async fn invalid_login_input_is_rejected_with_field_details() {
    let res = send(
        test_app(),
        post_json("/api/auth/login", &json!({ "email": "not-an-email", "password": "123" })),
    )
    .await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.set_cookie().is_none());

    let body = res.json();
    assert_eq!(body["error"], "Invalid input");
    let details = body["details"].as_array().unwrap();
    assert_eq!(details.len(), 2);
    assert_eq!(details[0]["field"], "email");
    assert_eq!(details[0]["message"], "Invalid email format");
    assert_eq!(details[1]["field"], "password");
    assert_eq!(details[1]["message"], "Password must be at least 6 characters");
}

#[tokio::test]
async fn unknown_email_is_unauthorized() {
    let res = send(
        test_app(),
        post_json(
            "/api/auth/login",
            &json!({ "email": "nobody@purrify.ca", "password": "password123" }),
        ),
    )
    .await;

    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.json()["error"], "Invalid credentials");
}

#[tokio::test]
async fn hash_compare_verifier_checks_the_password() {
    let mut config = AppConfig::development();
    config.security.credential_verifier = VerifierKind::HashCompare;
    config.security.admin_password_hash = Some(hash_password("correct horse").unwrap());
    let app = common::app_with(config);

    let wrong = send(
        app.clone(),
        post_json(
            "/api/auth/login",
            &json!({ "email": "admin@purrify.ca", "password": "wrong horse" }),
        ),
    )
    .await;
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);

    let right = send(
        app,
        post_json(
            "/api/auth/login",
            &json!({ "email": "admin@purrify.ca", "password": "correct horse" }),
        ),
    )
    .await;
    assert_eq!(right.status, StatusCode::OK);
}

#[tokio::test]
async fn me_returns_the_token_holder() {
    let app = test_app();
    let token = common::login_token(app.clone(), "sales@purrify.ca", false).await;

    let res = send(app.clone(), common::get_with_cookie("/api/auth/me", &token)).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json()["user"]["email"], "sales@purrify.ca");

    let anonymous = send(app, get("/api/auth/me")).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);
    assert_eq!(anonymous.json()["error"], "Not authenticated");
}

#[tokio::test]
async fn logout_clears_the_cookie() {
    let app = test_app();
    let token = common::login_token(app.clone(), "admin@purrify.ca", false).await;

    let mut request = post_json("/api/auth/logout", &json!({}));
    request.headers_mut().insert(
        axum::http::header::COOKIE,
        format!("auth-token={}", token).parse().unwrap(),
    );
    let res = send(app, request).await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json()["success"], true);
    let cookie = res.set_cookie().unwrap();
    assert!(cookie.starts_with("auth-token=;"));
    assert!(cookie.contains("Max-Age=0"));
}
