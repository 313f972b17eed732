use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde_json::{json, Value};

use crate::auth::{IssuedToken, AUTH_COOKIE};
use crate::error::ApiError;
use crate::state::AppState;
use crate::validation::{validate, LoginCredentials};

/// POST /api/auth/login - Authenticate user and receive a signed token
///
/// Expected Input:
/// ```json
/// {
///   "email": "admin@purrify.ca",
///   "password": "string",      // at least 6 characters
///   "rememberMe": false        // optional, 30-day session when true
/// }
/// ```
///
/// Expected Output (Success):
/// ```json
/// {
///   "success": true,
///   "user": { "id": "1", "email": "admin@purrify.ca", "name": "Admin User", "role": "admin" },
///   "token": "eyJhbGciOiJIUzI1NiI..."
/// }
/// ```
///
/// The token is also set as the `auth-token` cookie.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(CookieJar, Json<Value>), ApiError> {
    let Json(body) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;

    let credentials = validate::<LoginCredentials>(&body).into_result("Invalid input")?;

    let Some(record) = state.users.find_by_email(&credentials.email) else {
        tracing::warn!("Login failed for {}: unknown email", credentials.email);
        return Err(ApiError::unauthorized("Invalid credentials"));
    };

    if !state.verifier.verify(record, &credentials.password).await? {
        tracing::warn!("Login failed for {}: password rejected", credentials.email);
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    let issued = state.tokens.issue(&record.user, credentials.remember_me)?;
    tracing::info!(
        "Login succeeded for {} (remember_me: {})",
        record.user.email,
        credentials.remember_me
    );

    let jar = jar.add(session_cookie(&issued, state.config.security.secure_cookies));

    Ok((
        jar,
        Json(json!({
            "success": true,
            "user": record.user,
            "token": issued.token,
        })),
    ))
}

pub fn session_cookie(issued: &IssuedToken, secure: bool) -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE, issued.token.clone()))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Strict)
        .max_age(time::Duration::seconds(issued.lifetime.num_seconds()))
        .build()
}
