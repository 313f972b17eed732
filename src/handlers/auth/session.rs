use axum::{extract::State, Extension, Json};
use axum_extra::extract::cookie::CookieJar;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::{route_gate::expired_auth_cookie, AuthUser};
use crate::state::AppState;

/// POST /api/auth/logout - Clear the session cookie
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<Value>) {
    (jar.remove(expired_auth_cookie()), Json(json!({ "success": true })))
}

/// GET /api/auth/me - Profile of the user behind the presented token
///
/// The route gate has already verified the token; an absent `AuthUser`
/// means no valid token was sent.
pub async fn me(
    State(state): State<AppState>,
    auth_user: Option<Extension<AuthUser>>,
) -> Result<Json<Value>, ApiError> {
    let Some(Extension(auth_user)) = auth_user else {
        return Err(ApiError::unauthorized("Not authenticated"));
    };

    let record = state
        .users
        .find_by_id(&auth_user.user_id)
        .ok_or_else(|| ApiError::unauthorized("Not authenticated"))?;

    Ok(Json(json!({
        "success": true,
        "user": record.user,
    })))
}
