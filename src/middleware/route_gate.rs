use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};

use crate::auth::{Claims, AUTH_COOKIE};
use crate::state::AppState;

/// Page prefixes that require a signed-in user
pub const PROTECTED_ROUTES: &[&str] = &["/dashboard", "/sales", "/analytics", "/reports", "/settings"];

pub const AUTH_PAGES: &[&str] = &["/login", "/register"];

const STATIC_PREFIXES: &[&str] = &["/_next/", "/static/"];
const STATIC_FILES: &[&str] = &["/favicon.ico", "/robots.txt", "/manifest.json", "/sw.js"];
const STATIC_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "svg", "ico", "webp", "css", "js", "map", "woff", "woff2", "ttf",
    "webmanifest",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    Protected,
    AuthPage,
    Api,
    Public,
}

/// Authenticated user context extracted from a verified token
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: String,
    pub email: String,
    pub role: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.user_id,
            email: claims.email,
            role: claims.role,
        }
    }
}

pub fn classify(path: &str) -> RouteClass {
    if PROTECTED_ROUTES.iter().any(|prefix| matches_prefix(path, prefix)) {
        RouteClass::Protected
    } else if AUTH_PAGES.contains(&path) {
        RouteClass::AuthPage
    } else if path.starts_with("/api/") {
        RouteClass::Api
    } else {
        RouteClass::Public
    }
}

// "/sales" matches "/sales" and "/sales/q1" but not "/salesforce"
fn matches_prefix(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

pub fn is_static_asset(path: &str) -> bool {
    if path.starts_with("/api/") {
        return false;
    }
    if STATIC_PREFIXES.iter().any(|p| path.starts_with(p)) || STATIC_FILES.contains(&path) {
        return true;
    }
    // Extension-only matches never unlock a protected page prefix
    if classify(path) == RouteClass::Protected {
        return false;
    }

    let last_segment = path.rsplit('/').next().unwrap_or_default();
    match last_segment.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => STATIC_EXTENSIONS
            .iter()
            .any(|known| known.eq_ignore_ascii_case(ext)),
        _ => false,
    }
}

/// Cookie first, then `Authorization: Bearer`
pub fn extract_token(jar: &CookieJar, headers: &HeaderMap) -> Option<String> {
    if let Some(cookie) = jar.get(AUTH_COOKIE) {
        if !cookie.value().is_empty() {
            return Some(cookie.value().to_string());
        }
    }

    let auth_header = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = auth_header.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

pub fn apply_cors_headers(headers: &mut HeaderMap) {
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, PUT, DELETE, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type, Authorization"),
    );
}

/// Removal cookie for a stale or invalid token
pub fn expired_auth_cookie() -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE, "")).path("/").build()
}

fn login_redirect(path: &str) -> Redirect {
    let encoded: String = url::form_urlencoded::byte_serialize(path.as_bytes()).collect();
    Redirect::temporary(&format!("/login?redirect={}", encoded))
}

/// Per-request gate: classifies the path, then redirects, clears stale
/// cookies, or decorates API responses with CORS headers.
pub async fn route_gate(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();

    if is_static_asset(&path) {
        return next.run(request).await;
    }

    let class = classify(&path);

    // None: no token presented. Some(None): presented but failed verification.
    let verified = extract_token(&jar, request.headers()).map(|token| {
        state
            .tokens
            .verify(&token)
            .map_err(|e| tracing::debug!("Rejected token on {}: {}", path, e))
            .ok()
    });

    if let Some(Some(claims)) = &verified {
        request.extensions_mut().insert(AuthUser::from(claims.clone()));
    }

    match class {
        RouteClass::Api => {
            let mut response = if request.method() == Method::OPTIONS {
                StatusCode::OK.into_response()
            } else {
                next.run(request).await
            };
            apply_cors_headers(response.headers_mut());
            response
        }
        RouteClass::AuthPage => match verified {
            Some(Some(_)) => Redirect::temporary("/dashboard").into_response(),
            Some(None) => {
                let jar = jar.remove(expired_auth_cookie());
                (jar, next.run(request).await).into_response()
            }
            None => next.run(request).await,
        },
        RouteClass::Protected => {
            if !state.config.security.enforce_auth {
                tracing::debug!("Auth enforcement disabled, allowing {}", path);
                return next.run(request).await;
            }

            match verified {
                Some(Some(_)) => next.run(request).await,
                Some(None) => {
                    let jar = jar.remove(expired_auth_cookie());
                    (jar, login_redirect(&path)).into_response()
                }
                None => login_redirect(&path).into_response(),
            }
        }
        RouteClass::Public => next.run(request).await,
    }
}
