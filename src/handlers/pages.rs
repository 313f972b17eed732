use axum::{
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    Extension,
};

use crate::error::ApiError;
use crate::middleware::AuthUser;

fn shell(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>{title} | Dashboard</title></head>\n<body><main><h1>{title}</h1>{body}</main></body>\n</html>\n"
    ))
}

fn greeting(user: Option<Extension<AuthUser>>) -> String {
    match user {
        Some(Extension(user)) => format!("<p>Signed in as {} ({})</p>", user.email, user.role),
        None => String::new(),
    }
}

pub async fn home() -> Html<String> {
    shell("Home", "<p><a href=\"/dashboard\">Open the dashboard</a></p>")
}

pub async fn dashboard(user: Option<Extension<AuthUser>>) -> Html<String> {
    shell("Dashboard", &greeting(user))
}

pub async fn sales(user: Option<Extension<AuthUser>>) -> Html<String> {
    shell("Sales", &greeting(user))
}

pub async fn analytics(user: Option<Extension<AuthUser>>) -> Html<String> {
    shell("Analytics", &greeting(user))
}

pub async fn reports(user: Option<Extension<AuthUser>>) -> Html<String> {
    shell("Reports", &greeting(user))
}

pub async fn settings(user: Option<Extension<AuthUser>>) -> Html<String> {
    shell("Settings", &greeting(user))
}

pub async fn login_page() -> Html<String> {
    shell(
        "Sign in",
        "<p>Send <code>{\"email\", \"password\", \"rememberMe\"}</code> as JSON to <code>POST /api/auth/login</code>.</p>",
    )
}

pub async fn register_page() -> Html<String> {
    shell("Register", "<p>Accounts are provisioned by an administrator.</p>")
}

/// JSON 404 under `/api/`, an HTML page everywhere else
pub async fn not_found(uri: Uri) -> Response {
    if uri.path().starts_with("/api/") {
        return ApiError::not_found("Not found").into_response();
    }

    (StatusCode::NOT_FOUND, shell("Page not found", "<p><a href=\"/\">Back home</a></p>"))
        .into_response()
}
