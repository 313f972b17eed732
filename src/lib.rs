pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod import;
pub mod middleware;
pub mod session;
pub mod state;
pub mod types;
pub mod validation;

use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::middleware::route_gate;
use crate::state::AppState;

/// Build the full application router.
///
/// The route gate wraps every route and the fallback, so page redirects,
/// API CORS headers and `OPTIONS` preflights are handled before dispatch.
pub fn app(state: AppState) -> Router {
    let body_limit = state.config.api.max_request_size_bytes;

    let router = Router::new()
        .route("/health", get(handlers::health))
        .merge(page_routes())
        .merge(auth_routes())
        .merge(import_routes())
        .merge(dashboard_routes())
        .fallback(handlers::pages::not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(from_fn_with_state(state.clone(), route_gate));

    let router = if state.config.api.enable_request_logging {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    };

    router.with_state(state)
}

fn page_routes() -> Router<AppState> {
    use handlers::pages;

    Router::new()
        .route("/", get(pages::home))
        .route("/dashboard", get(pages::dashboard))
        .route("/sales", get(pages::sales))
        .route("/analytics", get(pages::analytics))
        .route("/reports", get(pages::reports))
        .route("/settings", get(pages::settings))
        .route("/login", get(pages::login_page))
        .route("/register", get(pages::register_page))
}

fn auth_routes() -> Router<AppState> {
    use handlers::auth;

    Router::new()
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
}

fn import_routes() -> Router<AppState> {
    use handlers::import;

    Router::new()
        .route("/api/import/csv", post(import::import_csv))
        .route(
            "/api/import/sheets",
            get(import::sheets_usage).post(import::import_sheets),
        )
}

fn dashboard_routes() -> Router<AppState> {
    use handlers::dashboard;

    Router::new().route(
        "/api/dashboard/metrics",
        get(dashboard::metrics_get).post(dashboard::metrics_post),
    )
}
