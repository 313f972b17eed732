// handlers/mod.rs - HTTP handlers grouped by API area
//
// /api/auth/*       login, logout, me
// /api/import/*     CSV upload and Google Sheets rows
// /api/dashboard/*  dashboard metrics
// pages             HTML shells the route gate protects or redirects to

pub mod auth;
pub mod dashboard;
pub mod import;
pub mod pages;

use axum::Json;
use serde_json::{json, Value};

/// GET /health - Liveness probe
pub async fn health() -> Json<Value> {
    Json(json!({
        "success": true,
        "data": {
            "status": "ok",
            "timestamp": chrono::Utc::now(),
        }
    }))
}
