// handlers/dashboard - mock dashboard metrics under /api/dashboard

pub mod metrics;

pub use metrics::{metrics_get, metrics_post};
