use axum::{body::Bytes, Json};
use chrono::Utc;
use rand::Rng;
use serde::Serialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::validation::{validate, MetricsQuery, Period};

/// Headline dashboard figures. Values are mock data until real sales
/// aggregation exists.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub total_revenue: f64,
    pub revenue_change: f64,
    pub total_orders: u64,
    pub orders_change: f64,
    pub active_stores: u64,
    pub stores_change: f64,
    pub conversion_rate: f64,
    pub conversion_change: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySales {
    pub month: &'static str,
    pub revenue: f64,
    pub orders: u64,
}

impl DashboardMetrics {
    pub fn baseline() -> Self {
        Self {
            total_revenue: 45_231.89,
            revenue_change: 20.1,
            total_orders: 2_350,
            orders_change: 18.0,
            active_stores: 573,
            stores_change: 12.0,
            conversion_rate: 3.2,
            conversion_change: 0.4,
        }
    }

    /// Scale every figure by an independent factor in [0.9, 1.1)
    pub fn perturbed<R: Rng>(&self, rng: &mut R) -> Self {
        let mut jitter = |value: f64| round2(value * rng.gen_range(0.9..1.1));

        Self {
            total_revenue: jitter(self.total_revenue),
            revenue_change: jitter(self.revenue_change),
            total_orders: jitter(self.total_orders as f64).round() as u64,
            orders_change: jitter(self.orders_change),
            active_stores: jitter(self.active_stores as f64).round() as u64,
            stores_change: jitter(self.stores_change),
            conversion_rate: jitter(self.conversion_rate),
            conversion_change: jitter(self.conversion_change),
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn monthly_sales() -> Vec<MonthlySales> {
    [
        ("Jan", 4_000.0, 240),
        ("Feb", 3_000.0, 198),
        ("Mar", 5_000.0, 305),
        ("Apr", 4_780.0, 289),
        ("May", 5_890.0, 348),
        ("Jun", 4_390.0, 260),
    ]
    .into_iter()
    .map(|(month, revenue, orders)| MonthlySales {
        month,
        revenue,
        orders,
    })
    .collect()
}

/// GET /api/dashboard/metrics - Current headline metrics
pub async fn metrics_get() -> Json<Value> {
    Json(json!({
        "success": true,
        "period": Period::default(),
        "data": DashboardMetrics::baseline(),
        "timestamp": Utc::now(),
    }))
}

/// POST /api/dashboard/metrics - Metrics for a requested period
///
/// Body: `{ "period": "month", "includeDetails": false }`, both optional.
pub async fn metrics_post(body: Bytes) -> Result<Json<Value>, ApiError> {
    // An empty body means "all defaults"
    let body: Value = if body.iter().all(u8::is_ascii_whitespace) {
        json!({})
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| ApiError::bad_request(format!("Invalid JSON body: {}", e)))?
    };
    let query = validate::<MetricsQuery>(&body).into_result("Invalid input")?;

    let metrics = DashboardMetrics::baseline().perturbed(&mut rand::thread_rng());

    let mut response = json!({
        "success": true,
        "period": query.period,
        "data": metrics,
        "timestamp": Utc::now(),
    });

    if query.include_details {
        response["details"] = json!({ "salesByMonth": monthly_sales() });
    }

    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn perturbation_stays_within_ten_percent() {
        let base = DashboardMetrics::baseline();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..50 {
            let m = base.perturbed(&mut rng);
            assert!(m.total_revenue >= base.total_revenue * 0.9 - 0.01);
            assert!(m.total_revenue <= base.total_revenue * 1.1 + 0.01);
            assert!(m.total_orders >= 2_115 && m.total_orders <= 2_585);
        }
    }

    #[test]
    fn baseline_serializes_camel_case() {
        let value = serde_json::to_value(DashboardMetrics::baseline()).unwrap();
        assert_eq!(value["totalOrders"], 2_350);
        assert!(value.get("conversionRate").is_some());
    }
}
