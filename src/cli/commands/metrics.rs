use chrono::Utc;
use serde_json::{json, Map, Value};

use crate::cli::client::ApiClient;
use crate::cli::config::load_session_store;
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;

pub async fn handle(
    period: Option<String>,
    details: bool,
    server: &str,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let store = load_session_store()?;
    let client = ApiClient::new(server)?.with_token(store.bearer_token(Utc::now()));

    let response = if period.is_none() && !details {
        client.get_json("/api/dashboard/metrics").await?
    } else {
        let mut body = Map::new();
        if let Some(period) = period {
            body.insert("period".to_string(), json!(period));
        }
        body.insert("includeDetails".to_string(), json!(details));
        client.post_json("/api/dashboard/metrics", &Value::Object(body)).await?
    };

    if let OutputFormat::Text = output_format {
        let data = &response["data"];
        println!("Period:          {}", response["period"].as_str().unwrap_or("month"));
        println!("Revenue:         {} ({}%)", data["totalRevenue"], data["revenueChange"]);
        println!("Orders:          {} ({}%)", data["totalOrders"], data["ordersChange"]);
        println!("Active stores:   {} ({}%)", data["activeStores"], data["storesChange"]);
        println!("Conversion rate: {}% ({})", data["conversionRate"], data["conversionChange"]);

        if let Some(months) = response["details"]["salesByMonth"].as_array() {
            for month in months {
                println!("  {}  {}  {} orders", month["month"].as_str().unwrap_or("?"), month["revenue"], month["orders"]);
            }
        }
        return Ok(());
    }

    output_success(&output_format, "Metrics retrieved", Some(response))
}
