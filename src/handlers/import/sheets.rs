use axum::{extract::rejection::JsonRejection, Json};
use chrono::Utc;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::import::{normalize, summarize};
use crate::validation::{validate, SheetsImportPayload};

/// POST /api/import/sheets - Import rows exported from Google Sheets
///
/// Each row may use the camelCase keys (`storeName`) or the spreadsheet
/// headers (`"Store Name"`); both resolve to the same field.
pub async fn import_sheets(
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(body) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;

    let payload = validate::<SheetsImportPayload>(&body).into_result("Invalid data format")?;

    let rows = normalize(&payload.rows);
    let metrics = summarize(&rows);

    tracing::info!(
        "Sheets import: {} of {} rows kept",
        rows.len(),
        payload.rows.len()
    );

    Ok(Json(json!({
        "success": true,
        "message": format!("Successfully imported {} rows from Google Sheets", rows.len()),
        "metrics": metrics,
        "rowCount": rows.len(),
        "timestamp": Utc::now(),
    })))
}

/// GET /api/import/sheets - Usage example for the import payload
pub async fn sheets_usage() -> Json<Value> {
    Json(json!({
        "message": "Google Sheets import endpoint",
        "usage": {
            "method": "POST",
            "contentType": "application/json",
            "body": {
                "rows": [
                    {
                        "Store Name": "Pet Palace",
                        "Location": "Montreal, QC",
                        "Status": "Sample given",
                        "Sales Rep": "Alex",
                        "Date": "2024-01-15",
                        "Notes": "Follow up next week"
                    }
                ]
            }
        },
        "supportedColumns": [
            { "field": "storeName", "alternate": "Store Name", "required": true },
            { "field": "location", "alternate": "Location", "required": false },
            { "field": "status", "alternate": "Status", "required": false },
            { "field": "salesRep", "alternate": "Sales Rep", "required": false },
            { "field": "date", "alternate": "Date", "required": false },
            { "field": "notes", "alternate": "Notes", "required": false }
        ],
        "statusKeywords": {
            "samplesGiven": ["sample"],
            "storesBoughtOnce": ["first purchase", "bought once"],
            "storesBoughtMoreThanOnce": ["repeat", "more than once"]
        }
    }))
}
