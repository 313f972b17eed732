use axum::{
    extract::{
        multipart::{Field, MultipartError, MultipartRejection},
        Multipart,
    },
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::import::parse_csv;
use crate::types::ValidationResult;
use crate::validation::{validate_file, UploadedFile};

/// POST /api/import/csv - Import store contacts from an uploaded CSV file
///
/// Expects `multipart/form-data` with the file under the `file` field.
/// Rows that fail validation are reported in `errors` (omitted when empty)
/// while the valid rows are still returned in `data`.
pub async fn import_csv(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Value>, ApiError> {
    let mut multipart = multipart.map_err(|e| ApiError::bad_request(e.body_text()))?;

    let file = read_file_field(&mut multipart).await?;

    if let ValidationResult::Failure { error, .. } = validate_file(file.as_ref()) {
        return Err(ApiError::bad_request(error));
    }
    let file = file.ok_or_else(|| ApiError::bad_request("No file provided"))?;

    let outcome = parse_csv(&file.text());
    tracing::info!(
        "CSV import of '{}' ({} bytes): {} rows accepted, {} rejected",
        file.name,
        file.size(),
        outcome.valid_rows.len(),
        outcome.row_errors.len()
    );

    let mut response = json!({
        "success": true,
        "message": format!("Successfully processed {} rows", outcome.valid_rows.len()),
        "data": outcome.valid_rows,
        "headers": outcome.headers,
    });

    if !outcome.row_errors.is_empty() {
        let errors: Vec<String> = outcome.row_errors.iter().map(ToString::to_string).collect();
        response["errors"] = json!(errors);
    }

    Ok(Json(response))
}

/// Buffer the `file` field completely before anything parses it
async fn read_file_field(multipart: &mut Multipart) -> Result<Option<UploadedFile>, ApiError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() == Some("file") {
            return read_upload(field).await.map(Some);
        }
    }

    Ok(None)
}

async fn read_upload(field: Field<'_>) -> Result<UploadedFile, ApiError> {
    let name = field.file_name().unwrap_or_default().to_string();
    let content_type = field.content_type().map(str::to_string);

    let bytes = match field.bytes().await {
        Ok(bytes) => bytes,
        Err(err) if err.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            // Body limit hit: the type check still runs before the size check
            let metadata = UploadedFile {
                name,
                content_type,
                bytes: Vec::new(),
            };
            if let ValidationResult::Failure { error, .. } = validate_file(Some(&metadata)) {
                return Err(ApiError::bad_request(error));
            }
            return Err(multipart_error(err));
        }
        Err(err) => return Err(multipart_error(err)),
    };

    Ok(UploadedFile {
        name,
        content_type,
        bytes: bytes.to_vec(),
    })
}

fn multipart_error(err: MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return ApiError::bad_request("File must be less than 5MB");
    }
    ApiError::bad_request(err.body_text())
}
