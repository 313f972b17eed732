mod common;

use axum::http::StatusCode;

use common::{multipart_file, multipart_without_file, send, test_app};

const HEADER: &str = "Store Name,Location,Status,Sales Rep,Date,Notes";

#[tokio::test]
async fn valid_rows_are_returned_and_bad_rows_reported() {
    let csv = format!(
        "{HEADER}\nPet Palace,Montreal,Sample given,Alex,2024-01-05,Liked it\n,Toronto,Visited,Sam,2024-01-06,\nLonely\nKitty Korner,Ottawa\n"
    );

    let res = send(test_app(), multipart_file("stores.csv", "text/csv", csv.as_bytes())).await;
    assert_eq!(res.status, StatusCode::OK);

    let body = res.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Successfully processed 2 rows");
    assert_eq!(body["headers"][0], "Store Name");
    assert_eq!(body["data"][0]["storeName"], "Pet Palace");
    assert_eq!(body["data"][0]["salesRep"], "Alex");
    assert_eq!(body["data"][1]["storeName"], "Kitty Korner");
    assert_eq!(body["data"][1]["notes"], "");

    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0], "Row 3: Store name is required");
}

#[tokio::test]
async fn errors_key_is_omitted_when_every_row_is_valid() {
    let csv = format!("{HEADER}\nPet Palace,Montreal\n");

    let res = send(test_app(), multipart_file("stores.csv", "text/csv", csv.as_bytes())).await;
    assert_eq!(res.status, StatusCode::OK);

    let body = res.json();
    assert_eq!(body["message"], "Successfully processed 1 rows");
    assert!(body.get("errors").is_none());
}

#[tokio::test]
async fn csv_extension_is_enough_without_csv_mime() {
    let res = send(
        test_app(),
        multipart_file("Export.CSV", "application/octet-stream", b"Store Name,Location\nA,B\n"),
    )
    .await;

    assert_eq!(res.status, StatusCode::OK);
}

#[tokio::test]
async fn oversized_upload_is_rejected_with_size_message() {
    let mut content = format!("{HEADER}\n").into_bytes();
    content.resize(6 * 1024 * 1024, b'a');

    let res = send(test_app(), multipart_file("large.csv", "text/csv", &content)).await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.json()["error"], "File must be less than 5MB");
}

#[tokio::test]
async fn upload_over_body_limit_still_checks_type_first() {
    let content = vec![b'%'; 11 * 1024 * 1024];

    let res = send(test_app(), multipart_file("big.pdf", "application/pdf", &content)).await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.json()["error"], "File must be a CSV");
}

#[tokio::test]
async fn csv_over_body_limit_is_rejected_with_size_message() {
    let content = vec![b'a'; 11 * 1024 * 1024];

    let res = send(test_app(), multipart_file("huge.csv", "text/csv", &content)).await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.json()["error"], "File must be less than 5MB");
}

#[tokio::test]
async fn missing_file_is_rejected() {
    let res = send(test_app(), multipart_without_file()).await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.json()["error"], "No file provided");
}

#[tokio::test]
async fn non_csv_file_is_rejected() {
    let res = send(test_app(), multipart_file("notes.txt", "text/plain", b"hello,world\n")).await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.json()["error"], "File must be a CSV");
}

#[tokio::test]
async fn import_responses_carry_cors_headers() {
    let res = send(test_app(), multipart_without_file()).await;

    assert_eq!(
        res.header(axum::http::header::ACCESS_CONTROL_ALLOW_ORIGIN),
        Some("*")
    );
}
