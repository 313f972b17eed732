use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::Subcommand;
use serde_json::{json, Value};

use crate::cli::client::ApiClient;
use crate::cli::config::load_session_store;
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum ImportCommands {
    #[command(about = "Upload a CSV file of store contacts")]
    Csv {
        #[arg(help = "Path to the CSV file")]
        path: PathBuf,
    },

    #[command(about = "Import rows exported from Google Sheets (JSON array or {\"rows\": [...]})")]
    Sheets {
        #[arg(help = "Path to the JSON file")]
        path: PathBuf,
    },
}

pub async fn handle(cmd: ImportCommands, server: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    let store = load_session_store()?;
    let client = ApiClient::new(server)?.with_token(store.bearer_token(Utc::now()));

    match cmd {
        ImportCommands::Csv { path } => {
            let bytes = std::fs::read(&path)?;
            let response = client
                .post_file("/api/import/csv", file_name(&path), "text/csv", bytes)
                .await?;

            let message = response["message"].as_str().unwrap_or("CSV processed").to_string();
            if let (OutputFormat::Text, Some(errors)) = (&output_format, response["errors"].as_array()) {
                for error in errors.iter().filter_map(Value::as_str) {
                    eprintln!("  {}", error);
                }
            }
            output_success(&output_format, &message, Some(response))
        }
        ImportCommands::Sheets { path } => {
            let content = std::fs::read_to_string(&path)?;
            let body = sheets_body(serde_json::from_str(&content)?);

            let response = client.post_json("/api/import/sheets", &body).await?;
            let message = response["message"].as_str().unwrap_or("Rows imported").to_string();

            if let OutputFormat::Text = output_format {
                let metrics = &response["metrics"];
                println!("Stores contacted:           {}", metrics["totalStoresContacted"]);
                println!("Samples given:              {}", metrics["samplesGiven"]);
                println!("Stores bought once:         {}", metrics["storesBoughtOnce"]);
                println!("Stores bought more than once: {}", metrics["storesBoughtMoreThanOnce"]);
            }
            output_success(&output_format, &message, Some(response))
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload.csv".to_string())
}

/// A bare array is wrapped as `{ "rows": [...] }`
fn sheets_body(value: Value) -> Value {
    match value {
        Value::Array(rows) => json!({ "rows": rows }),
        other => other,
    }
}
