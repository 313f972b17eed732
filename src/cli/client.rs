use std::time::Duration;

use anyhow::anyhow;
use reqwest::{multipart, RequestBuilder, Response};
use serde_json::Value;

/// Thin JSON client for the Dashboard API
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    pub fn with_token(mut self, token: Option<&str>) -> Self {
        self.token = token.map(str::to_string);
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    pub async fn get_json(&self, path: &str) -> anyhow::Result<Value> {
        let request = self.authorize(self.http.get(self.url(path)));
        read_json(request.send().await?).await
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> anyhow::Result<Value> {
        let request = self.authorize(self.http.post(self.url(path)).json(body));
        read_json(request.send().await?).await
    }

    pub async fn post_file(
        &self,
        path: &str,
        file_name: String,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> anyhow::Result<Value> {
        let part = multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(content_type)?;
        let form = multipart::Form::new().part("file", part);

        let request = self.authorize(self.http.post(self.url(path)).multipart(form));
        read_json(request.send().await?).await
    }
}

/// Decode the body, turning `{ "error": ... }` responses into errors
async fn read_json(response: Response) -> anyhow::Result<Value> {
    let status = response.status();
    let body: Value = response.json().await.unwrap_or(Value::Null);

    if status.is_success() {
        return Ok(body);
    }

    let message = body
        .get("error")
        .and_then(Value::as_str)
        .unwrap_or("request failed");

    let details = body
        .get("details")
        .and_then(Value::as_array)
        .map(|fields| {
            fields
                .iter()
                .filter_map(|f| {
                    Some(format!(
                        "{}: {}",
                        f.get("field")?.as_str()?,
                        f.get("message")?.as_str()?
                    ))
                })
                .collect::<Vec<_>>()
                .join("; ")
        })
        .filter(|d| !d.is_empty());

    match details {
        Some(details) => Err(anyhow!("{} ({}): {}", message, status, details)),
        None => Err(anyhow!("{} ({})", message, status)),
    }
}
