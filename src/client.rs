//! HTTP client for the persistence and upload collaborators.
//!
//! Every request carries the configured bearer credential. Responses are
//! JSON; a non-success status becomes [`CliError::Server`] with whatever body
//! came back.

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use std::path::Path;

use editor::wire::DocumentRecord;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::CliError;
use crate::config::Config;

pub struct ApiClient {
    http: reqwest::Client,
    config: Config,
}

impl ApiClient {
    /// # Errors
    ///
    /// Fails without a token, or if the token isn't a valid header value.
    pub fn new(config: Config) -> Result<Self, CliError> {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {}", config.token()?))?);
        let http = reqwest::Client::builder().default_headers(headers).build()?;
        Ok(Self { http, config })
    }

    /// Create an assessment, or replace an existing one.
    ///
    /// # Errors
    ///
    /// Returns transport or server errors.
    pub async fn save_assessment(&self, id: Option<Uuid>, record: &DocumentRecord) -> Result<Value, CliError> {
        let (method, path) = assessment_route(id);
        let url = self.config.url(&path);
        info!(%method, %url, blocks = record.blocks.len(), "saving assessment");
        let response = self.http.request(method, &url).json(record).send().await?;
        read_json(response).await
    }

    /// Upload a file and return the stored reference.
    ///
    /// # Errors
    ///
    /// Returns IO, transport, or server errors, and
    /// [`CliError::MissingField`] if the response carries no `url`.
    pub async fn upload(&self, file: &Path) -> Result<String, CliError> {
        let bytes = tokio::fs::read(file).await?;
        let name = file.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
        let url = self.config.url("/api/uploads");
        info!(%url, %name, size = bytes.len(), "uploading file");
        let response = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, content_type(file))
            .query(&[("filename", name.as_str())])
            .body(bytes)
            .send()
            .await?;
        let body = read_json(response).await?;
        upload_reference(&body)
    }
}

/// Method and path for saving: POST creates, PUT replaces.
#[must_use]
pub fn assessment_route(id: Option<Uuid>) -> (reqwest::Method, String) {
    match id {
        Some(id) => (reqwest::Method::PUT, format!("/api/assessments/{id}")),
        None => (reqwest::Method::POST, "/api/assessments".to_owned()),
    }
}

/// Media type for an upload, by file extension.
#[must_use]
pub fn content_type(file: &Path) -> &'static str {
    let ext = file.extension().map(|e| e.to_string_lossy().to_ascii_lowercase()).unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// The `url` an upload response points at.
///
/// # Errors
///
/// Returns [`CliError::MissingField`] if absent or empty.
pub fn upload_reference(body: &Value) -> Result<String, CliError> {
    body.get("url")
        .and_then(Value::as_str)
        .filter(|url| !url.is_empty())
        .map(ToOwned::to_owned)
        .ok_or(CliError::MissingField("url"))
}

async fn read_json(response: reqwest::Response) -> Result<Value, CliError> {
    let status = response.status();
    let value = response.json::<Value>().await.unwrap_or(Value::Null);
    if !status.is_success() {
        return Err(CliError::Server { status: status.as_u16(), message: value.to_string() });
    }
    Ok(value)
}
