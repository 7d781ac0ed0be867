//! HTTP client for the admin API.

use anyhow::{Context, Result};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::path::Path;
use std::time::Duration;
use uuid::Uuid;
use wellstore_core::models::{
    Category, ContactMessage, IngestionResult, MessageStatus, MessageStatusCounts, Product, Vendor,
};

const API_PREFIX: &str = "/api/v0";
const DEFAULT_API_URL: &str = "http://localhost:3000";

#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL from `WELLSTORE_API_URL`, defaulting to a local server.
    pub fn from_env(timeout: Duration) -> Result<Self> {
        let base_url =
            std::env::var("WELLSTORE_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Self::new(base_url, timeout)
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, API_PREFIX, path)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await.context("Failed to send request")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(anyhow::anyhow!(
                "API request failed with status {}: {}",
                status,
                error_text
            ));
        }

        response
            .json()
            .await
            .context("Failed to parse response as JSON")
    }

    /// Upload a product archive and return the import report.
    pub async fn import_products(&self, archive: &Path) -> Result<IngestionResult> {
        let data = tokio::fs::read(archive)
            .await
            .with_context(|| format!("Failed to read archive: {}", archive.display()))?;
        let filename = archive
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("products.zip")
            .to_string();

        let part = reqwest::multipart::Part::bytes(data)
            .file_name(filename)
            .mime_str("application/zip")
            .context("Invalid content type")?;
        let form = reqwest::multipart::Form::new().part("file", part);

        self.send_json(
            self.client
                .post(self.build_url("/products/import"))
                .multipart(form),
        )
        .await
    }

    /// Download the import template archive.
    pub async fn download_template(&self) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(self.build_url("/products/import/template"))
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow::anyhow!("Template download failed with status {}", status));
        }

        let bytes = response
            .bytes()
            .await
            .context("Failed to read template body")?;
        Ok(bytes.to_vec())
    }

    pub async fn list_products(&self, limit: i64, offset: i64) -> Result<Vec<Product>> {
        self.send_json(
            self.client
                .get(self.build_url("/products"))
                .query(&[("limit", limit), ("offset", offset)]),
        )
        .await
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>> {
        self.send_json(self.client.get(self.build_url("/categories")))
            .await
    }

    pub async fn create_category(&self, name: &str) -> Result<Category> {
        self.send_json(
            self.client
                .post(self.build_url("/categories"))
                .json(&serde_json::json!({ "name": name })),
        )
        .await
    }

    pub async fn list_vendors(&self) -> Result<Vec<Vendor>> {
        self.send_json(self.client.get(self.build_url("/vendors")))
            .await
    }

    pub async fn create_vendor(&self, name: &str) -> Result<Vendor> {
        self.send_json(
            self.client
                .post(self.build_url("/vendors"))
                .json(&serde_json::json!({ "name": name })),
        )
        .await
    }

    pub async fn list_messages(
        &self,
        status: Option<MessageStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ContactMessage>> {
        let mut query = vec![("limit", limit.to_string()), ("offset", offset.to_string())];
        if let Some(status) = status {
            query.push(("status", status.to_string()));
        }
        self.send_json(self.client.get(self.build_url("/messages")).query(&query))
            .await
    }

    pub async fn message_counts(&self) -> Result<MessageStatusCounts> {
        self.send_json(self.client.get(self.build_url("/messages/counts")))
            .await
    }

    pub async fn set_message_status(
        &self,
        id: Uuid,
        status: MessageStatus,
    ) -> Result<ContactMessage> {
        self.send_json(
            self.client
                .patch(self.build_url(&format!("/messages/{}/status", id)))
                .json(&serde_json::json!({ "status": status })),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_trims_trailing_slash() {
        let client =
            ApiClient::new("http://admin.local/".to_string(), Duration::from_secs(1)).unwrap();
        assert_eq!(
            client.build_url("/products/import"),
            "http://admin.local/api/v0/products/import"
        );
    }
}
