//! HTTP transport for the hosted backend.
//!
//! Covers the two APIs the catalog needs: the REST table API
//! (`/rest/v1/{table}`) and the storage object API
//! (`/storage/v1/object/{bucket}/{name}`).

use bytes::Bytes;
use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE};
use reqwest::{Client, Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ServiceConfig;
use crate::error::Error;

/// `cache-control` max-age for uploaded objects, in seconds.
pub const CACHE_CONTROL_SECS: u32 = 3600;

/// Authenticated client for one backend.
#[derive(Debug, Clone)]
pub struct RestClient {
    http: Client,
    config: ServiceConfig,
}

impl RestClient {
    /// Build a client. Fails only if the TLS backend cannot be initialised.
    pub fn new(config: ServiceConfig) -> Result<Self, Error> {
        let http = Client::builder().timeout(config.timeout).build()?;

        tracing::debug!(url = %config.url, timeout = ?config.timeout, "created rest client");

        Ok(Self { http, config })
    }

    /// The configuration this client was built from.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// URL of a table endpoint.
    pub fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.config.url, table)
    }

    /// URL of an object upload endpoint.
    pub fn object_url(&self, bucket: &str, name: &str) -> String {
        format!("{}/storage/v1/object/{}/{}", self.config.url, bucket, name)
    }

    /// Request listing published rows of `table`, oldest first.
    ///
    /// Categories are not filtered server-side: the backend compares labels
    /// exactly, while catalogs match them after normalization.
    pub fn select_request(&self, table: &str) -> Result<Request, Error> {
        let query = [
            ("select", "*"),
            ("published", "eq.true"),
            ("order", "created_at.asc"),
        ];

        let builder = self.http.get(self.table_url(table)).query(&query);
        Ok(self.authorize(builder).build()?)
    }

    /// Request inserting one row and returning it.
    pub fn insert_request<B: Serialize + ?Sized>(&self, table: &str, row: &B) -> Result<Request, Error> {
        let builder = self
            .http
            .post(self.table_url(table))
            .header("Prefer", "return=representation")
            .json(row);
        Ok(self.authorize(builder).build()?)
    }

    /// Request uploading an object. Existing objects are never replaced.
    pub fn upload_request(
        &self,
        bucket: &str,
        name: &str,
        content_type: &str,
        bytes: Bytes,
    ) -> Result<Request, Error> {
        let builder = self
            .http
            .post(self.object_url(bucket, name))
            .header(CONTENT_TYPE, content_type)
            .header(CACHE_CONTROL, format!("max-age={}", CACHE_CONTROL_SECS))
            .header("x-upsert", "false")
            .body(bytes);
        Ok(self.authorize(builder).build()?)
    }

    /// Fetch published rows of `table`.
    pub async fn select<T: DeserializeOwned>(&self, table: &str) -> Result<Vec<T>, Error> {
        let request = self.select_request(table)?;
        let response = self.execute(request).await?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Insert one row and return the stored representation.
    pub async fn insert<B, T>(&self, table: &str, row: &B) -> Result<T, Error>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.insert_request(table, row)?;
        let response = self.execute(request).await?;
        let body = response.bytes().await?;
        let mut rows: Vec<T> = serde_json::from_slice(&body)?;
        if rows.is_empty() {
            return Err(Error::InvalidRow(format!("insert into {} returned no row", table)));
        }
        Ok(rows.swap_remove(0))
    }

    /// Upload an object into `bucket` under `name`.
    pub async fn upload(
        &self,
        bucket: &str,
        name: &str,
        content_type: &str,
        bytes: Bytes,
    ) -> Result<(), Error> {
        let request = self.upload_request(bucket, name, content_type, bytes)?;
        self.execute(request).await?;
        Ok(())
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.config.key)
            .bearer_auth(&self.config.key)
    }

    async fn execute(&self, request: Request) -> Result<Response, Error> {
        let method = request.method().clone();
        let path = request.url().path().to_string();
        let response = self.http.execute(request).await?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(%method, path = %path, status = status.as_u16(), "request succeeded");
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "unknown error".to_string());
        tracing::warn!(%method, path = %path, status = status.as_u16(), body = %body, "request failed");

        Err(Error::Status {
            status: status.as_u16(),
            body,
        })
    }
}
