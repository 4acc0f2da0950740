//! PostgREST (Supabase-style) backend over `reqwest`.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::Value;

use super::{Query, RecordStore, Result, StoreError};
use crate::util::encode_query;

/// Record store reached through the `/rest/v1/<table>` endpoints of a hosted project.
#[derive(Clone, Debug)]
pub struct RestStore {
    client: reqwest::Client,
    base_url: String,
}

impl RestStore {
    /// What: Build a client for the project at `base_url` authenticated with `api_key`.
    ///
    /// Inputs:
    /// - `base_url`: Project URL, e.g. `https://xyz.supabase.co` (trailing slash ignored).
    /// - `api_key`: Anonymous (public) API key; sent as `apikey` and bearer token.
    ///
    /// Output:
    /// - A ready client, or [`StoreError::Config`] when either value is empty or not a valid header.
    ///
    /// # Errors
    /// - Returns `Err` for empty settings or when the HTTP client cannot be constructed.
    ///
    /// Details:
    /// - No request timeout is configured; a hung call leaves its widget in the loading state
    ///   until the next scheduled refresh.
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        let api_key = api_key.trim();
        if base_url.is_empty() {
            return Err(StoreError::Config("store_url is empty".into()));
        }
        if api_key.is_empty() {
            return Err(StoreError::Config("store_key is empty".into()));
        }
        let key = HeaderValue::from_str(api_key)
            .map_err(|e| StoreError::Config(format!("invalid store_key: {e}")))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|e| StoreError::Config(format!("invalid store_key: {e}")))?;
        let mut headers = HeaderMap::new();
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let client = reqwest::Client::builder()
            .user_agent(format!("trendboard/{}", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;
        Ok(Self { client, base_url })
    }

    /// Endpoint URL for `table` with an optional encoded query string.
    fn url(&self, table: &str, params: &[(String, String)]) -> String {
        let base = format!("{}/rest/v1/{table}", self.base_url);
        if params.is_empty() {
            base
        } else {
            format!("{base}?{}", encode_query(params))
        }
    }

    /// What: Turn a response into rows, mapping non-success statuses to [`StoreError::Status`].
    ///
    /// Details:
    /// - An empty body (204 No Content) yields no rows.
    /// - A single JSON object is wrapped into a one-element list.
    async fn rows(table: &str, resp: reqwest::Response) -> Result<Vec<Value>> {
        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            tracing::warn!(table, status = status.as_u16(), body = %body, "store request rejected");
            return Err(StoreError::Status {
                table: table.to_string(),
                status: status.as_u16(),
                body,
            });
        }
        if body.trim().is_empty() {
            return Ok(Vec::new());
        }
        let value: Value = serde_json::from_str(&body).map_err(|source| StoreError::Decode {
            table: table.to_string(),
            source,
        })?;
        Ok(match value {
            Value::Array(rows) => rows,
            Value::Null => Vec::new(),
            other => vec![other],
        })
    }
}

#[async_trait]
impl RecordStore for RestStore {
    async fn select(&self, query: &Query) -> Result<Vec<Value>> {
        let url = self.url(query.table(), &query.to_params());
        tracing::debug!(table = query.table(), %url, "store select");
        let resp = self.client.get(url).send().await?;
        Self::rows(query.table(), resp).await
    }

    async fn insert(&self, table: &str, row: Value) -> Result<Vec<Value>> {
        tracing::debug!(table, "store insert");
        let resp = self
            .client
            .post(self.url(table, &[]))
            .header(CONTENT_TYPE, "application/json")
            .header("Prefer", "return=representation")
            .json(&Value::Array(vec![row]))
            .send()
            .await?;
        Self::rows(table, resp).await
    }

    async fn update(&self, query: &Query, patch: Value) -> Result<usize> {
        tracing::debug!(table = query.table(), "store update");
        let resp = self
            .client
            .patch(self.url(query.table(), &query.filter_params()))
            .header(CONTENT_TYPE, "application/json")
            .header("Prefer", "return=representation")
            .json(&patch)
            .send()
            .await?;
        Ok(Self::rows(query.table(), resp).await?.len())
    }

    async fn delete(&self, query: &Query) -> Result<usize> {
        tracing::debug!(table = query.table(), "store delete");
        let resp = self
            .client
            .delete(self.url(query.table(), &query.filter_params()))
            .header("Prefer", "return=representation")
            .send()
            .await?;
        Ok(Self::rows(query.table(), resp).await?.len())
    }
}
