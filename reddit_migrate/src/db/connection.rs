//! Supabase connection handling
//!
//! This module provides a thin client over the PostgREST API a Supabase project
//! exposes under `/rest/v1`.

use reqwest::{header, Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::config::Config;
use crate::error::{Error, Result};

const REST_PREFIX: &str = "rest/v1";

/// Client bound to one project URL and credential
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    http: Client,
    base_url: String,
    key: Option<String>,
}

/// Error body returned by PostgREST
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

impl SupabaseClient {
    /// Create a new client from configuration
    pub fn connect(config: &Config) -> Result<Self> {
        let http = Client::builder().build()?;

        Ok(Self {
            http,
            base_url: config.supabase_url.trim_end_matches('/').to_string(),
            key: config.supabase_key.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}/{}", self.base_url, REST_PREFIX, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header(header::ACCEPT, "application/json");
        match &self.key {
            Some(key) => request
                .header("apikey", key)
                .header(header::AUTHORIZATION, format!("Bearer {}", key)),
            None => request,
        }
    }

    /// Call a remote procedure with JSON parameters
    pub async fn rpc(&self, function: &str, params: &Value) -> Result<Value> {
        let path = format!("rpc/{}", function);
        tracing::debug!(method = "POST", path = %path, "Calling remote procedure");

        let response = self
            .authorize(self.http.post(self.endpoint(&path)))
            .json(params)
            .send()
            .await?;

        let body = check_status(response).await?.text().await?;
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }

    /// Select `columns` from `table` where `column` is one of `values`
    pub async fn select_in<T>(
        &self,
        table: &str,
        columns: &[&str],
        column: &str,
        values: &[&str],
    ) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let select = columns.join(",");
        let filter = format!("in.({})", values.join(","));
        tracing::debug!(method = "GET", table, select = %select, filter = %filter, "Reading rows");

        let response = self
            .authorize(self.http.get(self.endpoint(table)))
            .query(&[("select", select.as_str()), (column, filter.as_str())])
            .send()
            .await?;

        Ok(check_status(response).await?.json().await?)
    }
}

/// Turn a non-success response into an `Error::ApiError`
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorBody>(&text)
        .ok()
        .and_then(|body| body.message)
        .unwrap_or_else(|| format!("HTTP {}: {}", status.as_u16(), text.trim()));

    Err(Error::ApiError {
        status: status.as_u16(),
        message,
    })
}
