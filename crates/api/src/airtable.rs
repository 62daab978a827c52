//! REST client for the Airtable records API.
//!
//! Wraps the records endpoints of a single Airtable base (search, fetch,
//! create, partial update) using [`reqwest`]. The interview app proxies these
//! calls so the API key never reaches the browser.

use std::collections::BTreeMap;

use reqwest::Url;
use serde::{Deserialize, Serialize};

/// Default Airtable REST endpoint.
const DEFAULT_API_URL: &str = "https://api.airtable.com/v0";

/// Airtable connection settings.
#[derive(Debug, Clone)]
pub struct AirtableConfig {
    /// Base REST URL (default: `https://api.airtable.com/v0`).
    pub api_url: String,
    /// Personal access token or API key sent as a Bearer token.
    pub api_key: String,
    /// Id of the base all record calls are scoped to.
    pub base_id: String,
}

impl AirtableConfig {
    /// Load Airtable configuration from environment variables.
    ///
    /// | Env Var            | Default                        |
    /// |--------------------|--------------------------------|
    /// | `AIRTABLE_API_URL` | `https://api.airtable.com/v0`  |
    /// | `AIRTABLE_API_KEY` | empty                          |
    /// | `AIRTABLE_BASE_ID` | empty                          |
    pub fn from_env() -> Self {
        Self {
            api_url: std::env::var("AIRTABLE_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into()),
            api_key: std::env::var("AIRTABLE_API_KEY").unwrap_or_default(),
            base_id: std::env::var("AIRTABLE_BASE_ID").unwrap_or_default(),
        }
    }
}

/// A record as returned by Airtable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<String>,
    #[serde(default)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

/// Field values for creating a record or partially updating one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordFields {
    pub fields: serde_json::Map<String, serde_json::Value>,
}

/// One page of a list-records response.
#[derive(Debug, Deserialize)]
struct RecordPage {
    records: Vec<Record>,
    offset: Option<String>,
}

/// Errors from the Airtable REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum AirtableError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("Airtable request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Airtable returned a non-2xx status code.
    #[error("Airtable API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The configured API URL cannot carry path segments.
    #[error("Invalid Airtable API URL: {0}")]
    InvalidUrl(String),
}

/// HTTP client bound to one Airtable base.
pub struct AirtableClient {
    client: reqwest::Client,
    config: AirtableConfig,
}

impl AirtableClient {
    pub fn new(config: AirtableConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// List records of `table`, keeping only those whose fields equal every
    /// value in `filters`. Follows pagination until all pages are read.
    pub async fn search_records(
        &self,
        table: &str,
        filters: &BTreeMap<String, String>,
    ) -> Result<Vec<Record>, AirtableError> {
        let url = self.url(&[table])?;
        let formula = filter_formula(filters);

        let mut records = Vec::new();
        let mut offset: Option<String> = None;
        loop {
            let mut request = self.client.get(url.clone()).bearer_auth(&self.config.api_key);
            if let Some(formula) = &formula {
                request = request.query(&[("filterByFormula", formula)]);
            }
            if let Some(offset) = &offset {
                request = request.query(&[("offset", offset)]);
            }

            let page: RecordPage = Self::parse_response(request.send().await?).await?;
            records.extend(page.records);

            match page.offset {
                Some(next) => offset = Some(next),
                None => break,
            }
        }
        Ok(records)
    }

    /// Fetch a single record by id.
    pub async fn fetch_record(&self, table: &str, record_id: &str) -> Result<Record, AirtableError> {
        let response = self
            .client
            .get(self.url(&[table, record_id])?)
            .bearer_auth(&self.config.api_key)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Create a record in `table`.
    pub async fn create_record(
        &self,
        table: &str,
        record: &RecordFields,
    ) -> Result<Record, AirtableError> {
        let response = self
            .client
            .post(self.url(&[table])?)
            .bearer_auth(&self.config.api_key)
            .json(record)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Update only the given fields of a record.
    pub async fn update_record(
        &self,
        table: &str,
        record_id: &str,
        update: &RecordFields,
    ) -> Result<Record, AirtableError> {
        let response = self
            .client
            .patch(self.url(&[table, record_id])?)
            .bearer_auth(&self.config.api_key)
            .json(update)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    // ---- private helpers ----

    /// Build `{api_url}/{base_id}/{segments...}` with each segment escaped.
    fn url(&self, segments: &[&str]) -> Result<Url, AirtableError> {
        let mut url = Url::parse(&self.config.api_url)
            .map_err(|e| AirtableError::InvalidUrl(format!("{}: {e}", self.config.api_url)))?;
        url.path_segments_mut()
            .map_err(|_| AirtableError::InvalidUrl(self.config.api_url.clone()))?
            .pop_if_empty()
            .push(&self.config.base_id)
            .extend(segments);
        Ok(url)
    }

    /// Check the status and deserialize the JSON body.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, AirtableError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(AirtableError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json::<T>().await?)
    }
}

/// Build an Airtable `filterByFormula` matching every `{column} = 'value'`
/// pair. Returns `None` when there is nothing to filter on.
pub fn filter_formula(filters: &BTreeMap<String, String>) -> Option<String> {
    if filters.is_empty() {
        return None;
    }
    let clauses: Vec<String> = filters
        .iter()
        .map(|(column, value)| {
            format!(
                "{{{}}}='{}'",
                column.replace('}', "\\}"),
                value.replace('\\', "\\\\").replace('\'', "\\'")
            )
        })
        .collect();
    Some(format!("AND({})", clauses.join(",")))
}
