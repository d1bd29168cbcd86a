//! Natural-language query endpoint.
//!
//! The backend turns the prompt into SQL, runs it, and returns both the
//! generated statement and its result rows.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::query::Row;
use crate::client::ApiClient;
use crate::error::Result;

/// Body for `POST /nl-query`.
///
/// `api_key` is forwarded to the backend verbatim and never stored here.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NlQueryPayload {
    pub connection_id: i64,
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl NlQueryPayload {
    /// Creates a payload for the given connection and prompt.
    pub fn new(connection_id: i64, prompt: impl Into<String>) -> Self {
        Self {
            connection_id,
            prompt: prompt.into(),
            api_key: None,
        }
    }

    /// Sets the LLM API key the backend should use for this call.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
}

impl fmt::Debug for NlQueryPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NlQueryPayload")
            .field("connection_id", &self.connection_id)
            .field("prompt", &self.prompt)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Result of a natural-language query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NlQueryResult {
    /// SQL the backend generated from the prompt.
    pub generated_sql: String,

    /// Column names, in row order.
    pub columns: Vec<String>,

    pub rows: Vec<Row>,

    /// Whether the backend appended a row limit to the generated SQL.
    #[serde(default)]
    pub limit_added: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiClient {
    /// Translates a prompt into SQL on the backend and runs it.
    pub async fn nl_query(&self, payload: &NlQueryPayload) -> Result<NlQueryResult> {
        self.post("/nl-query", payload).await
    }
}
