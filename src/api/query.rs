//! SQL query endpoint.

use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::error::Result;

/// A single result row; cells keep whatever JSON type the backend sent.
pub type Row = Vec<serde_json::Value>;

/// Body for `POST /query`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunQueryPayload {
    pub connection_id: i64,
    pub sql: String,
}

impl RunQueryPayload {
    /// Creates a payload for the given connection and SQL text.
    pub fn new(connection_id: i64, sql: impl Into<String>) -> Self {
        Self {
            connection_id,
            sql: sql.into(),
        }
    }
}

/// Column metadata in a query result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryColumn {
    pub name: String,

    /// Type label, when the backend knows it.
    #[serde(
        rename = "type",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub column_type: Option<String>,
}

/// Result of running SQL against a connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    pub columns: Vec<QueryColumn>,
    pub rows: Vec<Row>,

    /// Whether the backend silently applied a row limit.
    #[serde(default)]
    pub limit_added: bool,

    /// Advisory message from the backend, e.g. why a limit was added.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl QueryResult {
    /// Returns the column names in order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Returns true if no rows came back.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl ApiClient {
    /// Runs literal SQL on the backend.
    pub async fn run_query(&self, payload: &RunQueryPayload) -> Result<QueryResult> {
        self.post("/query", payload).await
    }
}
