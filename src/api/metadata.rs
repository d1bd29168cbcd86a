//! Metadata endpoints: synchronising a database connection and reading back
//! the tables and columns discovered for it.

use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::error::Result;

/// Body for `POST /metadata/sync`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncPayload {
    /// Database URL the backend should introspect.
    pub connection_url: String,

    /// Display name to store with the connection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Force a fresh introspection even if metadata is already stored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh: Option<bool>,
}

impl SyncPayload {
    /// Creates a payload for the given connection URL.
    pub fn new(connection_url: impl Into<String>) -> Self {
        Self {
            connection_url: connection_url.into(),
            name: None,
            refresh: None,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the refresh flag.
    pub fn with_refresh(mut self, refresh: bool) -> Self {
        self.refresh = Some(refresh);
        self
    }
}

/// Body for `PUT /metadata/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateConnectionPayload {
    /// New display name; `None` clears it.
    pub name: Option<String>,
}

/// A saved database connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionOut {
    pub id: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    pub connection_url: String,

    /// Timestamp of the last successful sync, as sent by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_synced: Option<String>,
}

/// A column as reported by metadata sync.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub name: String,
    pub data_type: String,
}

/// A table or view as reported by metadata sync.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableInfo {
    pub schema: String,
    pub name: String,
    pub is_view: bool,
    pub columns: Vec<ColumnInfo>,
}

impl TableInfo {
    /// Returns `schema.name`.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.schema, self.name)
    }
}

/// A connection together with its discovered tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataResponse {
    pub connection: ConnectionOut,
    pub tables: Vec<TableInfo>,
}

impl ApiClient {
    /// Synchronises metadata for a connection URL.
    pub async fn sync_metadata(&self, payload: &SyncPayload) -> Result<MetadataResponse> {
        self.post("/metadata/sync", payload).await
    }

    /// Lists every saved connection.
    pub async fn fetch_connections(&self) -> Result<Vec<ConnectionOut>> {
        self.get("/metadata").await
    }

    /// Returns stored metadata for one connection.
    pub async fn get_metadata(&self, connection_id: i64) -> Result<MetadataResponse> {
        self.get(&format!("/metadata/{connection_id}")).await
    }

    /// Renames a saved connection.
    pub async fn update_connection(
        &self,
        connection_id: i64,
        payload: &UpdateConnectionPayload,
    ) -> Result<ConnectionOut> {
        self.put(&format!("/metadata/{connection_id}"), payload)
            .await
    }
}
