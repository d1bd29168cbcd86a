//! Typed bindings for the db_query backend endpoints.
//!
//! Each submodule owns the request and response shapes for one endpoint
//! group and adds its operations to [`ApiClient`]. [`DbQueryApi`] collects
//! the same operations behind a trait for callers that want to swap the
//! transport out.

pub mod health;
pub mod metadata;
pub mod nl_query;
pub mod query;

pub use health::HealthStatus;
pub use metadata::{
    ColumnInfo, ConnectionOut, MetadataResponse, SyncPayload, TableInfo, UpdateConnectionPayload,
};
pub use nl_query::{NlQueryPayload, NlQueryResult};
pub use query::{QueryColumn, QueryResult, Row, RunQueryPayload};

use async_trait::async_trait;

use crate::client::ApiClient;
use crate::error::Result;

/// Operations exposed by the db_query backend.
///
/// Implementations must be thread-safe (Send + Sync) to support concurrent callers.
#[async_trait]
pub trait DbQueryApi: Send + Sync {
    /// `POST /metadata/sync`
    async fn sync_metadata(&self, payload: &SyncPayload) -> Result<MetadataResponse>;

    /// `GET /metadata`
    async fn fetch_connections(&self) -> Result<Vec<ConnectionOut>>;

    /// `GET /metadata/{id}`
    async fn get_metadata(&self, connection_id: i64) -> Result<MetadataResponse>;

    /// `PUT /metadata/{id}`
    async fn update_connection(
        &self,
        connection_id: i64,
        payload: &UpdateConnectionPayload,
    ) -> Result<ConnectionOut>;

    /// `POST /nl-query`
    async fn nl_query(&self, payload: &NlQueryPayload) -> Result<NlQueryResult>;

    /// `POST /query`
    async fn run_query(&self, payload: &RunQueryPayload) -> Result<QueryResult>;

    /// `GET /health`
    async fn health(&self) -> Result<HealthStatus>;
}

#[async_trait]
impl DbQueryApi for ApiClient {
    async fn sync_metadata(&self, payload: &SyncPayload) -> Result<MetadataResponse> {
        ApiClient::sync_metadata(self, payload).await
    }

    async fn fetch_connections(&self) -> Result<Vec<ConnectionOut>> {
        ApiClient::fetch_connections(self).await
    }

    async fn get_metadata(&self, connection_id: i64) -> Result<MetadataResponse> {
        ApiClient::get_metadata(self, connection_id).await
    }

    async fn update_connection(
        &self,
        connection_id: i64,
        payload: &UpdateConnectionPayload,
    ) -> Result<ConnectionOut> {
        ApiClient::update_connection(self, connection_id, payload).await
    }

    async fn nl_query(&self, payload: &NlQueryPayload) -> Result<NlQueryResult> {
        ApiClient::nl_query(self, payload).await
    }

    async fn run_query(&self, payload: &RunQueryPayload) -> Result<QueryResult> {
        ApiClient::run_query(self, payload).await
    }

    async fn health(&self) -> Result<HealthStatus> {
        ApiClient::health(self).await
    }
}
