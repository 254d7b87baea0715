//! Remote client interfaces
//!
//! Handlers never talk HTTP themselves. They receive a [`BackupRecoveryApi`]
//! (and, for connector-scoped resources, a [`ConnectorApi`]) at construction
//! and make exactly one call per lifecycle operation.

pub mod http;

#[cfg(test)]
pub(crate) mod stub;

use async_trait::async_trait;
use baas_core::provider::ProviderError;
use thiserror::Error;

use crate::models::{
    AgentUpgradeTask, AgentUpgradeTaskList, ConnectorStatus, CreateAgentUpgradeTaskOptions,
    CreateDataSourceConnectionOptions, CreateProtectionGroupOptions, DataSourceConnection,
    DataSourceConnectionList, DeleteDataSourceConnectionOptions, DeleteProtectionGroupOptions,
    GetAgentUpgradeTasksOptions, GetDataSourceConnectionsOptions, GetProtectionGroupOptions,
    PatchDataSourceConnectionOptions, ProtectionGroup, RegisterConnectorOptions,
    UpdateProtectionGroupOptions,
};

pub use http::HttpClient;

/// Errors returned by the remote clients
#[derive(Debug, Error)]
pub enum ApiError {
    /// The service answered with a non-success status
    #[error("{status}: {message}")]
    Status { status: u16, message: String },

    /// The request did not complete
    #[error("request failed: {0}")]
    Transport(String),

    /// The response body could not be parsed
    #[error("invalid response body: {0}")]
    Decode(String),

    /// The client cannot be built from the given settings
    #[error("client configuration error: {0}")]
    Configuration(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Result type for client calls
pub type ApiResult<T> = Result<T, ApiError>;

impl From<ApiError> for ProviderError {
    fn from(err: ApiError) -> Self {
        match &err {
            ApiError::Status { status: 404, .. } => ProviderError::not_found(err.to_string()),
            ApiError::Status { status, .. } => ProviderError::api(Some(*status), err.to_string()),
            ApiError::Configuration(_) => ProviderError::configuration(err.to_string()),
            ApiError::Transport(_) | ApiError::Decode(_) => {
                ProviderError::api(None, err.to_string())
            }
        }
    }
}

/// Tenant-scoped endpoints of the Backup & Recovery service
#[async_trait]
pub trait BackupRecoveryApi: Send + Sync {
    async fn create_data_source_connection(
        &self,
        options: &CreateDataSourceConnectionOptions,
    ) -> ApiResult<DataSourceConnection>;

    async fn get_data_source_connections(
        &self,
        options: &GetDataSourceConnectionsOptions,
    ) -> ApiResult<DataSourceConnectionList>;

    async fn patch_data_source_connection(
        &self,
        options: &PatchDataSourceConnectionOptions,
    ) -> ApiResult<DataSourceConnection>;

    async fn delete_data_source_connection(
        &self,
        options: &DeleteDataSourceConnectionOptions,
    ) -> ApiResult<()>;

    async fn create_protection_group(
        &self,
        options: &CreateProtectionGroupOptions,
    ) -> ApiResult<ProtectionGroup>;

    async fn get_protection_group_by_id(
        &self,
        options: &GetProtectionGroupOptions,
    ) -> ApiResult<ProtectionGroup>;

    async fn update_protection_group(
        &self,
        options: &UpdateProtectionGroupOptions,
    ) -> ApiResult<ProtectionGroup>;

    async fn delete_protection_group(&self, options: &DeleteProtectionGroupOptions)
    -> ApiResult<()>;

    async fn create_agent_upgrade_task(
        &self,
        options: &CreateAgentUpgradeTaskOptions,
    ) -> ApiResult<AgentUpgradeTask>;

    async fn get_agent_upgrade_tasks(
        &self,
        options: &GetAgentUpgradeTasksOptions,
    ) -> ApiResult<AgentUpgradeTaskList>;
}

/// Endpoints served by a data source connector
#[async_trait]
pub trait ConnectorApi: Send + Sync {
    async fn register_data_source_connector(
        &self,
        options: &RegisterConnectorOptions,
    ) -> ApiResult<()>;

    async fn get_connector_status(&self) -> ApiResult<ConnectorStatus>;
}
