//! Data source connections

use serde::{Deserialize, Serialize};

/// A data source connection as returned by the service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSourceConnection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connector_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_settings: Option<NetworkSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upgrading_connector_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_fqdn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns_servers: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_gateway: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ntp_servers: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSourceConnectionList {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connections: Option<Vec<DataSourceConnection>>,
}

/// `POST /data-source-connections`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDataSourceConnectionOptions {
    #[serde(skip_serializing)]
    pub x_ibm_tenant_id: String,
    pub connection_name: String,
}

/// `GET /data-source-connections`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetDataSourceConnectionsOptions {
    pub x_ibm_tenant_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_names: Option<Vec<String>>,
}

/// `PATCH /data-source-connections/{connectionId}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchDataSourceConnectionOptions {
    #[serde(skip)]
    pub connection_id: String,
    /// Taken from the identifier, not from the changed attributes
    #[serde(skip_serializing, default)]
    pub x_ibm_tenant_id: String,
    pub connection_name: String,
}

/// `DELETE /data-source-connections/{connectionId}`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeleteDataSourceConnectionOptions {
    pub connection_id: String,
    pub x_ibm_tenant_id: String,
}
