//! Data source handlers

pub mod agent_upgrade_tasks;
pub mod connector_status;
pub mod data_source_connections;

use std::sync::Arc;

use baas_core::provider::DataSource;

use crate::client::{BackupRecoveryApi, ConnectorApi};

pub use agent_upgrade_tasks::AgentUpgradeTasksDataSource;
pub use connector_status::ConnectorStatusDataSource;
pub use data_source_connections::DataSourceConnectionsDataSource;

/// Returns all data sources, bound to the given clients
pub fn data_sources(
    api: &Arc<dyn BackupRecoveryApi>,
    connector: Option<&Arc<dyn ConnectorApi>>,
) -> Vec<Box<dyn DataSource>> {
    vec![
        Box::new(AgentUpgradeTasksDataSource::new(api.clone())),
        Box::new(ConnectorStatusDataSource::new(connector.cloned())),
        Box::new(DataSourceConnectionsDataSource::new(api.clone())),
    ]
}
