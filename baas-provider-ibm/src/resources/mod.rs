//! Resource handlers
//!
//! Each handler owns its schema and the client it was constructed with.
//! Handlers decode the configuration into one Options struct, make one
//! client call and encode the response; the lifecycle around that lives in
//! [`baas_core::dispatcher`].

pub mod agent_upgrade_task;
pub mod connector_registration;
pub mod data_source_connection;
pub mod protection_group;

use std::sync::Arc;

use baas_core::provider::ManagedResource;

use crate::client::{BackupRecoveryApi, ConnectorApi};

pub use agent_upgrade_task::AgentUpgradeTaskResource;
pub use connector_registration::ConnectorRegistrationResource;
pub use data_source_connection::DataSourceConnectionResource;
pub use protection_group::ProtectionGroupResource;

/// Returns all resources, bound to the given clients
pub fn resources(
    api: &Arc<dyn BackupRecoveryApi>,
    connector: Option<&Arc<dyn ConnectorApi>>,
) -> Vec<Box<dyn ManagedResource>> {
    vec![
        Box::new(AgentUpgradeTaskResource::new(api.clone())),
        Box::new(ConnectorRegistrationResource::new(connector.cloned())),
        Box::new(DataSourceConnectionResource::new(api.clone())),
        Box::new(ProtectionGroupResource::new(api.clone())),
    ]
}
