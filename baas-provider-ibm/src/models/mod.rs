//! Request and response payloads of the Backup & Recovery REST API
//!
//! Every optional property is an `Option`, so a property the service did not
//! return stays distinguishable from an explicit zero value. Options structs
//! carry path, query and header parameters next to the body; those fields are
//! skipped when the struct is serialized as a request body.

pub mod agent_upgrade;
pub mod connection;
pub mod connector;
pub mod protection_group;

pub use agent_upgrade::{
    AgentInfo, AgentUpgradeInfo, AgentUpgradeTask, AgentUpgradeTaskList,
    CreateAgentUpgradeTaskOptions, GetAgentUpgradeTasksOptions,
};
pub use connection::{
    CreateDataSourceConnectionOptions, DataSourceConnection, DataSourceConnectionList,
    DeleteDataSourceConnectionOptions, GetDataSourceConnectionsOptions, NetworkSettings,
    PatchDataSourceConnectionOptions,
};
pub use connector::{
    ClusterConnectionStatus, ConnectorStatus, RegisterConnectorOptions, RegistrationStatus,
};
pub use protection_group::{
    CreateProtectionGroupOptions, DeleteProtectionGroupOptions, GetProtectionGroupOptions,
    PhysicalParams, PhysicalObject, ProtectionGroup, ProtectionGroupRequest, Sla, TimeOfDay,
    UpdateProtectionGroupOptions,
};
