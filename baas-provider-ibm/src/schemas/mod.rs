//! Backup & Recovery resource and data source schemas

pub mod agent_upgrade_task;
pub mod agent_upgrade_tasks;
pub mod connector_registration;
pub mod connector_status;
pub mod data_source_connection;
pub mod data_source_connections;
pub mod protection_group;

use baas_core::schema::{AttributeSchema, AttributeType, ResourceSchema};

use crate::utils::validate_tenant_id;

pub const DATA_SOURCE_CONNECTION: &str = "ibm_backup_recovery_data_source_connection";
pub const PROTECTION_GROUP: &str = "ibm_backup_recovery_protection_group";
pub const AGENT_UPGRADE_TASK: &str = "ibm_backup_recovery_agent_upgrade_task";
pub const CONNECTOR_REGISTRATION: &str = "ibm_backup_recovery_connector_registration";

pub const DATA_SOURCE_CONNECTIONS: &str = "ibm_backup_recovery_data_source_connections";
pub const AGENT_UPGRADE_TASKS: &str = "ibm_backup_recovery_agent_upgrade_tasks";
pub const CONNECTOR_STATUS: &str = "ibm_backup_recovery_connector_status";

/// Tenant id type, e.g. "jhxqx715r9/"
pub fn tenant_id_type() -> AttributeType {
    AttributeType::Custom {
        name: "TenantId".to_string(),
        base: Box::new(AttributeType::String),
        validate: validate_tenant_id,
    }
}

/// The tenant every scoped request is sent for (`X-IBM-Tenant-Id` header)
pub fn tenant_attribute() -> AttributeSchema {
    AttributeSchema::new("x_ibm_tenant_id", tenant_id_type())
        .required()
        .force_new()
        .with_description(
            "Id of the tenant accessing the cluster. Sent as the X-IBM-Tenant-Id header.",
        )
}

/// Returns all resource schemas
pub fn resource_schemas() -> Vec<ResourceSchema> {
    vec![
        agent_upgrade_task::schema(),
        connector_registration::schema(),
        data_source_connection::schema(),
        protection_group::schema(),
    ]
}

/// Returns all data source schemas
pub fn data_source_schemas() -> Vec<ResourceSchema> {
    vec![
        agent_upgrade_tasks::schema(),
        connector_status::schema(),
        data_source_connections::schema(),
    ]
}
