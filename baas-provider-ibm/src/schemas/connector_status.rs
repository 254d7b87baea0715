//! ibm_backup_recovery_connector_status data source schema

use baas_core::schema::{AttributeSchema, AttributeType, NestedBlock, ResourceSchema, types};

use super::CONNECTOR_STATUS;

const VALID_REGISTRATION_STATUSES: &[&str] = &["NotDone", "InProgress", "Success", "Failed"];

/// Registration state block
pub fn registration_status_block() -> NestedBlock {
    NestedBlock::single()
        .attribute(
            AttributeSchema::new("message", AttributeType::String)
                .with_description("Message describing the registration state."),
        )
        .attribute(
            AttributeSchema::new("status", types::one_of(VALID_REGISTRATION_STATUSES))
                .with_description("Registration state of the connector."),
        )
}

fn cluster_connection_status_block() -> NestedBlock {
    NestedBlock::single()
        .attribute(
            AttributeSchema::new("is_active", AttributeType::Bool)
                .with_description("Whether the connector is connected to the cluster."),
        )
        .attribute(
            AttributeSchema::new("last_connected_timestamp_msecs", AttributeType::Int)
                .with_description("Last time the connector reached the cluster, in milliseconds."),
        )
        .attribute(
            AttributeSchema::new("message", AttributeType::String)
                .with_description("Message describing the connection state."),
        )
}

/// Returns the schema for ibm_backup_recovery_connector_status
pub fn schema() -> ResourceSchema {
    ResourceSchema::new(CONNECTOR_STATUS)
        .with_description("Registration and connectivity status of the configured connector.")
        .attribute(
            AttributeSchema::new(
                "cluster_connection_status",
                AttributeType::Block(cluster_connection_status_block()),
            )
            .computed()
            .with_description("Connectivity between the connector and the cluster."),
        )
        .attribute(
            AttributeSchema::new(
                "registration_status",
                AttributeType::Block(registration_status_block()),
            )
            .computed()
            .with_description("Registration state of the connector."),
        )
}
