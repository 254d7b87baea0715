//! ibm_backup_recovery_data_source_connections data source schema

use baas_core::schema::{AttributeSchema, AttributeType, NestedBlock, ResourceSchema, types};

use super::data_source_connection::connection_attributes;
use super::{DATA_SOURCE_CONNECTIONS, tenant_id_type};

fn connection_block() -> NestedBlock {
    let block = NestedBlock::repeated().attribute(
        AttributeSchema::new("connection_name", AttributeType::String)
            .with_description("Name of the connection."),
    );
    connection_attributes()
        .into_iter()
        .fold(block, NestedBlock::attribute)
}

/// Returns the schema for ibm_backup_recovery_data_source_connections
pub fn schema() -> ResourceSchema {
    ResourceSchema::new(DATA_SOURCE_CONNECTIONS)
        .with_description("Lists the data source connections of a tenant.")
        .attribute(
            AttributeSchema::new("x_ibm_tenant_id", tenant_id_type())
                .required()
                .with_description("Id of the tenant accessing the cluster."),
        )
        .attribute(
            AttributeSchema::new("connection_ids", types::string_list())
                .with_description("Only return connections with these ids."),
        )
        .attribute(
            AttributeSchema::new("connection_names", types::string_list())
                .with_description("Only return connections with these names."),
        )
        .attribute(
            AttributeSchema::new("connections", AttributeType::Block(connection_block()))
                .computed()
                .with_description("Matching connections."),
        )
}
