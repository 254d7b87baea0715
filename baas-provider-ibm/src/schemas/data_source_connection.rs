//! ibm_backup_recovery_data_source_connection schema
//!
//! Remote object: `/data-source-connections`

use baas_core::schema::{AttributeSchema, AttributeType, NestedBlock, ResourceSchema, types};

use super::{DATA_SOURCE_CONNECTION, tenant_attribute};

/// Network settings of the connectors in a connection
pub fn network_settings_block() -> NestedBlock {
    NestedBlock::single()
        .attribute(
            AttributeSchema::new("cluster_fqdn", AttributeType::String)
                .with_description("FQDN of the cluster as seen from the connectors."),
        )
        .attribute(
            AttributeSchema::new("dns_servers", types::string_list())
                .with_description("DNS servers used by the connectors."),
        )
        .attribute(
            AttributeSchema::new("network_gateway", AttributeType::String)
                .with_description("Network gateway of the connectors."),
        )
        .attribute(
            AttributeSchema::new("ntp_servers", types::string_list())
                .with_description("NTP servers used by the connectors."),
        )
}

/// Attributes the service reports for a connection
pub fn connection_attributes() -> Vec<AttributeSchema> {
    vec![
        AttributeSchema::new("connection_id", AttributeType::String)
            .computed()
            .with_description("Id of the connection."),
        AttributeSchema::new("connector_ids", types::string_list())
            .computed()
            .with_description("Ids of the connectors that belong to the connection."),
        AttributeSchema::new("network_settings", AttributeType::Block(network_settings_block()))
            .computed()
            .with_description("Network settings of the connectors."),
        AttributeSchema::new("registration_token", AttributeType::String)
            .computed()
            .sensitive()
            .with_description("Token used to register connectors with the connection."),
        AttributeSchema::new("tenant_id", AttributeType::String)
            .computed()
            .with_description("Id of the tenant owning the connection."),
        AttributeSchema::new("upgrading_connector_id", AttributeType::String)
            .computed()
            .with_description("Id of the connector that is currently being upgraded."),
    ]
}

/// Returns the schema for ibm_backup_recovery_data_source_connection
pub fn schema() -> ResourceSchema {
    let schema = ResourceSchema::new(DATA_SOURCE_CONNECTION)
        .with_description(
            "Connection between a tenant and the data source connectors of its environment.",
        )
        .attribute(tenant_attribute())
        .attribute(
            AttributeSchema::new("connection_name", AttributeType::String)
                .required()
                .with_description("Name of the connection."),
        );
    connection_attributes()
        .into_iter()
        .fold(schema, ResourceSchema::attribute)
}
