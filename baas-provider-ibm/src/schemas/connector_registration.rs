//! ibm_backup_recovery_connector_registration schema
//!
//! Served by the connector appliance (`/connector/registration`), not by the
//! cluster. Registration is one-shot: it can neither be read back nor undone.

use baas_core::schema::{AttributeSchema, AttributeType, ResourceSchema};

use super::CONNECTOR_REGISTRATION;

/// Returns the schema for ibm_backup_recovery_connector_registration
pub fn schema() -> ResourceSchema {
    ResourceSchema::new(CONNECTOR_REGISTRATION)
        .with_description(
            "Registers the configured data source connector with a data source connection.",
        )
        .attribute(
            AttributeSchema::new("registration_token", AttributeType::String)
                .required()
                .sensitive()
                .with_description(
                    "Registration token of the data source connection to join.",
                ),
        )
        .attribute(
            AttributeSchema::new("connector_id", AttributeType::Int)
                .with_description("Id to assign to the connector."),
        )
}
