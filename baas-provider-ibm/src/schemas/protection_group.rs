//! ibm_backup_recovery_protection_group schema
//!
//! Remote object: `/data-protect/protection-groups`

use baas_core::resource::Value;
use baas_core::schema::{AttributeSchema, AttributeType, NestedBlock, ResourceSchema, types};

use super::{PROTECTION_GROUP, tenant_attribute};
use crate::utils::validate_cluster_id;

const VALID_ENVIRONMENTS: &[&str] = &["kPhysical", "kSQL", "kOracle", "kKubernetes"];
const VALID_PRIORITIES: &[&str] = &["kLow", "kMedium", "kHigh"];
const VALID_QOS_POLICIES: &[&str] = &[
    "kBackupHDD",
    "kBackupSSD",
    "kTestAndDevHigh",
    "kBackupAll",
];
const VALID_BACKUP_RUN_TYPES: &[&str] = &["kIncremental", "kFull", "kLog", "kSystem"];
const VALID_PHYSICAL_PROTECTION_TYPES: &[&str] = &["kFile", "kVolume"];

fn cluster_id_type(name: &str) -> AttributeType {
    AttributeType::Custom {
        name: name.to_string(),
        base: Box::new(AttributeType::String),
        validate: validate_cluster_id,
    }
}

fn hour_type() -> AttributeType {
    AttributeType::Custom {
        name: "Hour".to_string(),
        base: Box::new(AttributeType::Int),
        validate: |value| match value {
            Value::Int(n) if (0..=23).contains(n) => Ok(()),
            _ => Err("Hour must be between 0 and 23".to_string()),
        },
    }
}

fn minute_type() -> AttributeType {
    AttributeType::Custom {
        name: "Minute".to_string(),
        base: Box::new(AttributeType::Int),
        validate: |value| match value {
            Value::Int(n) if (0..=59).contains(n) => Ok(()),
            _ => Err("Minute must be between 0 and 59".to_string()),
        },
    }
}

fn start_time_block() -> NestedBlock {
    NestedBlock::single()
        .attribute(
            AttributeSchema::new("hour", hour_type())
                .required()
                .with_description("Hour of the day (0-23)."),
        )
        .attribute(
            AttributeSchema::new("minute", minute_type())
                .required()
                .with_description("Minute of the hour (0-59)."),
        )
        .attribute(
            AttributeSchema::new("time_zone", AttributeType::String)
                .with_default(Value::String("America/Los_Angeles".to_string()))
                .with_description("Time zone of the start time."),
        )
}

fn sla_block() -> NestedBlock {
    NestedBlock::repeated()
        .attribute(
            AttributeSchema::new("backup_run_type", types::one_of(VALID_BACKUP_RUN_TYPES))
                .with_description("Backup run type the SLA applies to."),
        )
        .attribute(
            AttributeSchema::new("sla_minutes", types::positive_int())
                .with_description("Number of minutes a run of this type may take."),
        )
}

fn physical_params_block() -> NestedBlock {
    NestedBlock::single()
        .attribute(
            AttributeSchema::new(
                "protection_type",
                types::one_of(VALID_PHYSICAL_PROTECTION_TYPES),
            )
            .required()
            .with_description("Whether files or volumes of the hosts are protected."),
        )
        .attribute(
            AttributeSchema::new(
                "objects",
                AttributeType::Block(
                    NestedBlock::repeated()
                        .attribute(
                            AttributeSchema::new("id", AttributeType::Int)
                                .required()
                                .with_description("Id of the registered physical host."),
                        )
                        .attribute(
                            AttributeSchema::new("name", AttributeType::String)
                                .optional_computed()
                                .with_description("Name of the host."),
                        ),
                ),
            )
            .with_description("Hosts protected by the group."),
        )
        .attribute(
            AttributeSchema::new("indexing_policy_enabled", AttributeType::Bool)
                .with_description("Whether protected files are indexed."),
        )
}

/// Returns the schema for ibm_backup_recovery_protection_group
pub fn schema() -> ResourceSchema {
    ResourceSchema::new(PROTECTION_GROUP)
        .with_description("A protection group: a set of objects protected under one policy.")
        .attribute(tenant_attribute())
        .attribute(
            AttributeSchema::new("name", AttributeType::String)
                .required()
                .with_description("Name of the protection group."),
        )
        .attribute(
            AttributeSchema::new("policy_id", cluster_id_type("PolicyId"))
                .required()
                .with_description("Id of the protection policy applied to the group."),
        )
        .attribute(
            AttributeSchema::new("environment", types::one_of(VALID_ENVIRONMENTS))
                .required()
                .force_new()
                .with_description("Environment of the protected objects."),
        )
        .attribute(
            AttributeSchema::new("priority", types::one_of(VALID_PRIORITIES))
                .optional_computed()
                .with_description("Priority of the group's runs."),
        )
        .attribute(
            AttributeSchema::new("description", AttributeType::String)
                .with_description("Description of the protection group."),
        )
        .attribute(
            AttributeSchema::new("storage_domain_id", AttributeType::Int)
                .force_new()
                .with_description("Id of the storage domain backups are written to."),
        )
        .attribute(
            AttributeSchema::new("start_time", AttributeType::Block(start_time_block()))
                .with_description("Time of day the group's runs start."),
        )
        .attribute(
            AttributeSchema::new("sla", AttributeType::Block(sla_block()))
                .with_description("SLA per backup run type."),
        )
        .attribute(
            AttributeSchema::new("qos_policy", types::one_of(VALID_QOS_POLICIES))
                .with_description("QoS policy for the group's runs."),
        )
        .attribute(
            AttributeSchema::new("abort_in_blackouts", AttributeType::Bool)
                .with_description("Abort runs that fall into a blackout window."),
        )
        .attribute(
            AttributeSchema::new("pause_in_blackouts", AttributeType::Bool)
                .with_description("Pause runs that fall into a blackout window."),
        )
        .attribute(
            AttributeSchema::new("is_paused", AttributeType::Bool)
                .with_description("Whether future runs of the group are paused."),
        )
        .attribute(
            AttributeSchema::new(
                "physical_params",
                AttributeType::Block(physical_params_block()),
            )
            .with_description("Parameters for the kPhysical environment."),
        )
        .attribute(
            AttributeSchema::new("delete_snapshots", AttributeType::Bool)
                .local_only()
                .with_description(
                    "Delete the group's snapshots when the group is destroyed. Only used on delete.",
                ),
        )
        .attribute(
            AttributeSchema::new("group_id", AttributeType::String)
                .computed()
                .with_provider_name("id")
                .with_description("Id of the protection group."),
        )
        .attribute(
            AttributeSchema::new("is_active", AttributeType::Bool)
                .computed()
                .with_description("Whether the group is active on this cluster."),
        )
        .attribute(
            AttributeSchema::new("is_deleted", AttributeType::Bool)
                .computed()
                .with_description("Whether the group has been deleted."),
        )
        .attribute(
            AttributeSchema::new("num_protected_objects", AttributeType::Int)
                .computed()
                .with_description("Number of objects protected by the group."),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use baas_core::resource::AttributeMap;

    fn config() -> AttributeMap {
        AttributeMap::from([
            ("x_ibm_tenant_id".to_string(), Value::from("jhxqx715r9/")),
            ("name".to_string(), Value::from("nightly")),
            ("policy_id".to_string(), Value::from("5174348914:1716965012345:7")),
            ("environment".to_string(), Value::from("kPhysical")),
        ])
    }

    #[test]
    fn minimal_config_is_valid() {
        assert!(schema().validate_config(&config()).is_ok());
    }

    #[test]
    fn invalid_start_time_reports_nested_path() {
        let mut attrs = config();
        attrs.insert(
            "start_time".to_string(),
            Value::block(
                [
                    ("hour".to_string(), Value::Int(25)),
                    ("minute".to_string(), Value::Int(0)),
                ]
                .into_iter()
                .collect(),
            ),
        );
        let errors = schema().validate_config(&attrs).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path, "start_time[0].hour");
    }

    #[test]
    fn malformed_policy_id_is_rejected() {
        let mut attrs = config();
        attrs.insert("policy_id".to_string(), Value::from("policy-7"));
        let errors = schema().validate_config(&attrs).unwrap_err();
        assert_eq!(errors[0].path, "policy_id");
    }

    #[test]
    fn group_id_maps_to_id_on_the_wire() {
        assert_eq!(schema().attributes["group_id"].wire_name(), "id");
        assert_eq!(schema().attributes["qos_policy"].wire_name(), "qosPolicy");
    }
}
