//! ibm_backup_recovery_agent_upgrade_task schema
//!
//! Remote object: `/data-protect/agent-upgrade-tasks`. Tasks cannot be
//! changed or removed once scheduled.

use baas_core::schema::{AttributeSchema, AttributeType, NestedBlock, ResourceSchema, types};

use super::{AGENT_UPGRADE_TASK, tenant_attribute};

fn agent_block() -> NestedBlock {
    NestedBlock::repeated()
        .attribute(
            AttributeSchema::new("id", AttributeType::Int)
                .with_description("Id of the agent."),
        )
        .attribute(
            AttributeSchema::new(
                "info",
                AttributeType::Block(
                    NestedBlock::single()
                        .attribute(
                            AttributeSchema::new("name", AttributeType::String)
                                .with_description("Name of the agent's host."),
                        )
                        .attribute(
                            AttributeSchema::new(
                                "previous_software_version",
                                AttributeType::String,
                            )
                            .with_description("Agent version before the upgrade."),
                        )
                        .attribute(
                            AttributeSchema::new("status", AttributeType::String)
                                .with_description("Upgrade status of the agent."),
                        ),
                ),
            )
            .with_description("Upgrade details of the agent."),
        )
}

/// Attributes the service reports for a task
pub fn task_attributes() -> Vec<AttributeSchema> {
    vec![
        AttributeSchema::new("task_id", AttributeType::Int)
            .computed()
            .with_provider_name("id")
            .with_description("Id of the task."),
        AttributeSchema::new("agents", AttributeType::Block(agent_block()))
            .computed()
            .with_description("Upgrade progress per agent."),
        AttributeSchema::new("cluster_version", AttributeType::String)
            .computed()
            .with_description("Cluster version the agents are upgraded to."),
        AttributeSchema::new("start_time_usecs", AttributeType::Int)
            .computed()
            .with_description("Time the task started, in Unix epoch microseconds."),
        AttributeSchema::new("end_time_usecs", AttributeType::Int)
            .computed()
            .with_description("Time the task ended, in Unix epoch microseconds."),
        AttributeSchema::new("error_message", AttributeType::String)
            .computed()
            .with_description("Error message of a failed task."),
        AttributeSchema::new("is_retryable", AttributeType::Bool)
            .computed()
            .with_description("Whether a failed task can be retried."),
        AttributeSchema::new("retried_task_id", AttributeType::Int)
            .computed()
            .with_description("Id of the task retrying this one."),
        AttributeSchema::new("status", AttributeType::String)
            .computed()
            .with_description("Status of the task."),
        AttributeSchema::new("task_type", AttributeType::String)
            .computed()
            .with_provider_name("type")
            .with_description("Whether the task was scheduled manually or automatically."),
    ]
}

/// Returns the schema for ibm_backup_recovery_agent_upgrade_task
pub fn schema() -> ResourceSchema {
    let schema = ResourceSchema::new(AGENT_UPGRADE_TASK)
        .with_description("A task upgrading data source agents to the cluster version.")
        .attribute(tenant_attribute())
        .attribute(
            AttributeSchema::new("agent_ids", types::int_list())
                .with_provider_name("agentIDs")
                .with_description("Ids of the agents to upgrade. All agents when unset."),
        )
        .attribute(
            AttributeSchema::new("name", AttributeType::String)
                .optional_computed()
                .with_description("Name of the task."),
        )
        .attribute(
            AttributeSchema::new("description", AttributeType::String)
                .with_description("Description of the task."),
        )
        .attribute(
            AttributeSchema::new("retry_task_id", AttributeType::Int)
                .with_description("Id of a failed task to retry."),
        )
        .attribute(
            AttributeSchema::new("schedule_time_usecs", types::positive_int())
                .optional_computed()
                .with_description(
                    "Time to start the task, in Unix epoch microseconds. Starts immediately when unset.",
                ),
        )
        .attribute(
            AttributeSchema::new("schedule_end_time_usecs", types::positive_int())
                .with_description(
                    "Time after which the task is no longer started, in Unix epoch microseconds.",
                ),
        );
    task_attributes()
        .into_iter()
        .fold(schema, ResourceSchema::attribute)
}
