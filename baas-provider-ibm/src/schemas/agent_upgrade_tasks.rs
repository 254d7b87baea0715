//! ibm_backup_recovery_agent_upgrade_tasks data source schema

use baas_core::schema::{AttributeSchema, AttributeType, NestedBlock, ResourceSchema, types};

use super::agent_upgrade_task::task_attributes;
use super::{AGENT_UPGRADE_TASKS, tenant_id_type};

fn task_block() -> NestedBlock {
    let block = NestedBlock::repeated()
        .attribute(
            AttributeSchema::new("agent_ids", types::int_list())
                .with_provider_name("agentIDs")
                .with_description("Ids of the agents upgraded by the task."),
        )
        .attribute(
            AttributeSchema::new("name", AttributeType::String)
                .with_description("Name of the task."),
        )
        .attribute(
            AttributeSchema::new("description", AttributeType::String)
                .with_description("Description of the task."),
        )
        .attribute(
            AttributeSchema::new("schedule_time_usecs", AttributeType::Int)
                .with_description("Scheduled start, in Unix epoch microseconds."),
        )
        .attribute(
            AttributeSchema::new("schedule_end_time_usecs", AttributeType::Int)
                .with_description("Scheduled end, in Unix epoch microseconds."),
        );
    task_attributes()
        .into_iter()
        .fold(block, NestedBlock::attribute)
}

/// Returns the schema for ibm_backup_recovery_agent_upgrade_tasks
pub fn schema() -> ResourceSchema {
    ResourceSchema::new(AGENT_UPGRADE_TASKS)
        .with_description("Lists the agent upgrade tasks of a tenant.")
        .attribute(
            AttributeSchema::new("x_ibm_tenant_id", tenant_id_type())
                .required()
                .with_description("Id of the tenant accessing the cluster."),
        )
        .attribute(
            AttributeSchema::new("ids", types::int_list())
                .with_description("Only return tasks with these ids."),
        )
        .attribute(
            AttributeSchema::new("tasks", AttributeType::Block(task_block()))
                .computed()
                .with_description("Matching agent upgrade tasks."),
        )
}
