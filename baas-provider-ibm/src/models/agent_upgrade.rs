//! Agent upgrade tasks

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentUpgradeInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_software_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Upgrade progress of one agent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<AgentUpgradeInfo>,
}

/// An agent upgrade task as returned by the service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentUpgradeTask {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "agentIDs")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_ids: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agents: Option<Vec<AgentInfo>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time_usecs: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time_usecs: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_time_usecs: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_end_time_usecs: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_retryable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retried_task_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(rename = "type")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentUpgradeTaskList {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tasks: Option<Vec<AgentUpgradeTask>>,
}

/// `POST /data-protect/agent-upgrade-tasks`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAgentUpgradeTaskOptions {
    #[serde(skip_serializing)]
    pub x_ibm_tenant_id: String,
    #[serde(rename = "agentIDs")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_ids: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_task_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_end_time_usecs: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_time_usecs: Option<i64>,
}

/// `GET /data-protect/agent-upgrade-tasks`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetAgentUpgradeTasksOptions {
    pub x_ibm_tenant_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ids: Option<Vec<i64>>,
}
