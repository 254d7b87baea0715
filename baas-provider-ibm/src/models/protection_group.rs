//! Protection groups

use serde::{Deserialize, Serialize};

/// Time of day in a given time zone
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeOfDay {
    pub hour: i64,
    pub minute: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

/// SLA for one kind of backup run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sla {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_run_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sla_minutes: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhysicalObject {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Parameters of a protection group over physical hosts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhysicalParams {
    pub protection_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub objects: Option<Vec<PhysicalObject>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indexing_policy_enabled: Option<bool>,
}

/// Body of the create and update requests
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtectionGroupRequest {
    pub name: String,
    pub policy_id: String,
    pub environment: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_domain_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<TimeOfDay>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sla: Option<Vec<Sla>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qos_policy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abort_in_blackouts: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pause_in_blackouts: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_paused: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub physical_params: Option<PhysicalParams>,
}

/// A protection group as returned by the service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtectionGroup {
    /// Group id, e.g. "5174348914:1716965012345:42"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_domain_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<TimeOfDay>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sla: Option<Vec<Sla>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qos_policy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abort_in_blackouts: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pause_in_blackouts: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_paused: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_deleted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_protected_objects: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub physical_params: Option<PhysicalParams>,
}

/// `POST /data-protect/protection-groups`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProtectionGroupOptions {
    #[serde(skip_serializing)]
    pub x_ibm_tenant_id: String,
    #[serde(flatten)]
    pub group: ProtectionGroupRequest,
}

/// `GET /data-protect/protection-groups/{id}`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetProtectionGroupOptions {
    pub id: String,
    pub x_ibm_tenant_id: String,
}

/// `PUT /data-protect/protection-groups/{id}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProtectionGroupOptions {
    #[serde(skip)]
    pub id: String,
    #[serde(skip_serializing)]
    pub x_ibm_tenant_id: String,
    #[serde(flatten)]
    pub group: ProtectionGroupRequest,
}

/// `DELETE /data-protect/protection-groups/{id}`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeleteProtectionGroupOptions {
    pub id: String,
    pub x_ibm_tenant_id: String,
    pub delete_snapshots: Option<bool>,
}
