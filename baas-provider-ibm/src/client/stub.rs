//! In-memory clients for handler tests

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::{ApiError, ApiResult, BackupRecoveryApi, ConnectorApi};
use crate::models::{
    AgentUpgradeTask, AgentUpgradeTaskList, ConnectorStatus, CreateAgentUpgradeTaskOptions,
    CreateDataSourceConnectionOptions, CreateProtectionGroupOptions, DataSourceConnection,
    DataSourceConnectionList, DeleteDataSourceConnectionOptions, DeleteProtectionGroupOptions,
    GetAgentUpgradeTasksOptions, GetDataSourceConnectionsOptions, GetProtectionGroupOptions,
    PatchDataSourceConnectionOptions, ProtectionGroup, RegisterConnectorOptions,
    RegistrationStatus, UpdateProtectionGroupOptions,
};

fn not_found() -> ApiError {
    ApiError::Status {
        status: 404,
        message: "Not Found".to_string(),
    }
}

/// Objects keyed by (tenant, id)
type Store<T> = Mutex<BTreeMap<(String, String), T>>;

#[derive(Default)]
pub(crate) struct StubApi {
    pub connections: Store<DataSourceConnection>,
    pub groups: Store<ProtectionGroup>,
    pub tasks: Store<AgentUpgradeTask>,
    pub registrations: Mutex<Vec<RegisterConnectorOptions>>,
    pub last_patch: Mutex<Option<PatchDataSourceConnectionOptions>>,
    pub last_group_delete: Mutex<Option<DeleteProtectionGroupOptions>>,
    calls: AtomicUsize,
    next_id: AtomicUsize,
}

impl StubApi {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    fn next_id(&self) -> usize {
        self.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }
}

#[async_trait]
impl BackupRecoveryApi for StubApi {
    async fn create_data_source_connection(
        &self,
        options: &CreateDataSourceConnectionOptions,
    ) -> ApiResult<DataSourceConnection> {
        self.call();
        let id = format!("{}", 6_000_000 + self.next_id());
        let connection = DataSourceConnection {
            connection_id: Some(id.clone()),
            connection_name: Some(options.connection_name.clone()),
            registration_token: Some("tok-1234".to_string()),
            tenant_id: Some(options.x_ibm_tenant_id.clone()),
            ..Default::default()
        };
        self.connections
            .lock()
            .unwrap()
            .insert((options.x_ibm_tenant_id.clone(), id), connection.clone());
        Ok(connection)
    }

    async fn get_data_source_connections(
        &self,
        options: &GetDataSourceConnectionsOptions,
    ) -> ApiResult<DataSourceConnectionList> {
        self.call();
        let connections: Vec<_> = self
            .connections
            .lock()
            .unwrap()
            .iter()
            .filter(|((tenant, id), c)| {
                tenant == &options.x_ibm_tenant_id
                    && options.connection_ids.as_ref().is_none_or(|ids| ids.contains(id))
                    && options.connection_names.as_ref().is_none_or(|names| {
                        c.connection_name.as_ref().is_some_and(|n| names.contains(n))
                    })
            })
            .map(|(_, c)| c.clone())
            .collect();
        Ok(DataSourceConnectionList {
            connections: Some(connections),
        })
    }

    async fn patch_data_source_connection(
        &self,
        options: &PatchDataSourceConnectionOptions,
    ) -> ApiResult<DataSourceConnection> {
        self.call();
        *self.last_patch.lock().unwrap() = Some(options.clone());
        let mut connections = self.connections.lock().unwrap();
        let key = (options.x_ibm_tenant_id.clone(), options.connection_id.clone());
        let connection = connections.get_mut(&key).ok_or_else(not_found)?;
        connection.connection_name = Some(options.connection_name.clone());
        Ok(connection.clone())
    }

    async fn delete_data_source_connection(
        &self,
        options: &DeleteDataSourceConnectionOptions,
    ) -> ApiResult<()> {
        self.call();
        let key = (options.x_ibm_tenant_id.clone(), options.connection_id.clone());
        self.connections
            .lock()
            .unwrap()
            .remove(&key)
            .map(|_| ())
            .ok_or_else(not_found)
    }

    async fn create_protection_group(
        &self,
        options: &CreateProtectionGroupOptions,
    ) -> ApiResult<ProtectionGroup> {
        self.call();
        let id = format!("5174348914:1716965012345:{}", self.next_id());
        let mut request = options.group.clone();
        // the service reports host names for registered objects
        if let Some(objects) = request
            .physical_params
            .as_mut()
            .and_then(|p| p.objects.as_mut())
        {
            for object in objects {
                object.name.get_or_insert_with(|| format!("host-{}", object.id));
            }
        }
        let group = ProtectionGroup {
            id: Some(id.clone()),
            name: Some(request.name),
            policy_id: Some(request.policy_id),
            environment: Some(request.environment),
            priority: Some(request.priority.unwrap_or_else(|| "kMedium".to_string())),
            description: request.description,
            storage_domain_id: request.storage_domain_id,
            start_time: request.start_time,
            sla: request.sla,
            qos_policy: request.qos_policy,
            abort_in_blackouts: request.abort_in_blackouts,
            pause_in_blackouts: request.pause_in_blackouts,
            is_paused: request.is_paused,
            is_active: Some(true),
            is_deleted: Some(false),
            num_protected_objects: request
                .physical_params
                .as_ref()
                .and_then(|p| p.objects.as_ref())
                .map(|o| o.len() as i64),
            physical_params: request.physical_params,
        };
        self.groups
            .lock()
            .unwrap()
            .insert((options.x_ibm_tenant_id.clone(), id), group.clone());
        Ok(group)
    }

    async fn get_protection_group_by_id(
        &self,
        options: &GetProtectionGroupOptions,
    ) -> ApiResult<ProtectionGroup> {
        self.call();
        let key = (options.x_ibm_tenant_id.clone(), options.id.clone());
        self.groups
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .ok_or_else(not_found)
    }

    async fn update_protection_group(
        &self,
        options: &UpdateProtectionGroupOptions,
    ) -> ApiResult<ProtectionGroup> {
        self.call();
        let mut groups = self.groups.lock().unwrap();
        let key = (options.x_ibm_tenant_id.clone(), options.id.clone());
        let group = groups.get_mut(&key).ok_or_else(not_found)?;
        let request = options.group.clone();
        group.name = Some(request.name);
        group.policy_id = Some(request.policy_id);
        group.priority = request.priority.or(group.priority.take());
        group.description = request.description;
        group.sla = request.sla;
        group.start_time = request.start_time;
        group.is_paused = request.is_paused;
        Ok(group.clone())
    }

    async fn delete_protection_group(
        &self,
        options: &DeleteProtectionGroupOptions,
    ) -> ApiResult<()> {
        self.call();
        *self.last_group_delete.lock().unwrap() = Some(options.clone());
        let key = (options.x_ibm_tenant_id.clone(), options.id.clone());
        self.groups
            .lock()
            .unwrap()
            .remove(&key)
            .map(|_| ())
            .ok_or_else(not_found)
    }

    async fn create_agent_upgrade_task(
        &self,
        options: &CreateAgentUpgradeTaskOptions,
    ) -> ApiResult<AgentUpgradeTask> {
        self.call();
        let id = self.next_id() as i64;
        let task = AgentUpgradeTask {
            id: Some(id),
            name: options.name.clone(),
            description: options.description.clone(),
            agent_ids: options.agent_ids.clone(),
            schedule_time_usecs: options.schedule_time_usecs,
            status: Some("kScheduled".to_string()),
            is_retryable: Some(false),
            task_type: Some("kManual".to_string()),
            ..Default::default()
        };
        self.tasks
            .lock()
            .unwrap()
            .insert((options.x_ibm_tenant_id.clone(), id.to_string()), task.clone());
        Ok(task)
    }

    async fn get_agent_upgrade_tasks(
        &self,
        options: &GetAgentUpgradeTasksOptions,
    ) -> ApiResult<AgentUpgradeTaskList> {
        self.call();
        let tasks: Vec<_> = self
            .tasks
            .lock()
            .unwrap()
            .iter()
            .filter(|((tenant, _), task)| {
                tenant == &options.x_ibm_tenant_id
                    && options
                        .ids
                        .as_ref()
                        .is_none_or(|ids| task.id.is_some_and(|id| ids.contains(&id)))
            })
            .map(|(_, task)| task.clone())
            .collect();
        Ok(AgentUpgradeTaskList { tasks: Some(tasks) })
    }
}

#[async_trait]
impl ConnectorApi for StubApi {
    async fn register_data_source_connector(
        &self,
        options: &RegisterConnectorOptions,
    ) -> ApiResult<()> {
        self.call();
        self.registrations.lock().unwrap().push(options.clone());
        Ok(())
    }

    async fn get_connector_status(&self) -> ApiResult<ConnectorStatus> {
        self.call();
        let registered = !self.registrations.lock().unwrap().is_empty();
        Ok(ConnectorStatus {
            cluster_connection_status: None,
            registration_status: Some(RegistrationStatus {
                message: Some("testString".to_string()),
                status: Some(if registered { "Success" } else { "NotDone" }.to_string()),
            }),
        })
    }
}
