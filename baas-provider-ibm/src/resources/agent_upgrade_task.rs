//! ibm_backup_recovery_agent_upgrade_task
//!
//! The service has no endpoint to change or cancel a task, so update and
//! delete keep the default unsupported behaviour.

use std::sync::Arc;

use baas_core::codec::{decode, encode};
use baas_core::provider::{BoxFuture, ManagedResource, ProviderError, ProviderResult};
use baas_core::resource::{AttributeMap, Value};
use baas_core::schema::ResourceSchema;

use crate::client::BackupRecoveryApi;
use crate::models::{CreateAgentUpgradeTaskOptions, GetAgentUpgradeTasksOptions};
use crate::schemas::{AGENT_UPGRADE_TASK, agent_upgrade_task};
use crate::utils::{compose_id, split_id};

pub struct AgentUpgradeTaskResource {
    api: Arc<dyn BackupRecoveryApi>,
    schema: ResourceSchema,
}

impl AgentUpgradeTaskResource {
    pub fn new(api: Arc<dyn BackupRecoveryApi>) -> Self {
        Self {
            api,
            schema: agent_upgrade_task::schema(),
        }
    }
}

impl ManagedResource for AgentUpgradeTaskResource {
    fn name(&self) -> &'static str {
        AGENT_UPGRADE_TASK
    }

    fn schema(&self) -> ResourceSchema {
        self.schema.clone()
    }

    fn create<'a>(&'a self, config: &'a AttributeMap) -> BoxFuture<'a, ProviderResult<String>> {
        Box::pin(async move {
            let options: CreateAgentUpgradeTaskOptions = decode(&self.schema.attributes, config)?;
            let task = self.api.create_agent_upgrade_task(&options).await?;
            let id = task
                .id
                .ok_or_else(|| ProviderError::api(None, "create response carries no id"))?;
            Ok(compose_id(&options.x_ibm_tenant_id, &id.to_string()))
        })
    }

    fn read<'a>(
        &'a self,
        identifier: &'a str,
        _state: &'a AttributeMap,
    ) -> BoxFuture<'a, ProviderResult<AttributeMap>> {
        Box::pin(async move {
            let (tenant, id) = split_id(identifier)?;
            let task_id: i64 = id.parse().map_err(|_| {
                ProviderError::new(format!("invalid agent upgrade task id {:?}", id))
            })?;
            let options = GetAgentUpgradeTasksOptions {
                x_ibm_tenant_id: tenant.clone(),
                ids: Some(vec![task_id]),
            };
            let task = self
                .api
                .get_agent_upgrade_tasks(&options)
                .await?
                .tasks
                .unwrap_or_default()
                .into_iter()
                .find(|t| t.id == Some(task_id))
                .ok_or_else(|| {
                    ProviderError::not_found(format!("agent upgrade task {} not found", task_id))
                })?;

            let mut attributes = encode(&self.schema.attributes, &task)?;
            attributes.insert("x_ibm_tenant_id".to_string(), Value::String(tenant));
            Ok(attributes)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::stub::StubApi;
    use baas_core::diagnostics::Severity;
    use baas_core::dispatcher::{
        DELETE_NOT_SUPPORTED_SUMMARY, Dispatcher, UPDATE_NOT_SUPPORTED_SUMMARY,
    };
    use baas_core::provider::{DataSource, Provider};
    use baas_core::resource::Resource;

    struct TestProvider(Arc<StubApi>);

    impl Provider for TestProvider {
        fn name(&self) -> &'static str {
            "ibm"
        }

        fn resources(&self) -> Vec<Box<dyn ManagedResource>> {
            vec![Box::new(AgentUpgradeTaskResource::new(self.0.clone()))]
        }

        fn data_sources(&self) -> Vec<Box<dyn DataSource>> {
            vec![]
        }
    }

    fn setup() -> (Dispatcher, Arc<StubApi>) {
        let api = Arc::new(StubApi::default());
        (Dispatcher::new(&TestProvider(api.clone())), api)
    }

    fn task() -> Resource {
        Resource::new(AGENT_UPGRADE_TASK, "upgrade")
            .with_attribute("x_ibm_tenant_id", "jhxqx715r9/")
            .with_attribute("name", "upgrade-rack-4")
            .with_attribute("agent_ids", Value::List(vec![Value::Int(31), Value::Int(7)]))
    }

    #[tokio::test]
    async fn create_keeps_agent_order() {
        let (dispatcher, api) = setup();
        let outcome = dispatcher.create(&task()).await;
        assert!(outcome.is_ok(), "{:?}", outcome.diagnostics);

        assert_eq!(outcome.state.identifier.as_deref(), Some("jhxqx715r9/::1"));
        assert_eq!(outcome.state.attributes["task_id"], Value::Int(1));
        assert_eq!(outcome.state.get_string("task_type"), Some("kManual"));
        assert_eq!(
            outcome.state.attributes["agent_ids"],
            Value::List(vec![Value::Int(31), Value::Int(7)])
        );
        let stored = api.tasks.lock().unwrap().values().next().cloned().unwrap();
        assert_eq!(stored.agent_ids, Some(vec![31, 7]));
    }

    #[tokio::test]
    async fn update_warns_and_makes_no_call() {
        let (dispatcher, api) = setup();
        let created = dispatcher.create(&task()).await.state;
        let calls = api.calls();

        let desired = task().with_attribute("description", "retry after maintenance");
        let outcome = dispatcher.update(&created, &desired).await;

        assert!(outcome.is_ok());
        let warning = outcome.diagnostics.iter().next().unwrap();
        assert_eq!(warning.severity, Severity::Warning);
        assert_eq!(warning.summary, UPDATE_NOT_SUPPORTED_SUMMARY);
        assert_eq!(
            outcome.state.get_string("description"),
            Some("retry after maintenance")
        );
        assert_eq!(outcome.state.identifier, created.identifier);
        assert_eq!(api.calls(), calls);
    }

    #[tokio::test]
    async fn delete_warns_and_clears_identifier() {
        let (dispatcher, api) = setup();
        let created = dispatcher.create(&task()).await.state;
        let calls = api.calls();

        let outcome = dispatcher.delete(&created).await;
        assert!(outcome.is_ok());
        assert_eq!(
            outcome.diagnostics.warnings().next().unwrap().summary,
            DELETE_NOT_SUPPORTED_SUMMARY
        );
        assert!(outcome.state.identifier.is_none());
        assert_eq!(api.calls(), calls);
        assert_eq!(api.tasks.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn non_numeric_task_id_is_rejected() {
        let resource = AgentUpgradeTaskResource::new(Arc::new(StubApi::default()));
        let err = resource
            .read("jhxqx715r9/::abc", &AttributeMap::new())
            .await
            .unwrap_err();
        assert!(err.message.contains("invalid agent upgrade task id"));
    }
}
