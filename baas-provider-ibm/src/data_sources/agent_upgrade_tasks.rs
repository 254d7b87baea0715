//! ibm_backup_recovery_agent_upgrade_tasks

use std::sync::Arc;

use baas_core::codec::{decode, encode};
use baas_core::provider::{BoxFuture, DataSource, Observed, ProviderResult};
use baas_core::resource::AttributeMap;
use baas_core::schema::ResourceSchema;

use crate::client::BackupRecoveryApi;
use crate::models::GetAgentUpgradeTasksOptions;
use crate::schemas::{AGENT_UPGRADE_TASKS, agent_upgrade_tasks};
use crate::utils::query_id;

pub struct AgentUpgradeTasksDataSource {
    api: Arc<dyn BackupRecoveryApi>,
    schema: ResourceSchema,
}

impl AgentUpgradeTasksDataSource {
    pub fn new(api: Arc<dyn BackupRecoveryApi>) -> Self {
        Self {
            api,
            schema: agent_upgrade_tasks::schema(),
        }
    }
}

impl DataSource for AgentUpgradeTasksDataSource {
    fn name(&self) -> &'static str {
        AGENT_UPGRADE_TASKS
    }

    fn schema(&self) -> ResourceSchema {
        self.schema.clone()
    }

    fn read<'a>(&'a self, config: &'a AttributeMap) -> BoxFuture<'a, ProviderResult<Observed>> {
        Box::pin(async move {
            let options: GetAgentUpgradeTasksOptions = decode(&self.schema.attributes, config)?;
            let list = self.api.get_agent_upgrade_tasks(&options).await?;

            let ids = options
                .ids
                .unwrap_or_default()
                .iter()
                .map(ToString::to_string)
                .collect();
            Ok(Observed {
                identifier: query_id(&options.x_ibm_tenant_id, "agent-upgrade-tasks", &[("ids", ids)]),
                attributes: encode(&self.schema.attributes, &list)?,
            })
        })
    }
}
