//! ibm_backup_recovery_protection_group

use std::sync::Arc;

use baas_core::codec::{decode, encode};
use baas_core::provider::{BoxFuture, ManagedResource, ProviderError, ProviderResult};
use baas_core::resource::{AttributeMap, Value};
use baas_core::schema::ResourceSchema;

use crate::client::BackupRecoveryApi;
use crate::models::{
    CreateProtectionGroupOptions, DeleteProtectionGroupOptions, GetProtectionGroupOptions,
    UpdateProtectionGroupOptions,
};
use crate::schemas::{PROTECTION_GROUP, protection_group};
use crate::utils::{compose_id, split_id};

pub struct ProtectionGroupResource {
    api: Arc<dyn BackupRecoveryApi>,
    schema: ResourceSchema,
}

impl ProtectionGroupResource {
    pub fn new(api: Arc<dyn BackupRecoveryApi>) -> Self {
        Self {
            api,
            schema: protection_group::schema(),
        }
    }
}

impl ManagedResource for ProtectionGroupResource {
    fn name(&self) -> &'static str {
        PROTECTION_GROUP
    }

    fn schema(&self) -> ResourceSchema {
        self.schema.clone()
    }

    fn create<'a>(&'a self, config: &'a AttributeMap) -> BoxFuture<'a, ProviderResult<String>> {
        Box::pin(async move {
            let options: CreateProtectionGroupOptions = decode(&self.schema.attributes, config)?;
            let created = self.api.create_protection_group(&options).await?;
            let id = created
                .id
                .ok_or_else(|| ProviderError::api(None, "create response carries no id"))?;
            Ok(compose_id(&options.x_ibm_tenant_id, &id))
        })
    }

    fn read<'a>(
        &'a self,
        identifier: &'a str,
        _state: &'a AttributeMap,
    ) -> BoxFuture<'a, ProviderResult<AttributeMap>> {
        Box::pin(async move {
            let (tenant, id) = split_id(identifier)?;
            let options = GetProtectionGroupOptions {
                id,
                x_ibm_tenant_id: tenant.clone(),
            };
            let group = self.api.get_protection_group_by_id(&options).await?;
            if group.is_deleted == Some(true) {
                return Err(ProviderError::not_found(format!(
                    "protection group {} is deleted",
                    options.id
                )));
            }

            let mut attributes = encode(&self.schema.attributes, &group)?;
            attributes.insert("x_ibm_tenant_id".to_string(), Value::String(tenant));
            Ok(attributes)
        })
    }

    /// The service replaces the whole group, so the full configuration is sent
    fn update<'a>(
        &'a self,
        identifier: &'a str,
        _changes: &'a AttributeMap,
        config: &'a AttributeMap,
    ) -> BoxFuture<'a, ProviderResult<()>> {
        Box::pin(async move {
            let (tenant, id) = split_id(identifier)?;
            let mut options: UpdateProtectionGroupOptions =
                decode(&self.schema.attributes, config)?;
            options.id = id;
            options.x_ibm_tenant_id = tenant;
            self.api.update_protection_group(&options).await?;
            Ok(())
        })
    }

    fn delete<'a>(
        &'a self,
        identifier: &'a str,
        state: &'a AttributeMap,
    ) -> BoxFuture<'a, ProviderResult<()>> {
        Box::pin(async move {
            let (tenant, id) = split_id(identifier)?;
            let options = DeleteProtectionGroupOptions {
                id,
                x_ibm_tenant_id: tenant,
                delete_snapshots: state.get("delete_snapshots").and_then(Value::as_bool),
            };
            self.api.delete_protection_group(&options).await?;
            Ok(())
        })
    }
}
