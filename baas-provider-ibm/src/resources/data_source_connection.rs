//! ibm_backup_recovery_data_source_connection

use std::sync::Arc;

use baas_core::codec::{decode, encode};
use baas_core::provider::{BoxFuture, ManagedResource, ProviderError, ProviderResult};
use baas_core::resource::{AttributeMap, Value};
use baas_core::schema::ResourceSchema;

use crate::client::BackupRecoveryApi;
use crate::models::{
    CreateDataSourceConnectionOptions, DeleteDataSourceConnectionOptions,
    GetDataSourceConnectionsOptions, PatchDataSourceConnectionOptions,
};
use crate::schemas::{DATA_SOURCE_CONNECTION, data_source_connection};
use crate::utils::{compose_id, split_id};

pub struct DataSourceConnectionResource {
    api: Arc<dyn BackupRecoveryApi>,
    schema: ResourceSchema,
}

impl DataSourceConnectionResource {
    pub fn new(api: Arc<dyn BackupRecoveryApi>) -> Self {
        Self {
            api,
            schema: data_source_connection::schema(),
        }
    }
}

impl ManagedResource for DataSourceConnectionResource {
    fn name(&self) -> &'static str {
        DATA_SOURCE_CONNECTION
    }

    fn schema(&self) -> ResourceSchema {
        self.schema.clone()
    }

    fn create<'a>(&'a self, config: &'a AttributeMap) -> BoxFuture<'a, ProviderResult<String>> {
        Box::pin(async move {
            let options: CreateDataSourceConnectionOptions =
                decode(&self.schema.attributes, config)?;
            let created = self.api.create_data_source_connection(&options).await?;
            let connection_id = created.connection_id.ok_or_else(|| {
                ProviderError::api(None, "create response carries no connectionId")
            })?;
            Ok(compose_id(&options.x_ibm_tenant_id, &connection_id))
        })
    }

    fn read<'a>(
        &'a self,
        identifier: &'a str,
        _state: &'a AttributeMap,
    ) -> BoxFuture<'a, ProviderResult<AttributeMap>> {
        Box::pin(async move {
            let (tenant, connection_id) = split_id(identifier)?;
            let options = GetDataSourceConnectionsOptions {
                x_ibm_tenant_id: tenant.clone(),
                connection_ids: Some(vec![connection_id.clone()]),
                connection_names: None,
            };
            let list = self.api.get_data_source_connections(&options).await?;
            // The list endpoint answers an unknown id with an empty list
            let connection = list
                .connections
                .unwrap_or_default()
                .into_iter()
                .find(|c| c.connection_id.as_deref() == Some(connection_id.as_str()))
                .ok_or_else(|| {
                    ProviderError::not_found(format!(
                        "data source connection {} not found",
                        connection_id
                    ))
                })?;

            let mut attributes = encode(&self.schema.attributes, &connection)?;
            attributes.insert("x_ibm_tenant_id".to_string(), Value::String(tenant));
            Ok(attributes)
        })
    }

    fn update<'a>(
        &'a self,
        identifier: &'a str,
        changes: &'a AttributeMap,
        _config: &'a AttributeMap,
    ) -> BoxFuture<'a, ProviderResult<()>> {
        Box::pin(async move {
            let (tenant, connection_id) = split_id(identifier)?;
            let mut options: PatchDataSourceConnectionOptions =
                decode(&self.schema.attributes, changes)?;
            options.connection_id = connection_id;
            options.x_ibm_tenant_id = tenant;
            self.api.patch_data_source_connection(&options).await?;
            Ok(())
        })
    }

    fn delete<'a>(
        &'a self,
        identifier: &'a str,
        _state: &'a AttributeMap,
    ) -> BoxFuture<'a, ProviderResult<()>> {
        Box::pin(async move {
            let (tenant, connection_id) = split_id(identifier)?;
            let options = DeleteDataSourceConnectionOptions {
                connection_id,
                x_ibm_tenant_id: tenant,
            };
            self.api.delete_data_source_connection(&options).await?;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::stub::StubApi;
    use baas_core::dispatcher::Dispatcher;
    use baas_core::provider::{DataSource, Provider};
    use baas_core::resource::Resource;

    struct TestProvider(Arc<StubApi>);

    impl Provider for TestProvider {
        fn name(&self) -> &'static str {
            "ibm"
        }

        fn resources(&self) -> Vec<Box<dyn ManagedResource>> {
            vec![Box::new(DataSourceConnectionResource::new(self.0.clone()))]
        }

        fn data_sources(&self) -> Vec<Box<dyn DataSource>> {
            vec![]
        }
    }

    fn setup() -> (Dispatcher, Arc<StubApi>) {
        let api = Arc::new(StubApi::default());
        (Dispatcher::new(&TestProvider(api.clone())), api)
    }

    fn connection(name: &str) -> Resource {
        Resource::new(DATA_SOURCE_CONNECTION, "edge")
            .with_attribute("x_ibm_tenant_id", "jhxqx715r9/")
            .with_attribute("connection_name", name)
    }

    #[tokio::test]
    async fn create_reads_back_computed_attributes() {
        let (dispatcher, api) = setup();
        let outcome = dispatcher.create(&connection("edge-connection")).await;

        assert!(outcome.is_ok(), "{:?}", outcome.diagnostics);
        assert_eq!(outcome.state.identifier.as_deref(), Some("jhxqx715r9/::6000001"));
        assert_eq!(outcome.state.get_string("connection_id"), Some("6000001"));
        assert_eq!(outcome.state.get_string("registration_token"), Some("tok-1234"));
        assert_eq!(outcome.state.get_string("x_ibm_tenant_id"), Some("jhxqx715r9/"));
        // unset properties are not written
        assert!(!outcome.state.attributes.contains_key("network_settings"));
        assert!(!outcome.state.attributes.contains_key("connector_ids"));
        assert_eq!(api.calls(), 2);
    }

    #[tokio::test]
    async fn read_of_deleted_connection_clears_state() {
        let (dispatcher, api) = setup();
        let created = dispatcher.create(&connection("edge-connection")).await.state;
        api.connections.lock().unwrap().clear();

        let outcome = dispatcher.read(&created).await;
        assert!(outcome.diagnostics.is_empty());
        assert!(outcome.state.identifier.is_none());
    }

    #[tokio::test]
    async fn rename_patches_only_the_name() {
        let (dispatcher, api) = setup();
        let created = dispatcher.create(&connection("edge-connection")).await.state;

        let outcome = dispatcher.update(&created, &connection("edge-renamed")).await;
        assert!(outcome.is_ok(), "{:?}", outcome.diagnostics);
        assert_eq!(outcome.state.get_string("connection_name"), Some("edge-renamed"));

        let patch = api.last_patch.lock().unwrap().clone().unwrap();
        assert_eq!(patch.connection_id, "6000001");
        assert_eq!(patch.x_ibm_tenant_id, "jhxqx715r9/");
        assert_eq!(patch.connection_name, "edge-renamed");
    }

    #[tokio::test]
    async fn changing_tenant_requires_replacement() {
        let (dispatcher, api) = setup();
        let created = dispatcher.create(&connection("edge-connection")).await.state;
        let calls = api.calls();

        let moved = connection("edge-connection").with_attribute("x_ibm_tenant_id", "other/");
        let outcome = dispatcher.update(&created, &moved).await;
        assert!(!outcome.is_ok());
        assert_eq!(api.calls(), calls);
    }

    #[tokio::test]
    async fn delete_removes_connection() {
        let (dispatcher, api) = setup();
        let created = dispatcher.create(&connection("edge-connection")).await.state;

        let outcome = dispatcher.delete(&created).await;
        assert!(outcome.is_ok());
        assert!(!outcome.state.exists);
        assert!(api.connections.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn malformed_identifier_is_an_error() {
        let resource = DataSourceConnectionResource::new(Arc::new(StubApi::default()));
        let err = resource
            .read("6000001", &AttributeMap::new())
            .await
            .unwrap_err();
        assert!(!err.is_not_found());
        assert!(err.message.contains("invalid identifier"));
    }
}
