//! ibm_backup_recovery_data_source_connections

use std::sync::Arc;

use baas_core::codec::{decode, encode};
use baas_core::provider::{BoxFuture, DataSource, Observed, ProviderResult};
use baas_core::resource::AttributeMap;
use baas_core::schema::ResourceSchema;

use crate::client::BackupRecoveryApi;
use crate::models::GetDataSourceConnectionsOptions;
use crate::schemas::{DATA_SOURCE_CONNECTIONS, data_source_connections};
use crate::utils::query_id;

pub struct DataSourceConnectionsDataSource {
    api: Arc<dyn BackupRecoveryApi>,
    schema: ResourceSchema,
}

impl DataSourceConnectionsDataSource {
    pub fn new(api: Arc<dyn BackupRecoveryApi>) -> Self {
        Self {
            api,
            schema: data_source_connections::schema(),
        }
    }
}

impl DataSource for DataSourceConnectionsDataSource {
    fn name(&self) -> &'static str {
        DATA_SOURCE_CONNECTIONS
    }

    fn schema(&self) -> ResourceSchema {
        self.schema.clone()
    }

    fn read<'a>(&'a self, config: &'a AttributeMap) -> BoxFuture<'a, ProviderResult<Observed>> {
        Box::pin(async move {
            let options: GetDataSourceConnectionsOptions =
                decode(&self.schema.attributes, config)?;
            let list = self.api.get_data_source_connections(&options).await?;

            let identifier = query_id(
                &options.x_ibm_tenant_id,
                "connections",
                &[
                    ("connection_ids", options.connection_ids.unwrap_or_default()),
                    (
                        "connection_names",
                        options.connection_names.unwrap_or_default(),
                    ),
                ],
            );
            Ok(Observed {
                identifier,
                attributes: encode(&self.schema.attributes, &list)?,
            })
        })
    }
}
