//! ibm_backup_recovery_connector_status

use std::sync::Arc;

use baas_core::codec::encode;
use baas_core::provider::{BoxFuture, DataSource, Observed, ProviderResult};
use baas_core::resource::AttributeMap;
use baas_core::schema::ResourceSchema;

use crate::client::ConnectorApi;
use crate::resources::connector_registration::missing_connector_endpoint;
use crate::schemas::{CONNECTOR_STATUS, connector_status};

pub struct ConnectorStatusDataSource {
    connector: Option<Arc<dyn ConnectorApi>>,
    schema: ResourceSchema,
}

impl ConnectorStatusDataSource {
    pub fn new(connector: Option<Arc<dyn ConnectorApi>>) -> Self {
        Self {
            connector,
            schema: connector_status::schema(),
        }
    }
}

impl DataSource for ConnectorStatusDataSource {
    fn name(&self) -> &'static str {
        CONNECTOR_STATUS
    }

    fn schema(&self) -> ResourceSchema {
        self.schema.clone()
    }

    fn read<'a>(&'a self, _config: &'a AttributeMap) -> BoxFuture<'a, ProviderResult<Observed>> {
        Box::pin(async move {
            let connector = self
                .connector
                .as_ref()
                .ok_or_else(missing_connector_endpoint)?;
            let status = connector.get_connector_status().await?;
            Ok(Observed {
                identifier: "connector-status".to_string(),
                attributes: encode(&self.schema.attributes, &status)?,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::stub::StubApi;
    use baas_core::provider::ErrorKind;
    use baas_core::resource::Value;
    use std::collections::BTreeMap;

    #[tokio::test]
    async fn encodes_registration_status() {
        let data_source = ConnectorStatusDataSource::new(Some(Arc::new(StubApi::default())));
        let observed = data_source.read(&AttributeMap::new()).await.unwrap();

        assert_eq!(observed.identifier, "connector-status");
        assert_eq!(
            observed.attributes["registration_status"],
            Value::block(BTreeMap::from([
                ("message".to_string(), Value::from("testString")),
                ("status".to_string(), Value::from("NotDone")),
            ]))
        );
        // the service sent no connection status
        assert!(!observed.attributes.contains_key("cluster_connection_status"));
    }

    #[tokio::test]
    async fn missing_connector_is_a_configuration_error() {
        let data_source = ConnectorStatusDataSource::new(None);
        let err = data_source.read(&AttributeMap::new()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }
}
