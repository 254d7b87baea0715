//! ibm_backup_recovery_connector_registration
//!
//! Talks to the connector appliance. Without a connector endpoint every
//! remote call fails with a configuration error before anything is sent.

use std::sync::Arc;

use baas_core::codec::decode;
use baas_core::provider::{BoxFuture, ManagedResource, ProviderError, ProviderResult};
use baas_core::resource::AttributeMap;
use baas_core::schema::ResourceSchema;

use crate::client::ConnectorApi;
use crate::models::RegisterConnectorOptions;
use crate::schemas::{CONNECTOR_REGISTRATION, connector_registration};

/// Identifier recorded for a completed registration
pub const REGISTRATION_ID: &str = "connector-registration";

pub(crate) fn missing_connector_endpoint() -> ProviderError {
    ProviderError::configuration(
        "connector endpoint is not configured; set connector_endpoint or \
         IBMCLOUD_BACKUP_RECOVERY_CONNECTOR_ENDPOINT",
    )
}

pub struct ConnectorRegistrationResource {
    connector: Option<Arc<dyn ConnectorApi>>,
    schema: ResourceSchema,
}

impl ConnectorRegistrationResource {
    pub fn new(connector: Option<Arc<dyn ConnectorApi>>) -> Self {
        Self {
            connector,
            schema: connector_registration::schema(),
        }
    }
}

impl ManagedResource for ConnectorRegistrationResource {
    fn name(&self) -> &'static str {
        CONNECTOR_REGISTRATION
    }

    fn schema(&self) -> ResourceSchema {
        self.schema.clone()
    }

    fn create<'a>(&'a self, config: &'a AttributeMap) -> BoxFuture<'a, ProviderResult<String>> {
        Box::pin(async move {
            let connector = self
                .connector
                .as_ref()
                .ok_or_else(missing_connector_endpoint)?;
            let options: RegisterConnectorOptions = decode(&self.schema.attributes, config)?;
            connector.register_data_source_connector(&options).await?;
            Ok(REGISTRATION_ID.to_string())
        })
    }

    /// Registrations cannot be read back; the recorded state stands
    fn read<'a>(
        &'a self,
        _identifier: &'a str,
        _state: &'a AttributeMap,
    ) -> BoxFuture<'a, ProviderResult<AttributeMap>> {
        Box::pin(async { Ok(AttributeMap::new()) })
    }
}
