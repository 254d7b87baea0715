//! IBM Cloud Backup & Recovery Provider implementation
//!
//! Holds the remote clients and hands them to every resource and data source
//! it creates. Nothing is global: two providers with different endpoints can
//! live side by side.

use std::sync::Arc;

use baas_core::provider::ProviderResult;

use crate::client::{BackupRecoveryApi, ConnectorApi, HttpClient};
use crate::config::ProviderConfig;

/// IBM Cloud Backup & Recovery Provider
pub struct BackupRecoveryProvider {
    pub(crate) api: Arc<dyn BackupRecoveryApi>,
    pub(crate) connector: Option<Arc<dyn ConnectorApi>>,
}

impl BackupRecoveryProvider {
    /// Create a provider talking HTTP to the configured endpoints
    ///
    /// Fails when no service endpoint can be determined. A missing connector
    /// endpoint only fails the connector-scoped operations later on.
    pub fn new(config: &ProviderConfig) -> ProviderResult<Self> {
        let service_url = config.service_url()?;
        let api = HttpClient::new(&service_url, config.iam_token.clone())?;
        log::info!("using Backup & Recovery endpoint {}", api.base_url());

        let connector = match config.connector_url() {
            Some(url) => {
                let client = HttpClient::new(url, config.iam_token.clone())?;
                log::info!("using data source connector {}", client.base_url());
                Some(Arc::new(client) as Arc<dyn ConnectorApi>)
            }
            None => {
                log::debug!("no connector endpoint configured");
                None
            }
        };

        Ok(Self::with_clients(Arc::new(api), connector))
    }

    /// Create a provider over the given clients
    pub fn with_clients(
        api: Arc<dyn BackupRecoveryApi>,
        connector: Option<Arc<dyn ConnectorApi>>,
    ) -> Self {
        Self { api, connector }
    }

    pub fn has_connector(&self) -> bool {
        self.connector.is_some()
    }
}
