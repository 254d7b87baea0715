//! IBM Cloud Backup & Recovery Provider
//!
//! Resources and data sources of the IBM Cloud Backup & Recovery service.
//!
//! ## Module Structure
//!
//! - `config` - Provider settings and their environment fallbacks
//! - `client` - Remote client traits and the reqwest implementation
//! - `models` - Request and response payloads
//! - `schemas` - Resource and data source schemas
//! - `resources` / `data_sources` - Handlers bound to injected clients
//! - `provider` - BackupRecoveryProvider implementation
//! - `docs` - Markdown reference pages
//! - `utils` - Identifier helpers and validators

pub mod client;
pub mod config;
pub mod data_sources;
pub mod docs;
pub mod models;
pub mod provider;
pub mod resources;
pub mod schemas;
pub mod utils;

// Re-export main types
pub use client::{ApiError, BackupRecoveryApi, ConnectorApi, HttpClient};
pub use config::ProviderConfig;
pub use provider::BackupRecoveryProvider;
pub use utils::{compose_id, split_id};

use baas_core::provider::{DataSource, ManagedResource, Provider};

// =============================================================================
// Provider Trait Implementation
// =============================================================================

impl Provider for BackupRecoveryProvider {
    fn name(&self) -> &'static str {
        "ibm"
    }

    fn resources(&self) -> Vec<Box<dyn ManagedResource>> {
        resources::resources(&self.api, self.connector.as_ref())
    }

    fn data_sources(&self) -> Vec<Box<dyn DataSource>> {
        data_sources::data_sources(&self.api, self.connector.as_ref())
    }
}
