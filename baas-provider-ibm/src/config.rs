//! Provider configuration
//!
//! Decoded from the provider block through the same schema and codec as the
//! resources, then completed from the environment.

use std::fmt;

use baas_core::codec::decode;
use baas_core::provider::{ProviderError, ProviderResult};
use baas_core::resource::{AttributeMap, Value};
use baas_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};
use serde::Deserialize;

pub const ENDPOINT_ENV: &str = "IBMCLOUD_BACKUP_RECOVERY_ENDPOINT";
pub const CONNECTOR_ENDPOINT_ENV: &str = "IBMCLOUD_BACKUP_RECOVERY_CONNECTOR_ENDPOINT";
pub const IAM_TOKEN_ENV: &str = "IBMCLOUD_IAM_TOKEN";

/// Schema of the provider block
pub fn provider_schema() -> ResourceSchema {
    ResourceSchema::new("ibm")
        .with_description("IBM Cloud Backup & Recovery provider settings.")
        .attribute(
            AttributeSchema::new("endpoint", AttributeType::String).with_description(format!(
                "Base URL of the Backup & Recovery API. Falls back to {}.",
                ENDPOINT_ENV
            )),
        )
        .attribute(
            AttributeSchema::new("instance_id", AttributeType::String)
                .with_description("Service instance id, used to derive the endpoint."),
        )
        .attribute(
            AttributeSchema::new("region", AttributeType::String)
                .with_description("Region of the service instance, used to derive the endpoint."),
        )
        .attribute(
            AttributeSchema::new("endpoint_type", types::one_of(&["public", "private"]))
                .with_default(Value::String("public".to_string()))
                .with_description("Whether the derived endpoint is public or private."),
        )
        .attribute(
            AttributeSchema::new("connector_endpoint", AttributeType::String).with_description(
                format!(
                    "Base URL of the data source connector. Falls back to {}.",
                    CONNECTOR_ENDPOINT_ENV
                ),
            ),
        )
        .attribute(
            AttributeSchema::new("iam_token", AttributeType::String)
                .sensitive()
                .with_description(format!(
                    "IAM bearer token sent with every request. Falls back to {}.",
                    IAM_TOKEN_ENV
                )),
        )
}

#[derive(Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfig {
    pub endpoint: Option<String>,
    pub instance_id: Option<String>,
    pub region: Option<String>,
    pub endpoint_type: Option<String>,
    pub connector_endpoint: Option<String>,
    pub iam_token: Option<String>,
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("endpoint", &self.endpoint)
            .field("instance_id", &self.instance_id)
            .field("region", &self.region)
            .field("endpoint_type", &self.endpoint_type)
            .field("connector_endpoint", &self.connector_endpoint)
            .field("iam_token", &self.iam_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(|s| s.trim()).filter(|s| !s.is_empty())
}

impl ProviderConfig {
    /// Decode the provider block, falling back to the process environment
    pub fn from_attributes(attributes: &AttributeMap) -> ProviderResult<Self> {
        Self::from_attributes_with_env(attributes, |key| std::env::var(key).ok())
    }

    /// Decode the provider block, falling back to `env` for unset settings
    pub fn from_attributes_with_env(
        attributes: &AttributeMap,
        env: impl Fn(&str) -> Option<String>,
    ) -> ProviderResult<Self> {
        let schema = provider_schema();
        if let Err(errors) = schema.validate_config(attributes)
            && let Some(first) = errors.first()
        {
            return Err(ProviderError::validation(first));
        }

        let mut config: ProviderConfig = decode(&schema.attributes, attributes)?;
        if non_empty(config.endpoint.as_ref()).is_none() {
            config.endpoint = env(ENDPOINT_ENV);
        }
        if non_empty(config.connector_endpoint.as_ref()).is_none() {
            config.connector_endpoint = env(CONNECTOR_ENDPOINT_ENV);
        }
        if non_empty(config.iam_token.as_ref()).is_none() {
            config.iam_token = env(IAM_TOKEN_ENV);
        }
        Ok(config)
    }

    /// Base URL of the Backup & Recovery API
    ///
    /// An explicit endpoint wins; otherwise it is derived from the instance id
    /// and region.
    pub fn service_url(&self) -> ProviderResult<String> {
        if let Some(endpoint) = non_empty(self.endpoint.as_ref()) {
            return Ok(endpoint.to_string());
        }
        match (
            non_empty(self.instance_id.as_ref()),
            non_empty(self.region.as_ref()),
        ) {
            (Some(instance_id), Some(region)) => {
                let private = match self.endpoint_type.as_deref() {
                    Some("private") => "private.",
                    _ => "",
                };
                Ok(format!(
                    "https://{}.{}{}.backup-recovery.cloud.ibm.com/v2",
                    instance_id, private, region
                ))
            }
            _ => Err(ProviderError::configuration(format!(
                "no Backup & Recovery endpoint configured; set endpoint (or {}), \
                 or instance_id and region",
                ENDPOINT_ENV
            ))),
        }
    }

    /// Base URL of the data source connector, if one is configured
    pub fn connector_url(&self) -> Option<&str> {
        non_empty(self.connector_endpoint.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use baas_core::provider::ErrorKind;
    use std::collections::HashMap;

    fn attrs(pairs: &[(&str, &str)]) -> AttributeMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), Value::from(*v)))
            .collect()
    }

    fn env(pairs: &[(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<&str, &str> = pairs.iter().copied().collect();
        move |key: &str| vars.get(key).map(|v| v.to_string())
    }

    #[test]
    fn explicit_endpoint_wins_over_environment() {
        let config = ProviderConfig::from_attributes_with_env(
            &attrs(&[("endpoint", "https://brs.example.test/v2")]),
            env(&[(ENDPOINT_ENV, "https://other.example.test/v2")]),
        )
        .unwrap();
        assert_eq!(config.service_url().unwrap(), "https://brs.example.test/v2");
    }

    #[test]
    fn settings_fall_back_to_environment() {
        let config = ProviderConfig::from_attributes_with_env(
            &AttributeMap::new(),
            env(&[
                (ENDPOINT_ENV, "https://brs.example.test/v2"),
                (CONNECTOR_ENDPOINT_ENV, "https://10.0.0.4:8443"),
                (IAM_TOKEN_ENV, "token-abc"),
            ]),
        )
        .unwrap();
        assert_eq!(config.service_url().unwrap(), "https://brs.example.test/v2");
        assert_eq!(config.connector_url(), Some("https://10.0.0.4:8443"));
        assert_eq!(config.iam_token.as_deref(), Some("token-abc"));
    }

    #[test]
    fn endpoint_is_derived_from_instance_and_region() {
        let config = ProviderConfig::from_attributes_with_env(
            &attrs(&[
                ("instance_id", "a1b2c3"),
                ("region", "eu-de"),
                ("endpoint_type", "private"),
            ]),
            env(&[]),
        )
        .unwrap();
        assert_eq!(
            config.service_url().unwrap(),
            "https://a1b2c3.private.eu-de.backup-recovery.cloud.ibm.com/v2"
        );

        let public = ProviderConfig::from_attributes_with_env(
            &attrs(&[("instance_id", "a1b2c3"), ("region", "eu-de")]),
            env(&[]),
        )
        .unwrap();
        assert_eq!(public.endpoint_type.as_deref(), Some("public"));
        assert_eq!(
            public.service_url().unwrap(),
            "https://a1b2c3.eu-de.backup-recovery.cloud.ibm.com/v2"
        );
    }

    #[test]
    fn missing_endpoint_is_a_configuration_error() {
        let config =
            ProviderConfig::from_attributes_with_env(&attrs(&[("region", "eu-de")]), env(&[]))
                .unwrap();
        let err = config.service_url().unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }

    #[test]
    fn empty_connector_endpoint_counts_as_unset() {
        let config = ProviderConfig::from_attributes_with_env(
            &attrs(&[("endpoint", "https://brs.example.test/v2"), ("connector_endpoint", " ")]),
            env(&[]),
        )
        .unwrap();
        assert_eq!(config.connector_url(), None);
    }

    #[test]
    fn invalid_endpoint_type_is_rejected() {
        let err = ProviderConfig::from_attributes_with_env(
            &attrs(&[("endpoint_type", "direct")]),
            env(&[]),
        )
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(err.attribute.as_deref(), Some("endpoint_type"));
    }

    #[test]
    fn debug_output_hides_token() {
        let config = ProviderConfig {
            iam_token: Some("secret".to_string()),
            ..Default::default()
        };
        assert!(!format!("{:?}", config).contains("secret"));
    }
}
