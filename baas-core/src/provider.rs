//! Provider - Traits abstracting resource and data source operations
//!
//! A Provider exposes a set of managed resources and data sources. Each one
//! owns its schema and turns attribute maps into calls on an injected remote
//! client. The lifecycle around those calls (validation, reconciling reads,
//! 404 handling, warnings) lives in [`crate::dispatcher`].

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use crate::codec::CodecError;
use crate::resource::{AttributeMap, ResourceId};
use crate::schema::{AttributeError, ResourceSchema};

/// Lifecycle operation, used to give errors context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Operation::Create => "create",
            Operation::Read => "read",
            Operation::Update => "update",
            Operation::Delete => "delete",
        };
        f.write_str(s)
    }
}

/// Broad category of a provider error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or malformed provider configuration
    Configuration,
    /// The remote object does not exist (HTTP 404)
    NotFound,
    /// Any other remote failure
    Api { status: Option<u16> },
    /// Configuration rejected by the schema
    Validation,
    /// Attribute map could not be converted
    Codec,
    /// The remote API has no endpoint for this operation
    Unsupported,
    Internal,
}

/// Error type for Provider operations
#[derive(Debug)]
pub struct ProviderError {
    pub kind: ErrorKind,
    pub message: String,
    pub resource_id: Option<ResourceId>,
    pub operation: Option<Operation>,
    pub attribute: Option<String>,
    pub cause: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref id) = self.resource_id {
            write!(f, "[{}.{}] ", id.resource_type, id.name)?;
        }
        if let Some(operation) = self.operation {
            write!(f, "{} failed: ", operation)?;
        }
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ProviderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_ref()
            .map(|e| e.as_ref() as &dyn std::error::Error)
    }
}

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self::with_kind(ErrorKind::Internal, message)
    }

    pub fn with_kind(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            resource_id: None,
            operation: None,
            attribute: None,
            cause: None,
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::with_kind(ErrorKind::Configuration, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::with_kind(ErrorKind::NotFound, message)
    }

    pub fn api(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::with_kind(ErrorKind::Api { status }, message)
    }

    /// Configuration rejected by the schema at `err.path`
    pub fn validation(err: &AttributeError) -> Self {
        Self::with_kind(
            ErrorKind::Validation,
            format!("invalid configuration: {}", err),
        )
        .at_attribute(err.path.clone())
    }

    /// The remote API offers no endpoint for `operation`
    pub fn unsupported(operation: Operation) -> Self {
        Self::with_kind(
            ErrorKind::Unsupported,
            format!("{} is not supported by the remote API", operation),
        )
        .during(operation)
    }

    pub fn for_resource(mut self, id: ResourceId) -> Self {
        self.resource_id = Some(id);
        self
    }

    pub fn during(mut self, operation: Operation) -> Self {
        self.operation = Some(operation);
        self
    }

    pub fn at_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = Some(attribute.into());
        self
    }

    pub fn with_cause(mut self, cause: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::NotFound
    }

    pub fn is_unsupported(&self) -> bool {
        self.kind == ErrorKind::Unsupported
    }
}

impl From<CodecError> for ProviderError {
    fn from(err: CodecError) -> Self {
        let mut provider_err = ProviderError::with_kind(ErrorKind::Codec, err.to_string());
        provider_err.attribute = err.attribute_path().map(str::to_string);
        provider_err
    }
}

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Return type for async operations
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Result of reading a data source
#[derive(Debug, Clone, PartialEq)]
pub struct Observed {
    /// Identifier recorded for the data source instance
    pub identifier: String,
    pub attributes: AttributeMap,
}

/// A resource type with a remote lifecycle
///
/// Implementations decode the attribute map into one request struct, make
/// exactly one client call and encode the response. They never retry.
pub trait ManagedResource: Send + Sync {
    /// Resource type name (e.g., "ibm_backup_recovery_protection_group")
    fn name(&self) -> &'static str;

    /// Attribute schema for this resource type
    fn schema(&self) -> ResourceSchema;

    /// Create the remote object and return its persistent identifier
    fn create<'a>(&'a self, config: &'a AttributeMap) -> BoxFuture<'a, ProviderResult<String>>;

    /// Read the remote object
    ///
    /// `state` carries scoping attributes recorded earlier (e.g. the tenant).
    /// Returns an error of kind [`ErrorKind::NotFound`] if the object is gone.
    fn read<'a>(
        &'a self,
        identifier: &'a str,
        state: &'a AttributeMap,
    ) -> BoxFuture<'a, ProviderResult<AttributeMap>>;

    /// Apply changed attributes to the remote object
    ///
    /// `changes` holds only the attributes that differ from prior state,
    /// `config` the full desired configuration.
    fn update<'a>(
        &'a self,
        _identifier: &'a str,
        _changes: &'a AttributeMap,
        _config: &'a AttributeMap,
    ) -> BoxFuture<'a, ProviderResult<()>> {
        Box::pin(async { Err(ProviderError::unsupported(Operation::Update)) })
    }

    /// Delete the remote object
    fn delete<'a>(
        &'a self,
        _identifier: &'a str,
        _state: &'a AttributeMap,
    ) -> BoxFuture<'a, ProviderResult<()>> {
        Box::pin(async { Err(ProviderError::unsupported(Operation::Delete)) })
    }
}

/// A read-only data source
pub trait DataSource: Send + Sync {
    /// Data source type name (e.g., "ibm_backup_recovery_connector_status")
    fn name(&self) -> &'static str;

    fn schema(&self) -> ResourceSchema;

    fn read<'a>(&'a self, config: &'a AttributeMap) -> BoxFuture<'a, ProviderResult<Observed>>;
}

/// Main Provider trait
pub trait Provider: Send + Sync {
    /// Name of this Provider (e.g., "ibm")
    fn name(&self) -> &'static str;

    /// Resource types this Provider can manage
    fn resources(&self) -> Vec<Box<dyn ManagedResource>>;

    /// Data sources this Provider can read
    fn data_sources(&self) -> Vec<Box<dyn DataSource>>;
}

/// Provider implementation for Box<dyn Provider>
/// This enables dynamic dispatch for Providers
impl Provider for Box<dyn Provider> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn resources(&self) -> Vec<Box<dyn ManagedResource>> {
        (**self).resources()
    }

    fn data_sources(&self) -> Vec<Box<dyn DataSource>> {
        (**self).data_sources()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::Value;
    use crate::schema::{AttributeSchema, AttributeType};

    // Mock resource with no remote update or delete
    struct MockResource;

    impl ManagedResource for MockResource {
        fn name(&self) -> &'static str {
            "mock_resource"
        }

        fn schema(&self) -> ResourceSchema {
            ResourceSchema::new("mock_resource")
                .attribute(AttributeSchema::new("name", AttributeType::String).required())
        }

        fn create<'a>(&'a self, _config: &'a AttributeMap) -> BoxFuture<'a, ProviderResult<String>> {
            Box::pin(async { Ok("mock-id-123".to_string()) })
        }

        fn read<'a>(
            &'a self,
            identifier: &'a str,
            _state: &'a AttributeMap,
        ) -> BoxFuture<'a, ProviderResult<AttributeMap>> {
            Box::pin(async move {
                if identifier == "mock-id-123" {
                    Ok(AttributeMap::from([("name".to_string(), Value::from("mock"))]))
                } else {
                    Err(ProviderError::not_found("no such object"))
                }
            })
        }
    }

    #[tokio::test]
    async fn mock_resource_read_unknown_is_not_found() {
        let err = MockResource
            .read("other", &AttributeMap::new())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn default_update_and_delete_are_unsupported() {
        let empty = AttributeMap::new();
        let err = MockResource.update("id", &empty, &empty).await.unwrap_err();
        assert!(err.is_unsupported());
        assert_eq!(err.operation, Some(Operation::Update));

        let err = MockResource.delete("id", &empty).await.unwrap_err();
        assert!(err.is_unsupported());
        assert_eq!(err.operation, Some(Operation::Delete));
    }

    #[test]
    fn error_display_includes_context() {
        let err = ProviderError::api(Some(500), "Internal Server Error")
            .for_resource(ResourceId::new("ibm_backup_recovery_protection_group", "nightly"))
            .during(Operation::Read);
        assert_eq!(
            err.to_string(),
            "[ibm_backup_recovery_protection_group.nightly] read failed: Internal Server Error"
        );
        assert_eq!(err.kind, ErrorKind::Api { status: Some(500) });
    }

    #[test]
    fn codec_error_keeps_attribute_path() {
        use crate::schema::{AttributeError, TypeError};
        let codec = CodecError::Attribute(AttributeError::new(
            "sla[0].sla_minutes",
            TypeError::MissingRequired,
        ));
        let err = ProviderError::from(codec);
        assert_eq!(err.kind, ErrorKind::Codec);
        assert_eq!(err.attribute.as_deref(), Some("sla[0].sla_minutes"));
    }
}
