//! Dispatcher - The CRUD lifecycle template shared by every resource
//!
//! The host framework calls into the dispatcher with attribute maps and
//! recorded state. The dispatcher validates configuration against the
//! resource schema, hands over to the resource handler for the single remote
//! call, and turns the outcome into new state plus diagnostics:
//!
//! - create: validate, create, then read back to reconcile computed fields
//! - read: a 404 clears the identifier instead of failing
//! - update: only changed attributes are passed on; resources without a
//!   remote update get a warning and a local-only state change
//! - delete: resources without a remote delete get a warning, the state is
//!   cleared either way

use std::collections::HashMap;

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::differ::{changed_attributes, select};
use crate::provider::{DataSource, ManagedResource, Operation, Provider, ProviderError};
use crate::resource::{AttributeMap, Resource, ResourceId, State};
use crate::schema::{AttributeError, ResourceSchema};

pub const UPDATE_NOT_SUPPORTED_SUMMARY: &str = "Resource Update Will Only Affect Terraform State";
pub const UPDATE_NOT_SUPPORTED_DETAIL: &str = "Update operation for this resource is not supported and will only affect the terraform statefile. No changes will be made to the backend resource.";
pub const DELETE_NOT_SUPPORTED_SUMMARY: &str = "Delete Not Supported";
pub const DELETE_NOT_SUPPORTED_DETAIL: &str = "The resource definition will only be removed from the terraform statefile. This resource cannot be deleted from the backend.";

/// New state of a resource together with the diagnostics of the operation
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub state: State,
    pub diagnostics: Diagnostics,
}

impl Outcome {
    fn ok(state: State) -> Self {
        Self {
            state,
            diagnostics: Diagnostics::new(),
        }
    }

    fn failed(state: State, err: ProviderError) -> Self {
        let mut diagnostics = Diagnostics::new();
        diagnostics.push(err);
        Self { state, diagnostics }
    }

    fn invalid(state: State, id: &ResourceId, errors: Vec<AttributeError>) -> Self {
        let mut diagnostics = Diagnostics::new();
        for e in &errors {
            diagnostics.push(ProviderError::validation(e).for_resource(id.clone()));
        }
        Self { state, diagnostics }
    }

    fn warned(state: State, warning: Diagnostic) -> Self {
        let mut diagnostics = Diagnostics::new();
        diagnostics.push(warning);
        Self { state, diagnostics }
    }

    /// Whether the operation finished without error diagnostics
    pub fn is_ok(&self) -> bool {
        !self.diagnostics.has_errors()
    }
}

/// Routes lifecycle calls to the resource and data source handlers of a provider
pub struct Dispatcher {
    provider_name: &'static str,
    resources: HashMap<&'static str, Box<dyn ManagedResource>>,
    data_sources: HashMap<&'static str, Box<dyn DataSource>>,
}

impl Dispatcher {
    pub fn new(provider: &dyn Provider) -> Self {
        let resources = provider
            .resources()
            .into_iter()
            .map(|r| (r.name(), r))
            .collect();
        let data_sources = provider
            .data_sources()
            .into_iter()
            .map(|d| (d.name(), d))
            .collect();
        Self {
            provider_name: provider.name(),
            resources,
            data_sources,
        }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider_name
    }

    /// Registered resource type names, sorted
    pub fn resource_types(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.resources.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Registered data source type names, sorted
    pub fn data_source_types(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.data_sources.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn resource_schema(&self, resource_type: &str) -> Option<ResourceSchema> {
        self.resources.get(resource_type).map(|r| r.schema())
    }

    pub fn data_source_schema(&self, data_source_type: &str) -> Option<ResourceSchema> {
        self.data_sources.get(data_source_type).map(|d| d.schema())
    }

    fn resource(
        &self,
        id: &ResourceId,
        operation: Operation,
    ) -> Result<&dyn ManagedResource, ProviderError> {
        self.resources
            .get(id.resource_type.as_str())
            .map(|r| r.as_ref())
            .ok_or_else(|| {
                ProviderError::configuration(format!(
                    "Unknown resource type: {}",
                    id.resource_type
                ))
                .for_resource(id.clone())
                .during(operation)
            })
    }

    // =========================================================================
    // Resource lifecycle
    // =========================================================================

    /// Create a resource, then read it back to fill in computed attributes
    pub async fn create(&self, resource: &Resource) -> Outcome {
        let id = &resource.id;
        let handler = match self.resource(id, Operation::Create) {
            Ok(handler) => handler,
            Err(e) => return Outcome::failed(State::not_found(id.clone()), e),
        };
        let schema = handler.schema();
        if let Err(errors) = schema.validate_config(&resource.attributes) {
            return Outcome::invalid(State::not_found(id.clone()), id, errors);
        }

        log::debug!("creating {}.{}", id.resource_type, id.name);
        let identifier = match handler.create(&resource.attributes).await {
            Ok(identifier) => identifier,
            Err(e) => {
                return Outcome::failed(
                    State::not_found(id.clone()),
                    e.for_resource(id.clone()).during(Operation::Create),
                );
            }
        };
        log::info!("created {}.{} ({})", id.resource_type, id.name, identifier);

        // The object exists from here on, so every outcome keeps the identifier
        let created = State::existing(id.clone(), resource.attributes.clone())
            .with_identifier(identifier.clone());
        match handler.read(&identifier, &resource.attributes).await {
            Ok(remote) => Outcome::ok(
                State::existing(id.clone(), merge(&resource.attributes, remote))
                    .with_identifier(identifier),
            ),
            Err(e) if e.is_not_found() => Outcome::failed(
                created,
                ProviderError::new(format!(
                    "object {} was created but could not be read back",
                    identifier
                ))
                .for_resource(id.clone())
                .during(Operation::Read)
                .with_cause(e),
            ),
            Err(e) => Outcome::failed(created, e.for_resource(id.clone()).during(Operation::Read)),
        }
    }

    /// Refresh a resource from the remote service
    pub async fn read(&self, state: &State) -> Outcome {
        let id = &state.id;
        let identifier = match (&state.identifier, state.exists) {
            (Some(identifier), true) => identifier,
            _ => return Outcome::ok(State::not_found(id.clone())),
        };
        let handler = match self.resource(id, Operation::Read) {
            Ok(handler) => handler,
            Err(e) => return Outcome::failed(state.clone(), e),
        };
        let schema = handler.schema();

        match handler.read(identifier, &state.attributes).await {
            Ok(remote) => Outcome::ok(
                State::existing(id.clone(), merge(&configured(&schema, &state.attributes), remote))
                    .with_identifier(identifier.clone()),
            ),
            Err(e) if e.is_not_found() => {
                log::warn!(
                    "{}.{} ({}) no longer exists, removing it from state",
                    id.resource_type,
                    id.name,
                    identifier
                );
                Outcome::ok(State::not_found(id.clone()))
            }
            Err(e) => Outcome::failed(
                state.clone(),
                e.for_resource(id.clone()).during(Operation::Read),
            ),
        }
    }

    /// Update a resource in place
    pub async fn update(&self, from: &State, to: &Resource) -> Outcome {
        let id = &to.id;
        let handler = match self.resource(id, Operation::Update) {
            Ok(handler) => handler,
            Err(e) => return Outcome::failed(from.clone(), e),
        };
        let schema = handler.schema();
        if let Err(errors) = schema.validate_config(&to.attributes) {
            return Outcome::invalid(from.clone(), id, errors);
        }
        let identifier = match &from.identifier {
            Some(identifier) => identifier.clone(),
            None => {
                return Outcome::failed(
                    from.clone(),
                    ProviderError::new("resource has no identifier to update")
                        .for_resource(id.clone())
                        .during(Operation::Update),
                );
            }
        };

        let changed = changed_attributes(&schema, &to.attributes, &from.attributes);
        if changed.is_empty() {
            log::debug!("{}.{} has no changes", id.resource_type, id.name);
            return Outcome::ok(from.clone());
        }

        let force_new = schema.force_new_among(&changed);
        if !force_new.is_empty() {
            let mut diagnostics = Diagnostics::new();
            for name in force_new {
                diagnostics.push(
                    ProviderError::configuration(format!(
                        "Cannot update resource property \"{}\" with the ForceNew annotation. \
                         The resource must be re-created to update this property.",
                        name
                    ))
                    .for_resource(id.clone())
                    .during(Operation::Update)
                    .at_attribute(name),
                );
            }
            return Outcome {
                state: from.clone(),
                diagnostics,
            };
        }

        let remote_changes = schema.remote_among(&changed);
        if remote_changes.is_empty() {
            log::debug!(
                "{}.{} changes only local attributes: {}",
                id.resource_type,
                id.name,
                changed.join(", ")
            );
            return Outcome::ok(
                State::existing(id.clone(), apply_config(&schema, from, to))
                    .with_identifier(identifier),
            );
        }

        let changes = select(&to.attributes, &remote_changes);
        log::debug!(
            "updating {}.{} ({}): {}",
            id.resource_type,
            id.name,
            identifier,
            changed.join(", ")
        );
        match handler.update(&identifier, &changes, &to.attributes).await {
            Ok(()) => {}
            Err(e) if e.is_unsupported() => {
                log::warn!(
                    "{} has no remote update, changing local state only",
                    id.resource_type
                );
                let state = State::existing(id.clone(), apply_config(&schema, from, to))
                    .with_identifier(identifier);
                return Outcome::warned(
                    state,
                    Diagnostic::warning(UPDATE_NOT_SUPPORTED_SUMMARY)
                        .with_detail(UPDATE_NOT_SUPPORTED_DETAIL),
                );
            }
            Err(e) => {
                return Outcome::failed(
                    from.clone(),
                    e.for_resource(id.clone()).during(Operation::Update),
                );
            }
        }

        match handler.read(&identifier, &to.attributes).await {
            Ok(remote) => Outcome::ok(
                State::existing(id.clone(), merge(&to.attributes, remote))
                    .with_identifier(identifier),
            ),
            Err(e) => Outcome::failed(
                State::existing(id.clone(), apply_config(&schema, from, to))
                    .with_identifier(identifier),
                e.for_resource(id.clone()).during(Operation::Read),
            ),
        }
    }

    /// Delete a resource; the returned state is cleared unless the call failed
    pub async fn delete(&self, state: &State) -> Outcome {
        let id = &state.id;
        let identifier = match &state.identifier {
            Some(identifier) => identifier,
            None => return Outcome::ok(State::not_found(id.clone())),
        };
        let handler = match self.resource(id, Operation::Delete) {
            Ok(handler) => handler,
            Err(e) => return Outcome::failed(state.clone(), e),
        };

        match handler.delete(identifier, &state.attributes).await {
            Ok(()) => {
                log::info!("deleted {}.{} ({})", id.resource_type, id.name, identifier);
                Outcome::ok(State::not_found(id.clone()))
            }
            Err(e) if e.is_unsupported() => Outcome::warned(
                State::not_found(id.clone()),
                Diagnostic::warning(DELETE_NOT_SUPPORTED_SUMMARY)
                    .with_detail(DELETE_NOT_SUPPORTED_DETAIL),
            ),
            Err(e) if e.is_not_found() => {
                log::info!(
                    "{}.{} ({}) was already deleted",
                    id.resource_type,
                    id.name,
                    identifier
                );
                Outcome::ok(State::not_found(id.clone()))
            }
            Err(e) => Outcome::failed(
                state.clone(),
                e.for_resource(id.clone()).during(Operation::Delete),
            ),
        }
    }

    // =========================================================================
    // Data sources
    // =========================================================================

    /// Read a data source
    pub async fn read_data_source(&self, config: &Resource) -> Outcome {
        let id = &config.id;
        let handler = match self.data_sources.get(id.resource_type.as_str()) {
            Some(handler) => handler,
            None => {
                return Outcome::failed(
                    State::not_found(id.clone()),
                    ProviderError::configuration(format!(
                        "Unknown data source type: {}",
                        id.resource_type
                    ))
                    .for_resource(id.clone())
                    .during(Operation::Read),
                );
            }
        };
        if let Err(errors) = handler.schema().validate_config(&config.attributes) {
            return Outcome::invalid(State::not_found(id.clone()), id, errors);
        }

        match handler.read(&config.attributes).await {
            Ok(observed) => Outcome::ok(
                State::existing(id.clone(), merge(&config.attributes, observed.attributes))
                    .with_identifier(observed.identifier),
            ),
            Err(e) => Outcome::failed(
                State::not_found(id.clone()),
                e.for_resource(id.clone()).during(Operation::Read),
            ),
        }
    }
}

/// Configured attributes overlaid with what the remote service reported
fn merge(config: &AttributeMap, remote: AttributeMap) -> AttributeMap {
    let mut merged = config.clone();
    merged.extend(remote);
    merged
}

/// Attributes of `state` that come from configuration
fn configured(schema: &ResourceSchema, state: &AttributeMap) -> AttributeMap {
    state
        .iter()
        .filter(|(name, _)| {
            schema
                .attributes
                .get(*name)
                .is_some_and(|a| a.is_configurable())
        })
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

/// Prior state with the new configuration applied locally
fn apply_config(schema: &ResourceSchema, from: &State, to: &Resource) -> AttributeMap {
    let mut attributes: AttributeMap = from
        .attributes
        .iter()
        .filter(|(name, _)| {
            to.attributes.contains_key(*name)
                || schema
                    .attributes
                    .get(*name)
                    .is_none_or(|a| a.computed)
        })
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    attributes.extend(to.attributes.clone());
    attributes
}
