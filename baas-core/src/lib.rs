//! BaaS Core
//!
//! Schema declaration, attribute map codec and the CRUD dispatch template
//! shared by the Backup & Recovery resources and data sources

pub mod case_convert;
pub mod codec;
pub mod diagnostics;
pub mod differ;
pub mod dispatcher;
pub mod provider;
pub mod resource;
pub mod schema;

pub use codec::{CodecError, decode, encode};
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use dispatcher::{Dispatcher, Outcome};
pub use provider::{
    BoxFuture, DataSource, ErrorKind, ManagedResource, Observed, Operation, Provider,
    ProviderError, ProviderResult,
};
pub use resource::{AttributeMap, Resource, ResourceId, State, Value};
pub use schema::{AttributeSchema, AttributeType, NestedBlock, ResourceSchema};
