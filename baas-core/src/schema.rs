//! Schema - Define type schemas for resources
//!
//! Providers declare a static schema for each resource and data source type.
//! The schema drives config validation, the attribute codec and the
//! generated reference docs.

use std::collections::BTreeMap;
use std::fmt;

use crate::case_convert::to_wire_name;
use crate::resource::{AttributeMap, Value};

/// Attribute type
#[derive(Debug, Clone)]
pub enum AttributeType {
    /// String
    String,
    /// Integer
    Int,
    /// Floating point number
    Float,
    /// Boolean
    Bool,
    /// Enum (list of allowed string values)
    Enum(Vec<String>),
    /// Custom type (with validation function)
    Custom {
        name: String,
        base: Box<AttributeType>,
        validate: fn(&Value) -> Result<(), String>,
    },
    /// List of scalars
    List(Box<AttributeType>),
    /// Map with string keys
    Map(Box<AttributeType>),
    /// Nested block
    Block(NestedBlock),
}

/// Nested block: its own attribute set plus a cardinality
#[derive(Debug, Clone)]
pub struct NestedBlock {
    pub attributes: BTreeMap<String, AttributeSchema>,
    /// At most one item (modelled as a list of length <= 1)
    pub singular: bool,
}

impl NestedBlock {
    /// Block that appears at most once
    pub fn single() -> Self {
        Self {
            attributes: BTreeMap::new(),
            singular: true,
        }
    }

    /// Block that may repeat
    pub fn repeated() -> Self {
        Self {
            attributes: BTreeMap::new(),
            singular: false,
        }
    }

    pub fn attribute(mut self, schema: AttributeSchema) -> Self {
        self.attributes.insert(schema.name.clone(), schema);
        self
    }
}

impl AttributeType {
    /// Check if a value conforms to this type
    pub fn validate(&self, value: &Value, path: &str) -> Result<(), AttributeError> {
        match (self, value) {
            (AttributeType::String, Value::String(_)) => Ok(()),
            (AttributeType::Int, Value::Int(_)) => Ok(()),
            (AttributeType::Float, Value::Float(_) | Value::Int(_)) => Ok(()),
            (AttributeType::Bool, Value::Bool(_)) => Ok(()),

            (AttributeType::Enum(variants), Value::String(s)) => {
                if variants.iter().any(|v| v == s) {
                    Ok(())
                } else {
                    Err(AttributeError::new(
                        path,
                        TypeError::InvalidEnumVariant {
                            value: s.clone(),
                            expected: variants.clone(),
                        },
                    ))
                }
            }

            (AttributeType::Custom { base, validate, .. }, v) => {
                base.validate(v, path)?;
                validate(v).map_err(|message| {
                    AttributeError::new(path, TypeError::ValidationFailed { message })
                })
            }

            (AttributeType::List(inner), Value::List(items)) => {
                for (i, item) in items.iter().enumerate() {
                    inner.validate(item, &index_path(path, i))?;
                }
                Ok(())
            }

            (AttributeType::Map(inner), Value::Map(map)) => {
                for (k, v) in map {
                    inner.validate(v, &format!("{}[\"{}\"]", path, k))?;
                }
                Ok(())
            }

            (AttributeType::Block(block), Value::List(items)) => {
                if block.singular && items.len() > 1 {
                    return Err(AttributeError::new(
                        path,
                        TypeError::TooManyItems {
                            max: 1,
                            got: items.len(),
                        },
                    ));
                }
                for (i, item) in items.iter().enumerate() {
                    let item_path = index_path(path, i);
                    match item {
                        Value::Map(attrs) => {
                            let mut errors = Vec::new();
                            validate_attributes(&block.attributes, attrs, &item_path, &mut errors);
                            if let Some(first) = errors.into_iter().next() {
                                return Err(first);
                            }
                        }
                        other => {
                            return Err(AttributeError::new(
                                item_path,
                                TypeError::TypeMismatch {
                                    expected: "Block".to_string(),
                                    got: other.type_name(),
                                },
                            ));
                        }
                    }
                }
                Ok(())
            }

            _ => Err(AttributeError::new(
                path,
                TypeError::TypeMismatch {
                    expected: self.type_name(),
                    got: value.type_name(),
                },
            )),
        }
    }

    pub fn type_name(&self) -> String {
        match self {
            AttributeType::String => "String".to_string(),
            AttributeType::Int => "Int".to_string(),
            AttributeType::Float => "Float".to_string(),
            AttributeType::Bool => "Bool".to_string(),
            AttributeType::Enum(variants) => format!("Enum({})", variants.join(" | ")),
            AttributeType::Custom { name, .. } => name.clone(),
            AttributeType::List(inner) => format!("List<{}>", inner.type_name()),
            AttributeType::Map(inner) => format!("Map<{}>", inner.type_name()),
            AttributeType::Block(block) if block.singular => "Block".to_string(),
            AttributeType::Block(_) => "List<Block>".to_string(),
        }
    }

    /// Strip custom wrappers down to the structural type
    pub fn base(&self) -> &AttributeType {
        match self {
            AttributeType::Custom { base, .. } => base.base(),
            other => other,
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

/// Type error
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TypeError {
    #[error("Type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },

    #[error("Invalid enum variant '{value}', expected one of: {}", expected.join(", "))]
    InvalidEnumVariant {
        value: String,
        expected: Vec<String>,
    },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    #[error("Required attribute is missing")]
    MissingRequired,

    #[error("Unknown attribute")]
    UnknownAttribute,

    #[error("Attribute is computed and cannot be configured")]
    ComputedOnly,

    #[error("Too many items: at most {max} allowed, got {got}")]
    TooManyItems { max: usize, got: usize },
}

/// A type error located at an attribute path (e.g. `sla[1].sla_minutes`)
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{path}: {kind}")]
pub struct AttributeError {
    pub path: String,
    pub kind: TypeError,
}

impl AttributeError {
    pub fn new(path: impl Into<String>, kind: TypeError) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

pub(crate) fn child_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", parent, name)
    }
}

pub(crate) fn index_path(parent: &str, index: usize) -> String {
    format!("{}[{}]", parent, index)
}

impl Value {
    pub(crate) fn type_name(&self) -> String {
        match self {
            Value::String(_) => "String".to_string(),
            Value::Int(_) => "Int".to_string(),
            Value::Float(_) => "Float".to_string(),
            Value::Bool(_) => "Bool".to_string(),
            Value::List(_) => "List".to_string(),
            Value::Map(_) => "Map".to_string(),
        }
    }
}

/// Attribute schema
#[derive(Debug, Clone)]
pub struct AttributeSchema {
    pub name: String,
    pub attr_type: AttributeType,
    pub required: bool,
    pub optional: bool,
    pub computed: bool,
    pub sensitive: bool,
    /// Changing the value requires re-creating the resource
    pub force_new: bool,
    pub default: Option<Value>,
    pub description: Option<String>,
    /// Provider-side property name (e.g., "agentIDs") when it does not
    /// follow the camelCase transform of `name`
    pub provider_name: Option<String>,
    /// Kept in state only; changing it never reaches the remote update
    pub local_only: bool,
}

impl AttributeSchema {
    pub fn new(name: impl Into<String>, attr_type: AttributeType) -> Self {
        Self {
            name: name.into(),
            attr_type,
            required: false,
            optional: true,
            computed: false,
            sensitive: false,
            force_new: false,
            default: None,
            description: None,
            provider_name: None,
            local_only: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self.optional = false;
        self
    }

    /// Read-only attribute, set by the remote service
    pub fn computed(mut self) -> Self {
        self.computed = true;
        self.optional = false;
        self
    }

    /// Optional attribute that the remote service fills in when unset
    pub fn optional_computed(mut self) -> Self {
        self.computed = true;
        self.optional = true;
        self
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    pub fn force_new(mut self) -> Self {
        self.force_new = true;
        self
    }

    pub fn local_only(mut self) -> Self {
        self.local_only = true;
        self
    }

    pub fn with_default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    pub fn with_provider_name(mut self, name: impl Into<String>) -> Self {
        self.provider_name = Some(name.into());
        self
    }

    /// Whether the attribute may appear in configuration
    pub fn is_configurable(&self) -> bool {
        self.required || self.optional
    }

    /// Property name used on the wire and by the domain structs
    pub fn wire_name(&self) -> String {
        match &self.provider_name {
            Some(name) => name.clone(),
            None => to_wire_name(&self.name),
        }
    }
}

/// Resource schema
#[derive(Debug, Clone)]
pub struct ResourceSchema {
    pub resource_type: String,
    pub attributes: BTreeMap<String, AttributeSchema>,
    pub description: Option<String>,
}

impl ResourceSchema {
    pub fn new(resource_type: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            attributes: BTreeMap::new(),
            description: None,
        }
    }

    pub fn attribute(mut self, schema: AttributeSchema) -> Self {
        self.attributes.insert(schema.name.clone(), schema);
        self
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Validate resource attributes
    pub fn validate(&self, attributes: &AttributeMap) -> Result<(), Vec<AttributeError>> {
        let mut errors = Vec::new();
        validate_attributes(&self.attributes, attributes, "", &mut errors);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate user configuration: like `validate`, and additionally rejects
    /// unknown and computed-only attributes at the top level
    pub fn validate_config(&self, attributes: &AttributeMap) -> Result<(), Vec<AttributeError>> {
        let mut errors = Vec::new();
        for name in attributes.keys() {
            match self.attributes.get(name) {
                None => errors.push(AttributeError::new(name, TypeError::UnknownAttribute)),
                Some(schema) if !schema.is_configurable() => {
                    errors.push(AttributeError::new(name, TypeError::ComputedOnly))
                }
                Some(_) => {}
            }
        }
        validate_attributes(&self.attributes, attributes, "", &mut errors);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Names of the given attributes that carry the ForceNew annotation
    pub fn force_new_among<'a>(&self, names: &'a [String]) -> Vec<&'a str> {
        names
            .iter()
            .filter(|name| self.attributes.get(*name).is_some_and(|a| a.force_new))
            .map(String::as_str)
            .collect()
    }

    /// The named attributes that the remote service stores
    pub fn remote_among(&self, names: &[String]) -> Vec<String> {
        names
            .iter()
            .filter(|name| !self.attributes.get(*name).is_some_and(|a| a.local_only))
            .cloned()
            .collect()
    }
}

fn validate_attributes(
    schemas: &BTreeMap<String, AttributeSchema>,
    attributes: &AttributeMap,
    path: &str,
    errors: &mut Vec<AttributeError>,
) {
    // Check required attributes
    for (name, schema) in schemas {
        if schema.required && !attributes.contains_key(name) && schema.default.is_none() {
            errors.push(AttributeError::new(
                child_path(path, name),
                TypeError::MissingRequired,
            ));
        }
    }

    // Type check each attribute
    for (name, value) in attributes {
        if let Some(schema) = schemas.get(name)
            && let Err(e) = schema.attr_type.validate(value, &child_path(path, name))
        {
            errors.push(e);
        }
        // Unknown attributes are only rejected by validate_config
    }
}

/// Helper functions for common types
pub mod types {
    use super::*;

    /// Positive integer type
    pub fn positive_int() -> AttributeType {
        AttributeType::Custom {
            name: "PositiveInt".to_string(),
            base: Box::new(AttributeType::Int),
            validate: |value| match value {
                Value::Int(n) if *n > 0 => Ok(()),
                Value::Int(_) => Err("Value must be positive".to_string()),
                _ => Err("Expected integer".to_string()),
            },
        }
    }

    /// String enum from a static list of allowed values
    pub fn one_of(values: &[&str]) -> AttributeType {
        AttributeType::Enum(values.iter().map(|v| v.to_string()).collect())
    }

    /// List of strings
    pub fn string_list() -> AttributeType {
        AttributeType::List(Box::new(AttributeType::String))
    }

    /// List of integers
    pub fn int_list() -> AttributeType {
        AttributeType::List(Box::new(AttributeType::Int))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sla_block() -> AttributeType {
        AttributeType::Block(
            NestedBlock::repeated()
                .attribute(
                    AttributeSchema::new("backup_run_type", types::one_of(&["kFull", "kIncremental"]))
                        .required(),
                )
                .attribute(AttributeSchema::new("sla_minutes", types::positive_int()).required()),
        )
    }

    fn sla(run_type: &str, minutes: Value) -> Value {
        let mut map = BTreeMap::new();
        map.insert("backup_run_type".to_string(), Value::from(run_type));
        map.insert("sla_minutes".to_string(), minutes);
        Value::Map(map)
    }

    #[test]
    fn validate_string_type() {
        let t = AttributeType::String;
        assert!(t.validate(&Value::from("hello"), "a").is_ok());
        assert!(t.validate(&Value::Int(42), "a").is_err());
    }

    #[test]
    fn validate_float_accepts_int() {
        let t = AttributeType::Float;
        assert!(t.validate(&Value::Float(1.5), "a").is_ok());
        assert!(t.validate(&Value::Int(2), "a").is_ok());
        assert!(t.validate(&Value::Bool(true), "a").is_err());
    }

    #[test]
    fn validate_enum_type() {
        let t = types::one_of(&["a", "b"]);
        assert!(t.validate(&Value::from("a"), "e").is_ok());
        let err = t.validate(&Value::from("c"), "e").unwrap_err();
        assert_eq!(err.path, "e");
        assert!(matches!(err.kind, TypeError::InvalidEnumVariant { .. }));
    }

    #[test]
    fn validate_positive_int() {
        let t = types::positive_int();
        assert!(t.validate(&Value::Int(1), "n").is_ok());
        assert!(t.validate(&Value::Int(0), "n").is_err());
        assert!(t.validate(&Value::Int(-1), "n").is_err());
        // base type is checked before the custom validator
        let err = t.validate(&Value::from("1"), "n").unwrap_err();
        assert!(matches!(err.kind, TypeError::TypeMismatch { .. }));
    }

    #[test]
    fn validate_nested_block_reports_path() {
        let t = sla_block();
        let value = Value::List(vec![
            sla("kFull", Value::Int(60)),
            sla("kIncremental", Value::from("soon")),
        ]);
        let err = t.validate(&value, "sla").unwrap_err();
        assert_eq!(err.path, "sla[1].sla_minutes");
        assert_eq!(
            err.to_string(),
            "sla[1].sla_minutes: Type mismatch: expected Int, got String"
        );
    }

    #[test]
    fn validate_nested_block_missing_required() {
        let t = sla_block();
        let mut map = BTreeMap::new();
        map.insert("sla_minutes".to_string(), Value::Int(5));
        let err = t.validate(&Value::List(vec![Value::Map(map)]), "sla").unwrap_err();
        assert_eq!(err.path, "sla[0].backup_run_type");
        assert_eq!(err.kind, TypeError::MissingRequired);
    }

    #[test]
    fn singular_block_rejects_two_items() {
        let t = AttributeType::Block(
            NestedBlock::single().attribute(AttributeSchema::new("hour", AttributeType::Int)),
        );
        let item = Value::Map(BTreeMap::new());
        let err = t
            .validate(&Value::List(vec![item.clone(), item]), "start_time")
            .unwrap_err();
        assert_eq!(err.kind, TypeError::TooManyItems { max: 1, got: 2 });
    }

    #[test]
    fn validate_resource_schema() {
        let schema = ResourceSchema::new("resource")
            .attribute(AttributeSchema::new("name", AttributeType::String).required())
            .attribute(AttributeSchema::new("count", types::positive_int()))
            .attribute(AttributeSchema::new("enabled", AttributeType::Bool));

        let mut attrs = AttributeMap::new();
        attrs.insert("name".to_string(), Value::from("my-resource"));
        attrs.insert("count".to_string(), Value::Int(5));
        attrs.insert("enabled".to_string(), Value::Bool(true));

        assert!(schema.validate(&attrs).is_ok());
    }

    #[test]
    fn missing_required_attribute() {
        let schema = ResourceSchema::new("connection")
            .attribute(AttributeSchema::new("name", AttributeType::String).required());

        let errors = schema.validate(&AttributeMap::new()).unwrap_err();
        assert_eq!(errors, vec![AttributeError::new("name", TypeError::MissingRequired)]);
    }

    #[test]
    fn required_with_default_is_satisfied() {
        let schema = ResourceSchema::new("connection").attribute(
            AttributeSchema::new("endpoint_type", AttributeType::String)
                .required()
                .with_default(Value::from("public")),
        );
        assert!(schema.validate(&AttributeMap::new()).is_ok());
    }

    #[test]
    fn validate_config_rejects_computed_and_unknown() {
        let schema = ResourceSchema::new("connection")
            .attribute(AttributeSchema::new("name", AttributeType::String).required())
            .attribute(AttributeSchema::new("connection_id", AttributeType::String).computed());

        let mut attrs = AttributeMap::new();
        attrs.insert("name".to_string(), Value::from("c"));
        attrs.insert("connection_id".to_string(), Value::from("1"));
        attrs.insert("colour".to_string(), Value::from("blue"));

        let errors = schema.validate_config(&attrs).unwrap_err();
        assert!(errors.contains(&AttributeError::new("connection_id", TypeError::ComputedOnly)));
        assert!(errors.contains(&AttributeError::new("colour", TypeError::UnknownAttribute)));
        // plain validate tolerates both
        assert!(schema.validate(&attrs).is_ok());
    }

    #[test]
    fn force_new_among_filters_annotated() {
        let schema = ResourceSchema::new("connection")
            .attribute(AttributeSchema::new("x_ibm_tenant_id", AttributeType::String).force_new())
            .attribute(AttributeSchema::new("connection_name", AttributeType::String));
        let changed = vec!["connection_name".to_string(), "x_ibm_tenant_id".to_string()];
        assert_eq!(schema.force_new_among(&changed), vec!["x_ibm_tenant_id"]);
    }

    #[test]
    fn remote_among_drops_local_only() {
        let schema = ResourceSchema::new("group")
            .attribute(AttributeSchema::new("name", AttributeType::String))
            .attribute(AttributeSchema::new("delete_snapshots", AttributeType::Bool).local_only());
        let changed = vec!["delete_snapshots".to_string(), "name".to_string()];
        assert_eq!(schema.remote_among(&changed), vec!["name"]);
    }

    #[test]
    fn wire_name_defaults_to_camel_case() {
        let attr = AttributeSchema::new("schedule_end_time_usecs", AttributeType::Int);
        assert_eq!(attr.wire_name(), "scheduleEndTimeUsecs");
        let attr = AttributeSchema::new("agent_ids", types::int_list()).with_provider_name("agentIDs");
        assert_eq!(attr.wire_name(), "agentIDs");
    }
}
