//! Codec - Convert between attribute maps and domain structs
//!
//! Domain structs are plain serde types whose optional fields are `Option`s
//! and whose property names are the wire names declared by the schema.
//! Both directions walk the schema, so a field the schema does not declare
//! never reaches the attribute map and vice versa.
//!
//! - [`decode`]: attribute map -> domain struct. Every value is checked
//!   against the declared kind first; a mismatch is reported with the full
//!   attribute path instead of failing deep inside serde.
//! - [`encode`]: domain struct -> attribute map. `None` fields and empty
//!   sequences are omitted, nested structs become single-item blocks.

use std::any::type_name;
use std::collections::BTreeMap;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Number, Value as Json};

use crate::case_convert::to_attribute_name;
use crate::resource::{AttributeMap, Value};
use crate::schema::{
    AttributeError, AttributeSchema, AttributeType, TypeError, child_path, index_path,
};

/// Error converting between an attribute map and a domain struct
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CodecError {
    #[error(transparent)]
    Attribute(#[from] AttributeError),

    #[error("failed to decode {target}: {message}")]
    Deserialize {
        target: &'static str,
        /// Attribute named by the underlying error, if any
        attribute: Option<String>,
        message: String,
    },

    #[error("failed to encode {source_type}: {message}")]
    Serialize {
        source_type: &'static str,
        message: String,
    },

    #[error("{source_type} does not encode to an object")]
    NotAnObject { source_type: &'static str },
}

impl CodecError {
    /// Attribute path the error points at, when known
    pub fn attribute_path(&self) -> Option<&str> {
        match self {
            CodecError::Attribute(e) => Some(&e.path),
            CodecError::Deserialize { attribute, .. } => attribute.as_deref(),
            _ => None,
        }
    }
}

/// Decode an attribute map into a domain struct
pub fn decode<T: DeserializeOwned>(
    schema: &BTreeMap<String, AttributeSchema>,
    attributes: &AttributeMap,
) -> Result<T, CodecError> {
    let object = attributes_to_json(schema, attributes, "")?;
    serde_json::from_value(Json::Object(object)).map_err(|e| {
        let message = e.to_string();
        // serde names the offending property between backticks
        let attribute = message.split('`').nth(1).map(to_attribute_name);
        CodecError::Deserialize {
            target: short_type_name::<T>(),
            attribute,
            message,
        }
    })
}

/// Encode a domain struct into an attribute map
pub fn encode<T: Serialize>(
    schema: &BTreeMap<String, AttributeSchema>,
    value: &T,
) -> Result<AttributeMap, CodecError> {
    let json = serde_json::to_value(value).map_err(|e| CodecError::Serialize {
        source_type: short_type_name::<T>(),
        message: e.to_string(),
    })?;
    match json {
        Json::Object(object) => json_to_attributes(schema, &object, ""),
        _ => Err(CodecError::NotAnObject {
            source_type: short_type_name::<T>(),
        }),
    }
}

fn short_type_name<T>() -> &'static str {
    let full = type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}

fn mismatch(path: &str, expected: &AttributeType, got: String) -> CodecError {
    CodecError::Attribute(AttributeError::new(
        path,
        TypeError::TypeMismatch {
            expected: expected.type_name(),
            got,
        },
    ))
}

// =============================================================================
// Decoding
// =============================================================================

fn attributes_to_json(
    schema: &BTreeMap<String, AttributeSchema>,
    attributes: &AttributeMap,
    path: &str,
) -> Result<Map<String, Json>, CodecError> {
    let mut object = Map::new();
    for (name, attr) in schema {
        let value = match attributes.get(name).or(attr.default.as_ref()) {
            Some(value) => value,
            None => continue,
        };
        if let Some(json) = value_to_json(&attr.attr_type, value, &child_path(path, name))? {
            object.insert(attr.wire_name(), json);
        }
    }
    Ok(object)
}

fn value_to_json(
    attr_type: &AttributeType,
    value: &Value,
    path: &str,
) -> Result<Option<Json>, CodecError> {
    let json = match (attr_type.base(), value) {
        (AttributeType::String | AttributeType::Enum(_), Value::String(s)) => {
            Json::String(s.clone())
        }
        (AttributeType::Int, Value::Int(i)) => Json::from(*i),
        (AttributeType::Float, Value::Int(i)) => Json::from(*i as f64),
        (AttributeType::Float, Value::Float(f)) => match Number::from_f64(*f) {
            Some(n) => Json::Number(n),
            None => {
                return Err(CodecError::Attribute(AttributeError::new(
                    path,
                    TypeError::ValidationFailed {
                        message: format!("{} is not a finite number", f),
                    },
                )));
            }
        },
        (AttributeType::Bool, Value::Bool(b)) => Json::Bool(*b),
        (AttributeType::List(inner), Value::List(items)) => {
            let mut array = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                if let Some(json) = value_to_json(inner, item, &index_path(path, i))? {
                    array.push(json);
                }
            }
            Json::Array(array)
        }
        (AttributeType::Map(inner), Value::Map(map)) => {
            let mut object = Map::new();
            for (key, item) in map {
                let item_path = format!("{}[\"{}\"]", path, key);
                if let Some(json) = value_to_json(inner, item, &item_path)? {
                    object.insert(key.clone(), json);
                }
            }
            Json::Object(object)
        }
        (AttributeType::Block(block), Value::List(items)) => {
            let mut objects = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                let item_path = index_path(path, i);
                match item {
                    Value::Map(attrs) => objects.push(Json::Object(attributes_to_json(
                        &block.attributes,
                        attrs,
                        &item_path,
                    )?)),
                    other => return Err(mismatch(&item_path, attr_type, other.type_name())),
                }
            }
            if block.singular {
                if objects.len() > 1 {
                    return Err(CodecError::Attribute(AttributeError::new(
                        path,
                        TypeError::TooManyItems {
                            max: 1,
                            got: objects.len(),
                        },
                    )));
                }
                match objects.pop() {
                    Some(object) => object,
                    None => return Ok(None),
                }
            } else {
                Json::Array(objects)
            }
        }
        (expected, other) => return Err(mismatch(path, expected, other.type_name())),
    };
    Ok(Some(json))
}

// =============================================================================
// Encoding
// =============================================================================

fn json_to_attributes(
    schema: &BTreeMap<String, AttributeSchema>,
    object: &Map<String, Json>,
    path: &str,
) -> Result<AttributeMap, CodecError> {
    let mut attributes = AttributeMap::new();
    for (name, attr) in schema {
        let Some(json) = object.get(&attr.wire_name()) else {
            continue;
        };
        if let Some(value) = json_to_value(&attr.attr_type, json, &child_path(path, name))? {
            attributes.insert(name.clone(), value);
        }
    }
    Ok(attributes)
}

fn json_type_name(json: &Json) -> String {
    match json {
        Json::Null => "Null",
        Json::Bool(_) => "Bool",
        Json::Number(n) if n.is_f64() => "Float",
        Json::Number(_) => "Int",
        Json::String(_) => "String",
        Json::Array(_) => "List",
        Json::Object(_) => "Map",
    }
    .to_string()
}

fn json_to_value(
    attr_type: &AttributeType,
    json: &Json,
    path: &str,
) -> Result<Option<Value>, CodecError> {
    let value = match (attr_type.base(), json) {
        (_, Json::Null) => return Ok(None),
        (AttributeType::String | AttributeType::Enum(_), Json::String(s)) => {
            Value::String(s.clone())
        }
        (AttributeType::Int, Json::Number(n)) => match n.as_i64() {
            Some(i) => Value::Int(i),
            None => return Err(mismatch(path, attr_type, json_type_name(json))),
        },
        (AttributeType::Float, Json::Number(n)) => match n.as_f64() {
            Some(f) => Value::Float(f),
            None => return Err(mismatch(path, attr_type, json_type_name(json))),
        },
        (AttributeType::Bool, Json::Bool(b)) => Value::Bool(*b),
        (AttributeType::List(inner), Json::Array(items)) => {
            let mut values = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                if let Some(value) = json_to_value(inner, item, &index_path(path, i))? {
                    values.push(value);
                }
            }
            if values.is_empty() {
                return Ok(None);
            }
            Value::List(values)
        }
        (AttributeType::Map(inner), Json::Object(object)) => {
            let mut map = BTreeMap::new();
            for (key, item) in object {
                let item_path = format!("{}[\"{}\"]", path, key);
                if let Some(value) = json_to_value(inner, item, &item_path)? {
                    map.insert(key.clone(), value);
                }
            }
            if map.is_empty() {
                return Ok(None);
            }
            Value::Map(map)
        }
        (AttributeType::Block(block), Json::Object(object)) if block.singular => {
            Value::block(json_to_attributes(
                &block.attributes,
                object,
                &index_path(path, 0),
            )?)
        }
        (AttributeType::Block(block), Json::Array(items)) if !block.singular => {
            let mut blocks = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                let item_path = index_path(path, i);
                match item {
                    Json::Object(object) => blocks.push(Value::Map(json_to_attributes(
                        &block.attributes,
                        object,
                        &item_path,
                    )?)),
                    Json::Null => {}
                    other => return Err(mismatch(&item_path, attr_type, json_type_name(other))),
                }
            }
            if blocks.is_empty() {
                return Ok(None);
            }
            Value::List(blocks)
        }
        (expected, other) => return Err(mismatch(path, expected, json_type_name(other))),
    };
    Ok(Some(value))
}
