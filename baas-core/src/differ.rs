//! Differ - Find the attributes an update has to carry
//!
//! Plan computation itself belongs to the host. The dispatcher only needs to
//! know which configured attributes differ from the recorded state, so that
//! patch-style endpoints receive the changed fields alone.

use std::collections::BTreeMap;

use crate::resource::{AttributeMap, Value};
use crate::schema::{AttributeSchema, AttributeType, NestedBlock, ResourceSchema};

/// Find changed attributes between desired configuration and current state
///
/// Computed-only attributes never count. An optional+computed attribute that
/// is absent from the configuration keeps its remote value and is not a change.
/// Blocks are compared field by field with the same rules, after filling in
/// the declared defaults.
pub fn changed_attributes(
    schema: &ResourceSchema,
    desired: &AttributeMap,
    current: &AttributeMap,
) -> Vec<String> {
    schema
        .attributes
        .iter()
        .filter(|(_, attr)| attr.is_configurable())
        .filter(|(name, attr)| !unchanged(attr, desired.get(*name), current.get(*name)))
        .map(|(name, _)| name.clone())
        .collect()
}

fn unchanged(attr: &AttributeSchema, desired: Option<&Value>, current: Option<&Value>) -> bool {
    match (desired.or(attr.default.as_ref()), current) {
        (Some(d), Some(c)) => value_unchanged(&attr.attr_type, d, c),
        (Some(_), None) => desired.is_none(),
        (None, None) => true,
        (None, Some(_)) => attr.computed,
    }
}

fn value_unchanged(attr_type: &AttributeType, desired: &Value, current: &Value) -> bool {
    match (attr_type.base(), desired, current) {
        (AttributeType::Block(block), Value::List(d), Value::List(c)) => {
            d.len() == c.len()
                && d.iter().zip(c).all(|pair| match pair {
                    (Value::Map(d), Value::Map(c)) => block_unchanged(block, d, c),
                    (d, c) => d == c,
                })
        }
        _ => desired == current,
    }
}

fn block_unchanged(
    block: &NestedBlock,
    desired: &BTreeMap<String, Value>,
    current: &BTreeMap<String, Value>,
) -> bool {
    block
        .attributes
        .iter()
        .all(|(name, attr)| unchanged(attr, desired.get(name), current.get(name)))
}

/// Subset of `desired` restricted to the named attributes
pub fn select(desired: &AttributeMap, names: &[String]) -> AttributeMap {
    names
        .iter()
        .filter_map(|name| desired.get(name).map(|v| (name.clone(), v.clone())))
        .collect()
}
