//! Identifier helpers and value validators

use std::sync::LazyLock;

use baas_core::provider::{ProviderError, ProviderResult};
use baas_core::resource::Value;
use regex::Regex;

/// Separator between tenant and remote id in composite identifiers
pub const ID_SEPARATOR: &str = "::";

static PROTECTION_GROUP_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+:\d+:\d+$").expect("valid regex"));

static TENANT_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_\-]*/?$").expect("valid regex"));

/// Join tenant and remote id into a persistent identifier
/// (e.g., "jhxqx715r9/" + "6145" -> "jhxqx715r9/::6145")
pub fn compose_id(tenant: &str, id: &str) -> String {
    format!("{}{}{}", tenant, ID_SEPARATOR, id)
}

/// Split an identifier produced by [`compose_id`]
pub fn split_id(identifier: &str) -> ProviderResult<(String, String)> {
    match identifier.split_once(ID_SEPARATOR) {
        Some((tenant, id)) if !tenant.is_empty() && !id.is_empty() => {
            Ok((tenant.to_string(), id.to_string()))
        }
        _ => Err(ProviderError::new(format!(
            "invalid identifier {:?}, expected <tenant>{}<id>",
            identifier, ID_SEPARATOR
        ))),
    }
}

/// Identifier of a data source read, derived from its query
/// (e.g., "tenant/::connections?connection_ids=1,2")
pub fn query_id(tenant: &str, collection: &str, filters: &[(&str, Vec<String>)]) -> String {
    let query: Vec<String> = filters
        .iter()
        .filter(|(_, values)| !values.is_empty())
        .map(|(name, values)| format!("{}={}", name, values.join(",")))
        .collect();
    if query.is_empty() {
        compose_id(tenant, collection)
    } else {
        compose_id(tenant, &format!("{}?{}", collection, query.join("&")))
    }
}

/// Validate a tenant id (e.g., "jhxqx715r9/")
pub fn validate_tenant_id(value: &Value) -> Result<(), String> {
    match value {
        Value::String(s) if TENANT_ID.is_match(s) => Ok(()),
        Value::String(s) => Err(format!("Invalid tenant id '{}'", s)),
        _ => Err("Expected string".to_string()),
    }
}

/// Validate a cluster-scoped id such as a policy or protection group id
/// (e.g., "5174348914:1716965012345:42")
pub fn validate_cluster_id(value: &Value) -> Result<(), String> {
    match value {
        Value::String(s) if PROTECTION_GROUP_ID.is_match(s) => Ok(()),
        Value::String(s) => Err(format!(
            "Invalid id '{}', expected <clusterId>:<incarnationId>:<id>",
            s
        )),
        _ => Err("Expected string".to_string()),
    }
}
