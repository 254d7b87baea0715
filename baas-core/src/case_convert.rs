//! Case conversion between attribute names and wire property names
//!
//! Attribute maps use snake_case (e.g., `connection_name`, `sla_minutes`).
//! The REST API and the domain structs use lowerCamelCase
//! (e.g., `connectionName`, `slaMinutes`).

use heck::{ToLowerCamelCase, ToSnakeCase};

/// Convert an attribute name to its wire property name
/// e.g., "schedule_end_time_usecs" -> "scheduleEndTimeUsecs"
pub fn to_wire_name(attribute: &str) -> String {
    attribute.to_lower_camel_case()
}

/// Convert a wire property name to its attribute name
/// e.g., "clusterFqdn" -> "cluster_fqdn"
pub fn to_attribute_name(wire: &str) -> String {
    wire.to_snake_case()
}
