//! Markdown reference pages rendered from the schemas

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use baas_core::resource::Value;
use baas_core::schema::{AttributeSchema, AttributeType, ResourceSchema};

use crate::schemas::{data_source_schemas, resource_schemas};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocKind {
    Resource,
    DataSource,
}

impl DocKind {
    fn title(self) -> &'static str {
        match self {
            DocKind::Resource => "Resource",
            DocKind::DataSource => "Data Source",
        }
    }

    fn directory(self) -> &'static str {
        match self {
            DocKind::Resource => "resources",
            DocKind::DataSource => "data-sources",
        }
    }
}

fn type_label(attr_type: &AttributeType) -> String {
    match attr_type {
        AttributeType::Block(block) if block.singular => "List, Max: 1".to_string(),
        AttributeType::Block(_) => "List".to_string(),
        AttributeType::Enum(_) => "String".to_string(),
        AttributeType::Custom { base, .. } => type_label(base),
        other => other.type_name(),
    }
}

fn flags(attr: &AttributeSchema, kind: DocKind) -> String {
    let mut flags = Vec::new();
    if attr.required {
        flags.push("Required");
    } else if attr.is_configurable() {
        flags.push("Optional");
    }
    if attr.force_new && kind == DocKind::Resource {
        flags.push("Forces new resource");
    }
    if attr.sensitive {
        flags.push("Sensitive");
    }
    let label = type_label(&attr.attr_type);
    flags.push(&label);
    flags.join(", ")
}

fn default_label(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Int(i) => Some(i.to_string()),
        Value::Float(f) => Some(f.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::List(_) | Value::Map(_) => None,
    }
}

fn render_attribute(out: &mut String, attr: &AttributeSchema, kind: DocKind, depth: usize) {
    let indent = "  ".repeat(depth);
    out.push_str(&format!("{}* `{}` - ({})", indent, attr.name, flags(attr, kind)));
    if let Some(description) = &attr.description {
        out.push_str(&format!(" {}", description));
    }
    out.push('\n');

    if let AttributeType::Enum(variants) = &attr.attr_type {
        let values: Vec<String> = variants.iter().map(|v| format!("`{}`", v)).collect();
        out.push_str(&format!("{}  * Allowable values are: {}.\n", indent, values.join(", ")));
    }
    if let Some(default) = attr.default.as_ref().and_then(default_label) {
        out.push_str(&format!("{}  * Default value is `{}`.\n", indent, default));
    }
    if let AttributeType::Block(block) = &attr.attr_type {
        out.push_str(&format!(
            "{}Nested schema for **{}**:\n",
            "  ".repeat(depth + 1),
            attr.name
        ));
        for nested in block.attributes.values() {
            render_attribute(out, nested, kind, depth + 1);
        }
    }
}

/// Render the reference page of one resource or data source
pub fn render(kind: DocKind, schema: &ResourceSchema) -> String {
    let mut out = String::new();
    out.push_str(&format!("# {} ({})\n\n", schema.resource_type, kind.title()));
    if let Some(description) = &schema.description {
        out.push_str(&format!("{}\n\n", description));
    }

    let (arguments, attributes): (Vec<_>, Vec<_>) = schema
        .attributes
        .values()
        .partition(|a| a.is_configurable());

    out.push_str("## Argument Reference\n\n");
    if arguments.is_empty() {
        out.push_str(&format!(
            "This {} takes no arguments.\n",
            kind.title().to_lowercase()
        ));
    }
    for attr in arguments {
        render_attribute(&mut out, attr, kind, 0);
    }

    out.push_str("\n## Attribute Reference\n\n");
    out.push_str(&format!(
        "After your {} is read, the following attributes are exported.\n\n",
        kind.title().to_lowercase()
    ));
    out.push_str(&format!(
        "* `id` - The unique identifier of the {}.\n",
        schema.resource_type
    ));
    for attr in attributes {
        render_attribute(&mut out, attr, kind, 0);
    }
    out
}

/// File name of a reference page (e.g., "backup_recovery_protection_group.md")
pub fn file_name(schema: &ResourceSchema) -> String {
    let name = schema
        .resource_type
        .strip_prefix("ibm_")
        .unwrap_or(&schema.resource_type);
    format!("{}.md", name)
}

/// All reference pages with their kind
pub fn all_pages() -> Vec<(DocKind, ResourceSchema)> {
    resource_schemas()
        .into_iter()
        .map(|s| (DocKind::Resource, s))
        .chain(data_source_schemas().into_iter().map(|s| (DocKind::DataSource, s)))
        .collect()
}

/// Write every reference page below `dir`, returning the written paths
pub fn write_all(dir: &Path, only: Option<&str>) -> io::Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for (kind, schema) in all_pages() {
        if only.is_some_and(|name| name != schema.resource_type) {
            continue;
        }
        let target = dir.join(kind.directory());
        fs::create_dir_all(&target)?;
        let path = target.join(file_name(&schema));
        fs::write(&path, render(kind, &schema))?;
        log::debug!("wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::{connector_status, protection_group};

    #[test]
    fn renders_argument_and_attribute_sections() {
        let page = render(DocKind::Resource, &protection_group::schema());

        assert!(page.starts_with("# ibm_backup_recovery_protection_group (Resource)\n"));
        assert!(page.contains(
            "* `x_ibm_tenant_id` - (Required, Forces new resource, String) Id of the tenant"
        ));
        assert!(page.contains("  * Allowable values are: `kLow`, `kMedium`, `kHigh`."));
        assert!(page.contains("  Nested schema for **start_time**:"));
        assert!(page.contains("  * `time_zone` - (Optional, String)"));
        assert!(page.contains("    * Default value is `America/Los_Angeles`."));

        let attributes = page.split("## Attribute Reference").nth(1).unwrap();
        assert!(attributes.contains("* `group_id` - (String) Id of the protection group."));
        assert!(!attributes.contains("`policy_id`"));
    }

    #[test]
    fn data_source_without_arguments() {
        let page = render(DocKind::DataSource, &connector_status::schema());
        assert!(page.contains("This data source takes no arguments."));
        assert!(page.contains("* `registration_status` - (List, Max: 1)"));
    }

    #[test]
    fn resource_without_arguments_says_resource() {
        let schema = ResourceSchema::new("ibm_backup_recovery_marker").attribute(
            AttributeSchema::new("marker_id", AttributeType::String).computed(),
        );
        let page = render(DocKind::Resource, &schema);
        assert!(page.contains("This resource takes no arguments."));
        assert!(!page.contains("data source"));
    }

    #[test]
    fn renders_non_string_defaults() {
        let schema = ResourceSchema::new("ibm_backup_recovery_marker")
            .attribute(
                AttributeSchema::new("retries", AttributeType::Int).with_default(Value::Int(3)),
            )
            .attribute(
                AttributeSchema::new("enabled", AttributeType::Bool)
                    .with_default(Value::Bool(false)),
            );
        let page = render(DocKind::Resource, &schema);
        assert!(page.contains("* `retries` - (Optional, Int)\n  * Default value is `3`."));
        assert!(page.contains("* `enabled` - (Optional, Bool)\n  * Default value is `false`."));
    }

    #[test]
    fn writes_one_page_per_schema() {
        let dir = tempfile::tempdir().unwrap();
        let written = write_all(dir.path(), None).unwrap();
        assert_eq!(written.len(), all_pages().len());
        assert!(
            dir.path()
                .join("resources/backup_recovery_protection_group.md")
                .exists()
        );
        assert!(
            dir.path()
                .join("data-sources/backup_recovery_connector_status.md")
                .exists()
        );
    }

    #[test]
    fn writes_only_the_requested_page() {
        let dir = tempfile::tempdir().unwrap();
        let written =
            write_all(dir.path(), Some("ibm_backup_recovery_agent_upgrade_task")).unwrap();
        assert_eq!(written.len(), 1);
    }
}
