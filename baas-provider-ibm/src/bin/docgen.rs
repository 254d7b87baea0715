//! Reference documentation generator
//!
//! Renders the Markdown reference page of every resource and data source.
//!
//! Usage:
//!   # Print one page to stdout
//!   baas-docgen --type ibm_backup_recovery_protection_group
//!
//!   # Write all pages below docs/
//!   baas-docgen --out-dir docs

use std::path::PathBuf;

use anyhow::{Context, Result};
use baas_provider_ibm::docs;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "baas-docgen")]
#[command(about = "Generate Markdown reference pages for the Backup & Recovery provider")]
struct Args {
    /// Only render this resource or data source type
    #[arg(long = "type")]
    type_name: Option<String>,

    /// Output directory (writes to stdout if not specified)
    #[arg(long, short)]
    out_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if let Some(dir) = &args.out_dir {
        let written = docs::write_all(dir, args.type_name.as_deref())
            .with_context(|| format!("Failed to write to: {}", dir.display()))?;
        if written.is_empty()
            && let Some(name) = &args.type_name
        {
            anyhow::bail!("Unknown type: {}", name);
        }
        for path in written {
            eprintln!("Generated: {}", path.display());
        }
        return Ok(());
    }

    let mut found = false;
    for (kind, schema) in docs::all_pages() {
        if args
            .type_name
            .as_deref()
            .is_some_and(|name| name != schema.resource_type)
        {
            continue;
        }
        found = true;
        println!("{}", docs::render(kind, &schema));
    }
    if !found && let Some(name) = &args.type_name {
        anyhow::bail!("Unknown type: {}", name);
    }

    Ok(())
}
