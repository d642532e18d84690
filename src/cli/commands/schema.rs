//! Implementation of the `stagegate schema` commands.

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::display::table::{list_table, render_list};
use crate::domain::models::schema_templates::DEFAULT_CONTRACT_VERSION;
use crate::domain::models::Config;

/// Arguments for `stagegate schema show`.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Contract type, e.g. project_manager_input
    pub contract_type: String,

    /// Contract version
    #[arg(long, default_value = DEFAULT_CONTRACT_VERSION)]
    pub version: String,
}

/// Run `stagegate schema list`.
pub async fn execute_list(config: &Config, json: bool) -> Result<()> {
    let registry = super::load_registry(config).await?;

    let mut schemas: Vec<_> = registry.iter().map(|c| &c.schema).collect();
    schemas.sort_by(|a, b| {
        (a.contract_type.as_str(), a.contract_version.as_str())
            .cmp(&(b.contract_type.as_str(), b.contract_version.as_str()))
    });

    if json {
        println!("{}", serde_json::to_string_pretty(&schemas)?);
        return Ok(());
    }

    let mut table = list_table(&["type", "version", "receiver", "fields", "closed"]);
    for schema in &schemas {
        table.add_row(vec![
            schema.contract_type.clone(),
            schema.contract_version.clone(),
            schema.receiving_role.to_string(),
            schema.fields.len().to_string(),
            schema.closed.to_string(),
        ]);
    }
    println!("{}", render_list("schema", &table, schemas.len()));
    Ok(())
}

/// Run `stagegate schema show`.
pub async fn execute_show(args: ShowArgs, config: &Config, json: bool) -> Result<()> {
    let registry = super::load_registry(config).await?;
    let compiled = registry
        .resolve(&args.contract_type, &args.version)
        .context("schema not found")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&compiled.schema)?);
    } else {
        print!("{}", serde_yaml::to_string(&compiled.schema)?);
    }
    Ok(())
}
