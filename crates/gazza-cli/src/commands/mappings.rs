use crate::OutputFormat;
use anyhow::{Result, anyhow};
use gazza_core::activity::{ActivityEntry, ActivityLog, ActivityStatus, actions};
use gazza_core::listing::ListingField;
use gazza_core::mappings::CategoryMappings;
use gazza_core::paths;

pub fn list(format: OutputFormat) -> Result<()> {
    let mappings = CategoryMappings::load(&paths::mappings_path()?)?;

    match format {
        OutputFormat::Json => {
            let map: std::collections::BTreeMap<&String, &Vec<String>> =
                mappings.iter().collect();
            println!("{}", serde_json::to_string_pretty(&map)?);
        }
        _ => {
            use console::style;

            println!("\n{}", style("Category mappings").bold().cyan());
            println!("{}", style("=================").cyan());
            for (category, fields) in mappings.iter() {
                println!("  {:<16} {}", category, fields.join(", "));
            }
            println!("\n{} mapping(s)", mappings.len());
        }
    }
    Ok(())
}

pub fn add(name: &str, fields: Vec<String>) -> Result<()> {
    let fields: Vec<String> = fields
        .into_iter()
        .map(|f| f.trim().to_string())
        .filter(|f| !f.is_empty())
        .collect();
    if fields.is_empty() {
        return Err(anyhow!("--fields needs at least one field name"));
    }
    for field in &fields {
        if ListingField::from_key(field).is_err() {
            return Err(anyhow!(
                "Unknown field '{}'. Valid fields: {}",
                field,
                ListingField::ORDER.map(|f| f.key()).join(", ")
            ));
        }
    }

    paths::ensure_data_dir()?;
    let path = paths::mappings_path()?;
    let mut mappings = CategoryMappings::load(&path)?;
    mappings.set(name, fields.clone());
    mappings.save(&path)?;

    let log = ActivityLog::new(paths::activity_log_path()?);
    log.append(ActivityEntry::now(
        actions::ADD_CATEGORY,
        ActivityStatus::Success,
        format!("{}: {}", name, fields.join(", ")),
    ))?;

    println!("✅ Mapping '{}' -> {}", name, fields.join(", "));
    Ok(())
}

pub fn remove(name: &str) -> Result<()> {
    paths::ensure_data_dir()?;
    let path = paths::mappings_path()?;
    let mut mappings = CategoryMappings::load(&path)?;

    if !mappings.remove(name) {
        return Err(anyhow!("No mapping named '{}'", name));
    }
    mappings.save(&path)?;

    let log = ActivityLog::new(paths::activity_log_path()?);
    log.append(ActivityEntry::now(
        actions::REMOVE_CATEGORY,
        ActivityStatus::Success,
        name,
    ))?;

    println!("✅ Mapping '{}' removed", name);
    Ok(())
}
