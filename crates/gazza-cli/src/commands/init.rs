use anyhow::{Result, anyhow};
use gazza_core::config::DEFAULT_CONFIG;
use gazza_core::mappings::CategoryMappings;
use gazza_core::paths;

pub fn execute(force: bool) -> Result<()> {
    let data_dir = paths::ensure_data_dir()?;
    println!("📁 Data directory: {}", data_dir.display());

    let config_path = paths::config_path()?;
    if config_path.exists() && !force {
        return Err(anyhow!(
            "{} already exists. Re-run with --force to overwrite it.",
            config_path.display()
        ));
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)?;
    println!("✅ Wrote starter config: {}", config_path.display());

    let mappings_path = paths::mappings_path()?;
    if !mappings_path.exists() {
        CategoryMappings::defaults().save(&mappings_path)?;
        println!("✅ Seeded category mappings: {}", mappings_path.display());
    }

    println!();
    println!("Next steps:");
    println!("  1. Set AIRTABLE_API_KEY in your environment");
    println!("  2. Fill in base_id in {}", config_path.display());
    println!("  3. Run: gazza drafts");

    Ok(())
}
