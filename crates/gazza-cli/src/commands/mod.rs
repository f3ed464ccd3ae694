use anyhow::{Result, anyhow};
use gazza_airtable::AirtableRecord;
use gazza_core::config::Config;

pub mod completion;
pub mod drafts;
pub mod fill;
pub mod init;
pub mod log;
pub mod mappings;
pub mod publish;

/// Load `config.toml` from the data directory.
pub(crate) fn load_config() -> Result<Config> {
    let path = gazza_core::paths::config_path()?;
    if !path.exists() {
        return Err(anyhow!(
            "No config found at {}. Run 'gazza init' first.",
            path.display()
        ));
    }
    Ok(Config::load(&path)?)
}

/// Resolve a record argument: a record id is matched as-is, a number is a
/// 1-based position in the current drafts list.
pub(crate) fn resolve_record<'a>(
    records: &'a [AirtableRecord],
    argument: &str,
) -> Result<&'a AirtableRecord> {
    if let Ok(index) = argument.parse::<usize>() {
        if index == 0 || index > records.len() {
            return Err(anyhow!(
                "Draft {} does not exist; there are {} draft(s). Run 'gazza drafts'.",
                index,
                records.len()
            ));
        }
        return Ok(&records[index - 1]);
    }

    records
        .iter()
        .find(|r| r.id == argument)
        .ok_or_else(|| anyhow!("No draft with record id '{}'. Run 'gazza drafts'.", argument))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> AirtableRecord {
        serde_json::from_value(serde_json::json!({"id": id, "fields": {}})).unwrap()
    }

    #[test]
    fn test_resolve_by_index_is_one_based() {
        let records = vec![record("recA"), record("recB")];
        assert_eq!(resolve_record(&records, "1").unwrap().id, "recA");
        assert_eq!(resolve_record(&records, "2").unwrap().id, "recB");
        assert!(resolve_record(&records, "0").is_err());
        assert!(resolve_record(&records, "3").is_err());
    }

    #[test]
    fn test_resolve_by_record_id() {
        let records = vec![record("recA"), record("recB")];
        assert_eq!(resolve_record(&records, "recB").unwrap().id, "recB");
        let err = resolve_record(&records, "recZ").unwrap_err();
        assert!(err.to_string().contains("recZ"));
    }
}
