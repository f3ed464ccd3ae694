use anyhow::Result;
use gazza_airtable::AirtableClient;
use gazza_core::activity::{ActivityEntry, ActivityLog, ActivityStatus, actions};
use gazza_core::paths;
use std::time::Duration;

pub fn execute(record_arg: &str) -> Result<()> {
    let config = super::load_config()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let result = runtime.block_on(async {
        let client = AirtableClient::new(&config.airtable)?;
        let records = client.list_drafts().await?;
        let record = super::resolve_record(&records, record_arg)?;
        let listing = record.to_listing();

        println!("📤 Marking '{}' as published...", listing.title);
        client.mark_published(&record.id).await?;

        let log = ActivityLog::new(paths::activity_log_path()?);
        log.append(ActivityEntry::now(
            actions::UPDATE_STATUS,
            ActivityStatus::Success,
            format!("{}: Bozza -> Pubblicato", listing.title),
        ))?;

        println!("✅ Record {} updated", record.id);
        Ok(())
    });

    runtime.shutdown_timeout(Duration::from_millis(100));
    result
}
