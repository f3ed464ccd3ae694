use crate::OutputFormat;
use anyhow::Result;
use gazza_airtable::AirtableClient;
use gazza_core::activity::{ActivityEntry, ActivityLog, ActivityStatus, actions};
use gazza_core::listing::DraftListing;
use gazza_core::paths;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Numbered view of a draft, so `gazza fill <n>` has something to refer to.
#[derive(Debug, serde::Serialize)]
struct DraftRow<'a> {
    index: usize,
    #[serde(flatten)]
    listing: &'a DraftListing,
}

pub fn execute(format: OutputFormat) -> Result<()> {
    let config = super::load_config()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let result = runtime.block_on(async {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(ProgressStyle::default_spinner());
        spinner.set_message("Loading drafts from Airtable...");
        spinner.enable_steady_tick(Duration::from_millis(80));

        let client = AirtableClient::new(&config.airtable)?;
        let records = client.list_drafts().await;
        spinner.finish_and_clear();
        Ok::<_, anyhow::Error>(records?)
    });
    runtime.shutdown_timeout(Duration::from_millis(100));
    let records = result?;

    let listings: Vec<DraftListing> = records.iter().map(|r| r.to_listing()).collect();

    let log = ActivityLog::new(paths::activity_log_path()?);
    log.append(ActivityEntry::now(
        actions::LOAD_AIRTABLE,
        ActivityStatus::Success,
        format!("{} bozze caricate", listings.len()),
    ))?;

    match format {
        OutputFormat::Json => output_json(&listings)?,
        OutputFormat::Table => output_table(&listings),
        OutputFormat::Pretty => output_pretty(&listings),
    }

    Ok(())
}

fn output_pretty(listings: &[DraftListing]) {
    use console::style;

    if listings.is_empty() {
        println!("No drafts waiting. Set Stato to 'Bozza' in Airtable to queue one.");
        return;
    }

    println!("\n{}", style("Draft listings").bold().cyan());
    println!("{}", style("==============").cyan());
    for (i, listing) in listings.iter().enumerate() {
        println!(
            "  {}. {}  [{}]  {} €  ({})",
            i + 1,
            style(&listing.title).bold(),
            listing.id,
            listing.price.as_deref().unwrap_or("-"),
            listing.category.as_deref().unwrap_or("-"),
        );
    }
    println!(
        "\n{} draft(s). Fill one with: gazza fill <RECORD>",
        listings.len()
    );
}

fn output_table(listings: &[DraftListing]) {
    println!("Index,Record,Title,Price,Category");
    for (i, listing) in listings.iter().enumerate() {
        println!(
            "{},{},{},{},{}",
            i + 1,
            listing.id,
            listing.title,
            listing.price.as_deref().unwrap_or(""),
            listing.category.as_deref().unwrap_or(""),
        );
    }
}

fn output_json(listings: &[DraftListing]) -> Result<()> {
    let rows: Vec<DraftRow<'_>> = listings
        .iter()
        .enumerate()
        .map(|(i, listing)| DraftRow { index: i + 1, listing })
        .collect();
    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}
