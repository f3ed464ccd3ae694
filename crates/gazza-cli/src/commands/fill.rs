//! Fill a marketplace publishing form from a draft listing.
//!
//! The default flow launches Chrome on the marketplace's publishing page,
//! fills the form, and then waits for a key so the seller can review the
//! result before anything is published. `--port` attaches to a Chrome that
//! is already running instead of launching one, `--no-wait` exits straight
//! after the fill.

use crate::OutputFormat;
use anyhow::{Result, anyhow};
use gazza_airtable::AirtableClient;
use gazza_browser::{BrowserSession, ChromeFinder, ChromeLauncher, FormPage, ProfileDir};
use gazza_core::activity::{ActivityEntry, ActivityLog, ActivityStatus, actions};
use gazza_core::mappings::CategoryMappings;
use gazza_core::paths;
use gazza_core::protocol::CompileRequest;
use gazza_fill::{CompileReport, FieldOutcome, FillPolicy, FormCompiler, profile_for};
use std::path::PathBuf;
use std::time::Duration;

/// Upper bound for the initial page load.
const PAGE_LOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Kill a process by PID (cross-platform)
fn kill_process_by_pid(pid: u32) {
    #[cfg(unix)]
    {
        use std::process::Command;
        // Use kill command to send SIGTERM
        let _ = Command::new("kill").arg(pid.to_string()).output();
    }

    #[cfg(windows)]
    {
        use std::process::Command;
        let _ = Command::new("taskkill")
            .args(["/PID", &pid.to_string(), "/F"])
            .output();
    }
}

#[allow(clippy::too_many_arguments)]
pub fn execute(
    record_arg: &str,
    marketplace: &str,
    port: Option<u16>,
    chrome_path: Option<PathBuf>,
    temp_profile: bool,
    url: Option<String>,
    publish: bool,
    no_wait: bool,
    format: OutputFormat,
) -> Result<()> {
    // The marketplace must resolve before config, network, or Chrome are
    // touched at all.
    let profile = profile_for(marketplace)?;

    let config = super::load_config()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let result = runtime.block_on(async {
        // Step 1: Find the draft
        println!("📥 Loading drafts from Airtable...");
        let client = AirtableClient::new(&config.airtable)?;
        let records = client.list_drafts().await?;
        let record = super::resolve_record(&records, record_arg)?;
        let listing = record.to_listing();
        let record_id = record.id.clone();
        println!("✅ Draft: {} [{}]", listing.title, record_id);

        let log = ActivityLog::new(paths::activity_log_path()?);
        let start_url = url.clone().unwrap_or_else(|| profile.form_url.to_string());

        // Step 2: Attach to a running Chrome, or launch one
        let mut profile_guard: Option<ProfileDir> = None;
        let (session, chrome_process) = match port {
            Some(port) => {
                println!("🔌 Attaching to Chrome on port {port}...");
                (BrowserSession::connect(port).await?, None)
            }
            None => {
                println!("🔍 Locating Chrome...");
                let finder =
                    ChromeFinder::new(chrome_path.or_else(|| config.browser.chrome_path.clone()));
                let chrome_binary = finder.find()?;
                println!("✅ Found Chrome at: {}", chrome_binary.display());

                let profile_dir = if temp_profile {
                    println!("📁 Using temporary profile");
                    ProfileDir::temporary()?
                } else {
                    let path = match &config.browser.profile_dir {
                        Some(dir) => dir.clone(),
                        None => paths::profile_dir()?,
                    };
                    println!("📁 Using profile: {}", path.display());
                    ProfileDir::persistent(path)?
                };

                let launcher = ChromeLauncher::new(
                    chrome_binary,
                    profile_dir.path().to_path_buf(),
                    Some(start_url.clone()),
                )
                .with_port(config.browser.debug_port);

                println!("🚀 Launching Chrome...");
                let process = launcher.launch()?;
                println!("✅ Chrome started");

                let session = BrowserSession::connect(launcher.debugging_port()).await?;
                profile_guard = Some(profile_dir);
                (session, Some(process))
            }
        };

        // Step 3: Find the publishing tab, or open one
        let mut patterns: Vec<&str> = profile.host_patterns.to_vec();
        if let Some(override_url) = url.as_deref() {
            patterns.push(override_url);
        }

        // The tab opened at launch can take a moment to register with
        // DevTools.
        let mut found = None;
        for _ in 0..10 {
            if let Some(page) = session.find_tab(&patterns).await? {
                found = Some(page);
                break;
            }
            tokio::time::sleep(Duration::from_millis(300)).await;
        }
        let page = match found {
            Some(page) => {
                println!("📍 Reusing open tab");
                page
            }
            None => {
                println!("📍 Opening {start_url}");
                session.open_tab(&start_url).await?
            }
        };

        let form = FormPage::new(page, Duration::from_millis(config.fill.eval_timeout_ms));
        println!("⏳ Waiting for the page...");
        form.wait_ready(PAGE_LOAD_TIMEOUT).await?;

        // Step 4: Compile the form
        println!("✍️  Compiling the form...");
        let request = CompileRequest {
            marketplace: profile.marketplace.id().to_string(),
            fields: listing.field_map(),
        };
        let compiler = FormCompiler::new(&form, FillPolicy::from(&config.fill));
        let report = compiler.compile(&request).await;

        // Step 5: Log and report
        let (status, details) = match &report.result.error {
            Some(error) => (ActivityStatus::Error, format!("{}: {}", listing.title, error)),
            None => (
                ActivityStatus::Success,
                format!(
                    "{}: {} campi compilati, {} da rivedere",
                    listing.title,
                    report.applied_count(),
                    report.skipped_count()
                ),
            ),
        };
        log.append(ActivityEntry::now(actions::COMPILE_FORM, status, details))?;

        render_report(&report, format)?;

        if !report.result.success {
            session.detach();
            return Err(anyhow!(
                "Fill failed: {}",
                report.result.error.as_deref().unwrap_or("unknown error")
            ));
        }

        if let Some(category) = &listing.category {
            let mappings = CategoryMappings::load(&paths::mappings_path()?)?;
            if let Some(fields) = mappings.suggested_fields(category) {
                println!("💡 Typical fields for '{}': {}", category, fields.join(", "));
            }
        }

        // Step 6: Optional auto-publish after a successful fill
        if publish {
            println!("📤 Marking as published in Airtable...");
            client.mark_published(&record_id).await?;
            log.append(ActivityEntry::now(
                actions::UPDATE_STATUS,
                ActivityStatus::Success,
                format!("{}: Bozza -> Pubblicato", listing.title),
            ))?;
            println!("✅ Record updated");
        }

        // Step 7: Hand the tab back to the seller
        if no_wait {
            session.detach();
            println!("👋 Leaving Chrome open. Review the form and publish when ready.");
            return Ok(());
        }
        let Some(mut process) = chrome_process else {
            session.detach();
            println!("👋 Review the form in the attached Chrome when ready.");
            return Ok(());
        };

        println!();
        println!("What would you like to do?");
        if !publish {
            println!("  p) Mark this draft as published in Airtable");
        }
        println!("  k) Close Chrome");
        println!("  any other key) Leave Chrome open and exit");
        println!();
        println!("Press a key when ready, or close Chrome yourself...");

        use console::Term;

        let chrome_pid = process.id();

        // Spawn user input task (non-blocking read)
        let input_task = tokio::task::spawn_blocking(move || {
            let term = Term::stdout();
            term.read_char()
        });

        // Spawn Chrome wait task (wrap in Option for conditional consumption)
        let wait_task = tokio::task::spawn_blocking(move || process.wait());
        let mut wait_task = Some(wait_task);

        enum Action {
            ChromeExited,
            Publish,
            KillChrome,
            LeaveOpen,
        }

        let action = tokio::select! {
            // Chrome exits naturally
            result = wait_task.as_mut().unwrap() => {
                let status = result??;
                println!("\n🛑 Chrome closed (exit code: {})", status.code().unwrap_or(-1));
                wait_task = None; // Task consumed
                Action::ChromeExited
            }

            // User presses a key
            result = input_task => {
                let key = result??;
                match key.to_lowercase().next().unwrap_or(' ') {
                    'p' => Action::Publish,
                    'k' => Action::KillChrome,
                    _ => Action::LeaveOpen,
                }
            }
        };

        match action {
            Action::Publish => {
                if publish {
                    println!("\nℹ️  Already marked as published.");
                } else {
                    println!("\n📤 Marking as published in Airtable...");
                    client.mark_published(&record_id).await?;
                    log.append(ActivityEntry::now(
                        actions::UPDATE_STATUS,
                        ActivityStatus::Success,
                        format!("{}: Bozza -> Pubblicato", listing.title),
                    ))?;
                    println!("✅ Record updated");
                }
                if let Some(task) = wait_task.take() {
                    task.abort();
                }
                println!("👋 Leaving Chrome open.");
            }
            Action::KillChrome => {
                println!("\n🛑 Closing Chrome...");
                kill_process_by_pid(chrome_pid);
                if let Some(task) = wait_task.take() {
                    let _ = task.await;
                }
                println!("✅ Chrome closed");
            }
            Action::LeaveOpen => {
                if let Some(task) = wait_task.take() {
                    task.abort();
                }
                println!("👋 Leaving Chrome open. Review the form and publish when ready.");
            }
            Action::ChromeExited => {}
        }

        session.detach();
        drop(profile_guard);
        Ok(())
    });

    // Explicitly shutdown runtime with timeout to prevent hanging on blocking tasks
    runtime.shutdown_timeout(Duration::from_millis(100));

    result
}

fn render_report(report: &CompileReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
        OutputFormat::Table => {
            println!("Field,Outcome");
            for field in &report.fields {
                println!("{},{}", field.field, outcome_label(&field.outcome));
            }
        }
        OutputFormat::Pretty => {
            use console::style;

            println!("\n{}", style("Fill report").bold().cyan());
            println!("{}", style("===========").cyan());
            for field in &report.fields {
                let label = match &field.outcome {
                    FieldOutcome::Filled { verified: true } => style("filled".to_string()).green(),
                    FieldOutcome::Filled { verified: false } => {
                        style("filled (unverified)".to_string()).yellow()
                    }
                    FieldOutcome::Selected { label } => {
                        style(format!("selected '{label}'")).green()
                    }
                    FieldOutcome::AlreadySet { label } => {
                        style(format!("already '{label}'")).dim()
                    }
                    FieldOutcome::NotProvided => style("-".to_string()).dim(),
                    FieldOutcome::ElementNotFound => style("element not found".to_string()).red(),
                    FieldOutcome::NoMatchingOption => {
                        style("no matching option".to_string()).yellow()
                    }
                    FieldOutcome::WidgetLeftOpen => {
                        style("dropdown left open, pick by hand".to_string()).yellow()
                    }
                };
                println!("  {:<12} {}", field.field, label);
            }
            println!(
                "\n{} filled, {} to review",
                report.applied_count(),
                report.skipped_count()
            );
        }
    }
    Ok(())
}

fn outcome_label(outcome: &FieldOutcome) -> &'static str {
    match outcome {
        FieldOutcome::Filled { verified: true } => "filled",
        FieldOutcome::Filled { verified: false } => "filled-unverified",
        FieldOutcome::Selected { .. } => "selected",
        FieldOutcome::AlreadySet { .. } => "already-set",
        FieldOutcome::NotProvided => "not-provided",
        FieldOutcome::ElementNotFound => "element-not-found",
        FieldOutcome::NoMatchingOption => "no-matching-option",
        FieldOutcome::WidgetLeftOpen => "widget-left-open",
    }
}
