//! `check`: run the update check once

use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;

use crate::settings::Settings;
use crate::ui::{self, TerminalDialog};
use crate::updater::{CheckOutcome, ReleaseFetcher, UpdateCheck};

#[derive(Debug, Default, Args)]
pub struct CheckArgs {
    /// Print the outcome as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Show the dialog without offering to open links
    #[arg(long)]
    pub no_prompt: bool,
}

#[derive(Debug, Serialize)]
struct CheckReport<'a> {
    checked_at: DateTime<Utc>,
    installed: &'a str,
    #[serde(flatten)]
    outcome: &'a CheckOutcome,
}

/// Fetch and compare on a worker thread while this thread owns the dialog
pub fn run(args: CheckArgs, settings: Settings) -> anyhow::Result<()> {
    let current_version = settings.current_version.clone();
    let (events, inbox) = ui::channel();

    let worker_settings = settings.clone();
    let worker = std::thread::Builder::new()
        .name("update-check".to_string())
        .spawn(move || -> anyhow::Result<CheckOutcome> {
            let rt = tokio::runtime::Runtime::new()?;
            let fetcher = ReleaseFetcher::from_settings(&worker_settings)?;
            let check = UpdateCheck::new(fetcher, worker_settings.current_version.clone(), events);
            Ok(rt.block_on(check.run()))
        })?;

    let open_links = settings.open_links && !args.no_prompt && !args.json;
    let mut dialog = TerminalDialog::stdio(open_links, args.json);
    ui::run_event_loop(inbox, &mut dialog);

    let outcome = worker
        .join()
        .map_err(|_| anyhow::anyhow!("update check thread panicked"))??;

    if args.json {
        let report = CheckReport {
            checked_at: Utc::now(),
            installed: &current_version,
            outcome: &outcome,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        match &outcome {
            CheckOutcome::UpToDate { latest } => {
                println!("Up to date ({} installed, latest is {})", current_version, latest);
            }
            CheckOutcome::FetchFailed => {
                println!("Could not check for updates");
            }
            CheckOutcome::UpdateAvailable(_) => {}
        }
    }

    Ok(())
}
