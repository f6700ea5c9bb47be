//! `watch`: check at startup, then on a fixed interval

use std::future::Future;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::time::Duration;

use clap::Args;
use tokio::time::MissedTickBehavior;

use crate::settings::Settings;
use crate::ui::{self, TerminalDialog};
use crate::updater::{ReleaseFetcher, ReleaseSource, SingleFlight, UpdateCheck};

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Seconds between checks (defaults to check_interval_secs from settings)
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: Option<u64>,
}

pub fn run(args: WatchArgs, settings: Settings) -> anyhow::Result<()> {
    let interval = args
        .interval
        .map(Duration::from_secs)
        .unwrap_or_else(|| settings.check_interval());
    let (events, inbox) = ui::channel();

    let worker_settings = settings.clone();
    let worker = std::thread::Builder::new()
        .name("update-watch".to_string())
        .spawn(move || -> anyhow::Result<()> {
            let rt = tokio::runtime::Runtime::new()?;
            let fetcher = Arc::new(ReleaseFetcher::from_settings(&worker_settings)?);
            let check = UpdateCheck::new(
                SingleFlight::new(fetcher),
                worker_settings.current_version.clone(),
                events,
            );
            rt.block_on(watch_loop(Arc::new(check), interval, async {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    tracing::warn!("Failed to listen for Ctrl+C: {}", e);
                    std::future::pending::<()>().await;
                }
            }));
            Ok(())
        })?;

    let out: Box<dyn Write> = Box::new(io::stdout());
    let mut dialog = watch_dialog(out, io::stdin().lock());
    let shown = ui::run_event_loop(inbox, &mut dialog);
    tracing::debug!(shown, "Update dialog loop finished");

    worker
        .join()
        .map_err(|_| anyhow::anyhow!("update watch thread panicked"))?
}

/// Links are printed but never offered: Ctrl+C stops the watch, and a
/// pending stdin read would keep the dialog loop from ever seeing that.
fn watch_dialog<W: Write, R: BufRead>(out: W, input: R) -> TerminalDialog<W, R> {
    TerminalDialog::new(out, input, false)
}

/// Start a check on every tick until `shutdown` resolves.
///
/// Checks run as their own tasks, so a slow endpoint never delays the next
/// tick; overlapping checks share one fetch through the `SingleFlight`.
async fn watch_loop<S, F>(check: Arc<UpdateCheck<S>>, interval: Duration, shutdown: F)
where
    S: ReleaseSource + 'static,
    F: Future<Output = ()>,
{
    tracing::info!(
        interval_secs = interval.as_secs(),
        current = %check.current_version(),
        "Watching for new releases"
    );

    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let check = check.clone();
                tokio::spawn(async move {
                    check.run().await;
                });
            }
            _ = &mut shutdown => {
                tracing::info!("Stopping update watch");
                break;
            }
        }
    }
}
