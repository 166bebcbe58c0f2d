use std::time::Duration;

use chrono::{NaiveTime, Utc};
use tokio::time;

use crate::{run_collect, CollectorConfig};

/// Runs a collection immediately, then once per day at `at` (UTC),
/// until interrupted. A failed run is logged and the loop keeps going;
/// one bad fetch must not stop the schedule.
pub async fn run_daily(config: &CollectorConfig, at: NaiveTime) -> anyhow::Result<()> {
    log::info!("Running initial collection");
    if let Err(e) = run_collect(config).await {
        log::error!("Collection failed: {e:#}");
    }

    loop {
        let wait = until_next(at);
        log::info!(
            "Next collection at {} UTC (in {}s)",
            at.format("%H:%M"),
            wait.as_secs()
        );

        tokio::select! {
            _ = time::sleep(wait) => {
                if let Err(e) = run_collect(config).await {
                    log::error!("Collection failed: {e:#}");
                }
            }
            _ = tokio::signal::ctrl_c() => {
                log::info!("Interrupted, stopping schedule");
                return Ok(());
            }
        }
    }
}

fn until_next(at: NaiveTime) -> Duration {
    let now = Utc::now();
    let today = now.date_naive().and_time(at).and_utc();
    let next = if today > now {
        today
    } else {
        today + chrono::Duration::days(1)
    };
    (next - now).to_std().unwrap_or(Duration::ZERO)
}
