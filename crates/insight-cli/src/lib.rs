use std::path::PathBuf;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use insight_crawler::{fetch_listing, parse_listing, FetchConfig};
use insight_snapshot::{AbsencePolicy, Batch, SnapshotWriter};

pub mod schedule;

/// Whole-pipeline configuration, loadable from YAML with per-flag
/// overrides applied by the CLI.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectorConfig {
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub snapshot: SnapshotConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotConfig {
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,

    #[serde(default)]
    pub absence_policy: AbsencePolicy,

    #[serde(default = "default_period_days")]
    pub period_days: u32,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            out_dir: default_out_dir(),
            absence_policy: AbsencePolicy::default(),
            period_days: default_period_days(),
        }
    }
}

fn default_out_dir() -> PathBuf {
    PathBuf::from("docs")
}

fn default_period_days() -> u32 {
    365
}

/// What one collection run published, for logging and exit reporting.
#[derive(Debug)]
pub struct CollectReport {
    pub total_sites: usize,
    pub gg_poker_sites: usize,
    pub latest_total_players: u64,
    pub detail_path: PathBuf,
}

/// Runs one full fetch → parse → aggregate → publish pass. Nothing is
/// written unless every earlier stage succeeded, so a failed run leaves
/// the previous snapshot authoritative.
pub async fn run_collect(config: &CollectorConfig) -> anyhow::Result<CollectReport> {
    let started = Utc::now();
    log::info!("Collecting traffic data from {}", config.fetch.source_url);

    let page = fetch_listing(&config.fetch).await?;
    let rows = parse_listing(&page)?;
    log::info!("Parsed {} listing rows", rows.len());

    let batch = Batch::collect(rows, started);
    let writer = SnapshotWriter::new(
        &config.snapshot.out_dir,
        config.snapshot.absence_policy,
        config.snapshot.period_days,
    );
    let detail = writer.publish(&batch)?;

    log::info!(
        "Published {} sites ({} GG network, {} players online) to {}",
        detail.summary.total_sites,
        detail.summary.gg_poker_sites,
        detail.summary.latest_total_players,
        writer.detail_path().display()
    );

    Ok(CollectReport {
        total_sites: detail.summary.total_sites,
        gg_poker_sites: detail.summary.gg_poker_sites,
        latest_total_players: detail.summary.latest_total_players,
        detail_path: writer.detail_path(),
    })
}
