use std::path::{Path, PathBuf};

use fs_err as fs;

use crate::dashboard::{AbsencePolicy, DashboardData, SummaryArtifact};
use crate::error::SnapshotError;
use crate::model::Batch;

pub const DETAIL_FILE: &str = "api_data.json";
pub const SUMMARY_FILE: &str = "api_summary.json";

/// Publishes the two JSON artifacts for a collection run. Only ever
/// writes its own artifact files; everything else in the output
/// directory (hand-authored dashboard files included) is left alone.
#[derive(Debug, Clone)]
pub struct SnapshotWriter {
    out_dir: PathBuf,
    policy: AbsencePolicy,
    period_days: u32,
}

impl SnapshotWriter {
    pub fn new(out_dir: impl Into<PathBuf>, policy: AbsencePolicy, period_days: u32) -> Self {
        Self {
            out_dir: out_dir.into(),
            policy,
            period_days,
        }
    }

    pub fn detail_path(&self) -> PathBuf {
        self.out_dir.join(DETAIL_FILE)
    }

    pub fn summary_path(&self) -> PathBuf {
        self.out_dir.join(SUMMARY_FILE)
    }

    /// Folds the batch into the existing history and republishes both
    /// artifacts. Both payloads are fully assembled and encoded before
    /// the first byte hits disk, and each file is replaced by rename,
    /// so a concurrent reader sees either the old or the new snapshot.
    pub fn publish(&self, batch: &Batch) -> Result<DashboardData, SnapshotError> {
        fs::create_dir_all(&self.out_dir)?;

        let mut detail = self.load_existing();
        detail.data_period_days = self.period_days;
        detail.apply_batch(batch, self.policy);
        let summary = SummaryArtifact::of(&detail);

        let detail_json = serde_json::to_vec_pretty(&detail)?;
        let summary_json = serde_json::to_vec_pretty(&summary)?;

        write_replace(&self.detail_path(), &detail_json)?;
        write_replace(&self.summary_path(), &summary_json)?;

        Ok(detail)
    }

    // A missing or unreadable detail artifact starts the history over
    // rather than failing the run; the warning is the operator's cue.
    fn load_existing(&self) -> DashboardData {
        let path = self.detail_path();
        if !path.exists() {
            return DashboardData::empty(self.period_days);
        }
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("Couldn't reuse existing snapshot: {e}");
                return DashboardData::empty(self.period_days);
            }
        };
        match serde_json::from_str(&raw) {
            Ok(data) => data,
            Err(e) => {
                log::warn!(
                    "Couldn't reuse existing snapshot {}: {e}",
                    path.display()
                );
                DashboardData::empty(self.period_days)
            }
        }
    }
}

fn write_replace(path: &Path, bytes: &[u8]) -> Result<(), SnapshotError> {
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, bytes)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
