use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use chrono::Utc;
use fs_err as fs;
use lazy_static::lazy_static;
use serde_json::Map;

use crate::dashboard::{DashboardData, SiteHistory, SiteSeries};
use crate::error::ReadError;
use crate::model::{Category, Summary};

/// Client-side time limit for one dashboard load.
pub const READ_TIMEOUT: Duration = Duration::from_secs(5);

/// Name of the placeholder entry shown when live data is unavailable.
pub const DEMO_SITE: &str = "Demo Mode";

lazy_static! {
    static ref HTTP_CLI: reqwest::Client = reqwest::ClientBuilder::new()
        .gzip(true)
        .deflate(true)
        .build()
        .unwrap();
}

/// What a dashboard load produced: always renderable data, plus the
/// reason it is demo data when the live artifact couldn't be used.
#[derive(Debug)]
pub struct DashboardFeed {
    pub data: DashboardData,
    pub degraded: Option<ReadError>,
}

impl DashboardFeed {
    pub fn is_live(&self) -> bool {
        self.degraded.is_none()
    }
}

/// Fetches the detail artifact over HTTP. One attempt, 5s limit; any
/// failure degrades to the demo payload instead of propagating, so the
/// dashboard always has something to render.
pub async fn fetch_dashboard(url: &str) -> DashboardFeed {
    fetch_dashboard_with_timeout(url, READ_TIMEOUT).await
}

pub async fn fetch_dashboard_with_timeout(url: &str, timeout: Duration) -> DashboardFeed {
    match try_fetch(url, timeout).await {
        Ok(data) => DashboardFeed {
            data,
            degraded: None,
        },
        Err(e) => {
            log::warn!("Falling back to demo data: {e}");
            DashboardFeed {
                data: demo_data(),
                degraded: Some(e),
            }
        }
    }
}

/// Same contract as [`fetch_dashboard`] for a local artifact file.
pub fn load_dashboard_file(path: impl AsRef<Path>) -> DashboardFeed {
    match try_load(path.as_ref()) {
        Ok(data) => DashboardFeed {
            data,
            degraded: None,
        },
        Err(e) => {
            log::warn!("Falling back to demo data: {e}");
            DashboardFeed {
                data: demo_data(),
                degraded: Some(e),
            }
        }
    }
}

async fn try_fetch(url: &str, timeout: Duration) -> Result<DashboardData, ReadError> {
    let resp = HTTP_CLI.get(url).timeout(timeout).send().await?;
    let status = resp.status();
    if !status.is_success() {
        return Err(ReadError::Status(status));
    }
    Ok(resp.json().await?)
}

fn try_load(path: &Path) -> Result<DashboardData, ReadError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// A single all-zero entry, clearly labeled, so a broken feed can't be
/// mistaken for real zero-traffic numbers.
pub fn demo_data() -> DashboardData {
    let now = Utc::now();
    let today = now.format("%Y-%m-%d").to_string();

    let mut sites = BTreeMap::new();
    sites.insert(
        DEMO_SITE.to_string(),
        SiteHistory {
            name: DEMO_SITE.to_string(),
            category: Category::Competitor,
            data: SiteSeries {
                dates: vec![today.clone()],
                players_online: vec![0],
                cash_players: vec![0],
                peak_24h: vec![0],
                seven_day_avg: vec![0],
            },
            extra: Map::new(),
        },
    );

    DashboardData {
        last_updated: now.to_rfc3339(),
        data_period_days: 0,
        sites,
        dates: vec![today],
        summary: Summary {
            total_sites: 1,
            gg_poker_sites: 0,
            latest_total_players: 0,
            data_points: 1,
        },
        extra: Map::new(),
    }
}
