use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::model::{Batch, Category, Summary};

/// What to do with a site that has history but is missing from the
/// current run's listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum AbsencePolicy {
    /// Repeat the site's last recorded values under the new date.
    CarryForward,
    /// Record nothing; the site's date array simply lacks the date.
    #[default]
    Gap,
    /// Remove the site and its history from the artifact.
    Drop,
}

/// Parallel metric arrays, one slot per recorded collection date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteSeries {
    #[serde(default)]
    pub dates: Vec<String>,
    #[serde(default)]
    pub players_online: Vec<u32>,
    #[serde(default)]
    pub cash_players: Vec<u32>,
    #[serde(default)]
    pub peak_24h: Vec<u32>,
    #[serde(default)]
    pub seven_day_avg: Vec<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteHistory {
    pub name: String,
    pub category: Category,
    #[serde(default)]
    pub data: SiteSeries,
    // Keys we don't own survive a rewrite.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The detail artifact (`api_data.json`): full per-site time series
/// plus the latest run's summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardData {
    #[serde(default)]
    pub last_updated: String,
    #[serde(default)]
    pub data_period_days: u32,
    #[serde(default)]
    pub sites: BTreeMap<String, SiteHistory>,
    #[serde(default)]
    pub dates: Vec<String>,
    #[serde(default)]
    pub summary: Summary,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DashboardData {
    pub fn empty(period_days: u32) -> Self {
        Self {
            last_updated: String::new(),
            data_period_days: period_days,
            sites: BTreeMap::new(),
            dates: Vec::new(),
            summary: Summary::default(),
            extra: Map::new(),
        }
    }

    /// Folds one collection run into the history: appends a slot per
    /// sampled site for the batch's date, applies the absence policy to
    /// sites that stayed away, and replaces the summary block with the
    /// batch's aggregates. Re-applying a batch for an already recorded
    /// date changes nothing.
    pub fn apply_batch(&mut self, batch: &Batch, policy: AbsencePolicy) {
        let date = batch.collection_date();

        for sample in &batch.samples {
            let history = self
                .sites
                .entry(sample.name.clone())
                .or_insert_with(|| SiteHistory {
                    name: sample.name.clone(),
                    category: sample.category,
                    data: SiteSeries::default(),
                    extra: Map::new(),
                });
            history.category = sample.category;

            if history.data.dates.iter().any(|d| d == &date) {
                continue;
            }
            history.data.dates.push(date.clone());
            history.data.players_online.push(sample.players_online);
            history.data.cash_players.push(sample.cash_players);
            history.data.peak_24h.push(sample.peak_24h);
            history.data.seven_day_avg.push(sample.seven_day_avg);
        }

        let present: HashSet<&str> = batch.samples.iter().map(|s| s.name.as_str()).collect();
        match policy {
            AbsencePolicy::Gap => {}
            AbsencePolicy::CarryForward => {
                for (name, history) in self.sites.iter_mut() {
                    if present.contains(name.as_str()) {
                        continue;
                    }
                    let series = &mut history.data;
                    if series.dates.is_empty() || series.dates.iter().any(|d| d == &date) {
                        continue;
                    }
                    series.dates.push(date.clone());
                    repeat_last(&mut series.players_online);
                    repeat_last(&mut series.cash_players);
                    repeat_last(&mut series.peak_24h);
                    repeat_last(&mut series.seven_day_avg);
                }
            }
            AbsencePolicy::Drop => {
                self.sites.retain(|name, _| present.contains(name.as_str()));
            }
        }

        if !self.dates.iter().any(|d| d == &date) {
            self.dates.push(date);
            self.dates.sort();
        }

        // last_updated never rewinds, even for a replayed batch.
        let rewind = DateTime::parse_from_rfc3339(&self.last_updated)
            .map(|prev| prev.with_timezone(&Utc) > batch.collected_at)
            .unwrap_or(false);
        if !rewind {
            self.last_updated = batch.collected_at.to_rfc3339();
        }

        self.summary = Summary::of(batch);
    }
}

fn repeat_last(values: &mut Vec<u32>) {
    let last = values.last().copied().unwrap_or(0);
    values.push(last);
}

/// One site's most recent slot, as published in the summary artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatestSite {
    pub name: String,
    pub category: Category,
    pub players_online: u32,
    pub cash_players: u32,
    pub peak_24h: u32,
    pub seven_day_avg: u32,
    pub date: String,
}

/// The reduced artifact (`api_summary.json`) for lightweight consumers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryArtifact {
    pub last_updated: String,
    pub summary: Summary,
    pub latest_sites: BTreeMap<String, LatestSite>,
}

impl SummaryArtifact {
    pub fn of(detail: &DashboardData) -> Self {
        let mut latest_sites = BTreeMap::new();
        for (name, history) in &detail.sites {
            let series = &history.data;
            if series.dates.is_empty() {
                continue;
            }
            let i = series.dates.len() - 1;
            latest_sites.insert(
                name.clone(),
                LatestSite {
                    name: history.name.clone(),
                    category: history.category,
                    players_online: series.players_online.get(i).copied().unwrap_or(0),
                    cash_players: series.cash_players.get(i).copied().unwrap_or(0),
                    peak_24h: series.peak_24h.get(i).copied().unwrap_or(0),
                    seven_day_avg: series.seven_day_avg.get(i).copied().unwrap_or(0),
                    date: series.dates[i].clone(),
                },
            );
        }

        Self {
            last_updated: detail.last_updated.clone(),
            summary: detail.summary.clone(),
            latest_sites,
        }
    }
}
