use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::registry;

/// Site classification used throughout the artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "GG_POKER")]
    GgPoker,
    #[serde(rename = "COMPETITOR")]
    Competitor,
}

impl Category {
    pub fn of(name: &str) -> Self {
        if registry::is_gg_site(name) {
            Self::GgPoker
        } else {
            Self::Competitor
        }
    }
}

/// One site's measurement at one collection instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteSample {
    pub name: String,
    pub category: Category,
    pub players_online: u32,
    pub cash_players: u32,
    pub peak_24h: u32,
    pub seven_day_avg: u32,
}

/// A full collection run. Samples keep parse order and are unique by
/// name; never mutated once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Batch {
    pub collected_at: DateTime<Utc>,
    pub samples: Vec<SiteSample>,
}

/// Aggregates derived from a batch, recomputed every run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total_sites: usize,
    pub gg_poker_sites: usize,
    pub latest_total_players: u64,
    pub data_points: usize,
}
