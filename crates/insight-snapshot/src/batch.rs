use std::collections::HashMap;

use chrono::{DateTime, Utc};
use insight_crawler::SiteRow;

use crate::model::{Batch, Category, SiteSample, Summary};
use crate::registry;

impl Batch {
    /// Builds a batch from parsed rows: canonicalizes names, tags each
    /// sample, and dedups by name. The last occurrence's values win but
    /// the first occurrence keeps its slot, preserving the source's
    /// ranking order.
    pub fn collect(rows: Vec<SiteRow>, collected_at: DateTime<Utc>) -> Self {
        let mut samples: Vec<SiteSample> = Vec::with_capacity(rows.len());
        let mut index: HashMap<String, usize> = HashMap::new();

        for row in rows {
            let name = registry::canonical_name(&row.name);
            let sample = SiteSample {
                category: Category::of(&name),
                name: name.clone(),
                players_online: row.players_online,
                cash_players: row.cash_players,
                peak_24h: row.peak_24h,
                seven_day_avg: row.seven_day_avg,
            };
            match index.get(&name) {
                Some(&at) => samples[at] = sample,
                None => {
                    index.insert(name, samples.len());
                    samples.push(sample);
                }
            }
        }

        Self {
            collected_at,
            samples,
        }
    }

    /// The date slot this batch occupies in the time series.
    pub fn collection_date(&self) -> String {
        self.collected_at.format("%Y-%m-%d").to_string()
    }
}

impl Summary {
    pub fn of(batch: &Batch) -> Self {
        Self {
            total_sites: batch.samples.len(),
            gg_poker_sites: batch
                .samples
                .iter()
                .filter(|s| s.category == Category::GgPoker)
                .count(),
            latest_total_players: batch
                .samples
                .iter()
                .map(|s| u64::from(s.players_online))
                .sum(),
            data_points: batch.samples.len(),
        }
    }
}
