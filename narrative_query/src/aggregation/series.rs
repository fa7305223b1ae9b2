//! Owned aggregation results.

use chrono::NaiveDate;
use entity_store::{Faction, Record, Source};
use serde::{Deserialize, Serialize};

/// Per-faction mention counts aligned to a shared date axis.
///
/// `series[i][j]` is the volume of `factions[i]` on `dates[j]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactionVolumeSeries {
    pub dates: Vec<NaiveDate>,
    pub factions: Vec<Faction>,
    pub series: Vec<Vec<u64>>,
}

impl FactionVolumeSeries {
    /// The row for one faction.
    pub fn series_for(&self, faction_id: &str) -> Option<&[u64]> {
        row_for(&self.factions, &self.series, faction_id)
    }

    pub fn total_for(&self, faction_id: &str) -> u64 {
        self.series_for(faction_id).map(row_total).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty() && self.factions.is_empty()
    }
}

/// Per-source mention counts aligned to a shared date axis.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceVolumeSeries {
    pub dates: Vec<NaiveDate>,
    pub sources: Vec<Source>,
    pub series: Vec<Vec<u64>>,
}

impl SourceVolumeSeries {
    pub fn series_for(&self, source_id: &str) -> Option<&[u64]> {
        row_for(&self.sources, &self.series, source_id)
    }

    pub fn total_for(&self, source_id: &str) -> u64 {
        self.series_for(source_id).map(row_total).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty() && self.sources.is_empty()
    }
}

/// Summed mention volume and volume-weighted sentiment for one faction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactionTotal {
    pub faction: Faction,
    pub volume: u64,
    /// Weighted mean of mention sentiment scores, in -1.0..=1.0.
    pub sentiment: f64,
}

fn row_for<'s, T: Record>(axis: &[T], series: &'s [Vec<u64>], id: &str) -> Option<&'s [u64]> {
    axis.iter()
        .position(|record| record.id().as_str() == id)
        .and_then(|row| series.get(row))
        .map(Vec::as_slice)
}

fn row_total(row: &[u64]) -> u64 {
    row.iter().fold(0u64, |total, volume| total.saturating_add(*volume))
}
