//! Aggregation Engine - sums date-bucketed volume logs across narratives.
//!
//! Every aggregate has the same shape: a sorted, deduplicated date axis, a
//! category axis (factions or sources) and one row of sums per category.
//!
//! 1. Select the narratives (by mission, or a single narrative)
//! 2. Date axis: the in-range bucket dates of the selection
//! 3. Category axis: every key seen in any bucket of the selection, in
//!    first-seen order, dropping keys with no matching record
//! 4. Rows: for each in-range bucket, add its volume into the matching cell

mod series;

pub use series::*;

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use chrono::NaiveDate;
use entity_store::{EntityStore, Faction, Narrative, Record, RecordId, Source, VolumePoint};
use tracing::debug;

use crate::resolver::RelationshipResolver;
use crate::scope::MissionScope;
use crate::time_range::{in_range, TimeRange};

/// Volume aggregation over the narratives in an [`EntityStore`].
#[derive(Debug, Clone, Copy)]
pub struct AggregationEngine<'a> {
    resolver: RelationshipResolver<'a>,
}

/// A category axis with one aligned row per category.
struct Tally<T> {
    dates: Vec<NaiveDate>,
    categories: Vec<T>,
    series: Vec<Vec<u64>>,
}

impl<'a> AggregationEngine<'a> {
    pub fn new(store: &'a EntityStore) -> Self {
        Self {
            resolver: RelationshipResolver::new(store),
        }
    }

    /// Faction volume per date, summed over the narratives in `scope`.
    ///
    /// Only buckets dated inside `range` contribute to the date axis and the
    /// sums.
    pub fn aggregate_volume_over_time(
        &self,
        scope: &MissionScope,
        range: Option<&TimeRange>,
    ) -> FactionVolumeSeries {
        let narratives = self.resolver.narratives(scope, None);
        let tally: Tally<Faction> =
            self.tally(&narratives, range, |point: &VolumePoint| &point.faction_volumes);

        debug!(
            %scope,
            ranged = range.is_some(),
            narratives = narratives.len(),
            dates = tally.dates.len(),
            factions = tally.categories.len(),
            "aggregated faction volume"
        );
        FactionVolumeSeries {
            dates: tally.dates,
            factions: tally.categories,
            series: tally.series,
        }
    }

    /// Source volume per date, summed over the narratives in `scope`.
    pub fn aggregate_source_volume_over_time(
        &self,
        scope: &MissionScope,
        range: Option<&TimeRange>,
    ) -> SourceVolumeSeries {
        let narratives = self.resolver.narratives(scope, None);
        let tally: Tally<Source> =
            self.tally(&narratives, range, |point: &VolumePoint| &point.source_volumes);

        debug!(
            %scope,
            ranged = range.is_some(),
            narratives = narratives.len(),
            dates = tally.dates.len(),
            sources = tally.categories.len(),
            "aggregated source volume"
        );
        SourceVolumeSeries {
            dates: tally.dates,
            sources: tally.categories,
            series: tally.series,
        }
    }

    /// Source volume per date for one narrative. Empty when it does not exist.
    pub fn source_volume_over_time(&self, narrative_id: &str) -> SourceVolumeSeries {
        let Some(narrative) = self.resolver.narrative(narrative_id) else {
            return SourceVolumeSeries::default();
        };
        let tally: Tally<Source> =
            self.tally(&[narrative], None, |point: &VolumePoint| &point.source_volumes);

        SourceVolumeSeries {
            dates: tally.dates,
            sources: tally.categories,
            series: tally.series,
        }
    }

    /// Faction volume per date for one narrative. Empty when it does not exist.
    pub fn faction_volume_over_time(&self, narrative_id: &str) -> FactionVolumeSeries {
        let Some(narrative) = self.resolver.narrative(narrative_id) else {
            return FactionVolumeSeries::default();
        };
        let tally: Tally<Faction> =
            self.tally(&[narrative], None, |point: &VolumePoint| &point.faction_volumes);

        FactionVolumeSeries {
            dates: tally.dates,
            factions: tally.categories,
            series: tally.series,
        }
    }

    /// Mention totals per faction over the narratives in scope and range.
    ///
    /// Sentiment is the volume-weighted mean of the mention scores, or 0.0
    /// when the faction's total volume is zero.
    pub fn faction_mention_totals(
        &self,
        scope: &MissionScope,
        range: Option<&TimeRange>,
    ) -> Vec<FactionTotal> {
        let narratives = self.resolver.narratives(scope, range);

        let mut order: Vec<&RecordId> = Vec::new();
        let mut sums: HashMap<&RecordId, (u64, f64)> = HashMap::new();
        for (faction_id, mention) in narratives.iter().flat_map(|n| n.faction_mentions.iter()) {
            let entry = sums.entry(faction_id).or_insert_with(|| {
                order.push(faction_id);
                (0, 0.0)
            });
            entry.0 = entry.0.saturating_add(mention.volume);
            entry.1 += mention.volume as f64 * mention.sentiment.score();
        }

        let totals: Vec<FactionTotal> = order
            .into_iter()
            .filter_map(|faction_id| {
                let faction = self.resolver.resolve_opt::<Faction>(Some(faction_id))?;
                let (volume, weighted) = sums.get(faction_id).copied().unwrap_or_default();
                let sentiment = if volume == 0 {
                    0.0
                } else {
                    (weighted / volume as f64).clamp(-1.0, 1.0)
                };
                Some(FactionTotal {
                    faction: faction.clone(),
                    volume,
                    sentiment,
                })
            })
            .collect();

        debug!(%scope, ranged = range.is_some(), factions = totals.len(), "summed faction mentions");
        totals
    }

    fn tally<T: Record>(
        &self,
        narratives: &[&'a Narrative],
        range: Option<&TimeRange>,
        volumes: impl Fn(&VolumePoint) -> &BTreeMap<RecordId, u64>,
    ) -> Tally<T> {
        let points = || {
            narratives
                .iter()
                .copied()
                .flat_map(|narrative| narrative.volume_over_time.iter())
        };

        let dates: Vec<NaiveDate> = points()
            .filter(|point| in_range(&point.date, range))
            .map(|point| point.date)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut seen: HashSet<&RecordId> = HashSet::new();
        let mut rows: HashMap<&RecordId, usize> = HashMap::new();
        let mut categories: Vec<T> = Vec::new();
        for key in points().flat_map(|point| volumes(point).keys()) {
            if !seen.insert(key) {
                continue;
            }
            if let Some(record) = self.resolver.resolve_opt::<T>(Some(key)) {
                rows.insert(key, categories.len());
                categories.push(record.clone());
            }
        }

        let mut series = vec![vec![0u64; dates.len()]; categories.len()];
        for point in points().filter(|point| in_range(&point.date, range)) {
            let Ok(column) = dates.binary_search(&point.date) else {
                continue;
            };
            for (key, volume) in volumes(point) {
                if let Some(&row) = rows.get(key) {
                    let cell = &mut series[row][column];
                    *cell = cell.saturating_add(*volume);
                }
            }
        }

        Tally {
            dates,
            categories,
            series,
        }
    }
}
