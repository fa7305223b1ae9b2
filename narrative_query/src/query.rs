//! The query facade views talk to.

use entity_store::{EntityStore, Event, Narrative};

use crate::aggregation::{AggregationEngine, FactionVolumeSeries, SourceVolumeSeries};
use crate::config::QueryConfig;
use crate::network::{NetworkGraph, NetworkGraphBuilder};
use crate::resolver::RelationshipResolver;
use crate::scope::MissionScope;
use crate::stats::{DashboardStats, LocationSummary, StatsEngine, StatusCounts};
use crate::time_range::TimeRange;

/// Entry point for every query over one store.
///
/// Holds no state besides the store borrow and its config; each call reads
/// the collections as they are now.
#[derive(Debug, Clone)]
pub struct NarrativeQuery<'a> {
    store: &'a EntityStore,
    config: QueryConfig,
}

impl<'a> NarrativeQuery<'a> {
    pub fn new(store: &'a EntityStore) -> Self {
        Self::with_config(store, QueryConfig::default())
    }

    pub fn with_config(store: &'a EntityStore, config: QueryConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &'a EntityStore {
        self.store
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    pub fn resolver(&self) -> RelationshipResolver<'a> {
        RelationshipResolver::new(self.store)
    }

    pub fn aggregation(&self) -> AggregationEngine<'a> {
        AggregationEngine::new(self.store)
    }

    pub fn network(&self) -> NetworkGraphBuilder<'a> {
        NetworkGraphBuilder::new(self.store)
    }

    pub fn stats(&self) -> StatsEngine<'a> {
        StatsEngine::new(self.store)
    }

    pub fn narratives(&self, scope: &MissionScope, range: Option<&TimeRange>) -> Vec<&'a Narrative> {
        self.resolver().narratives(scope, range)
    }

    pub fn aggregate_volume_over_time(
        &self,
        scope: &MissionScope,
        range: Option<&TimeRange>,
    ) -> FactionVolumeSeries {
        self.aggregation().aggregate_volume_over_time(scope, range)
    }

    pub fn aggregate_source_volume_over_time(
        &self,
        scope: &MissionScope,
        range: Option<&TimeRange>,
    ) -> SourceVolumeSeries {
        self.aggregation()
            .aggregate_source_volume_over_time(scope, range)
    }

    pub fn source_volume_over_time(&self, narrative_id: &str) -> SourceVolumeSeries {
        self.aggregation().source_volume_over_time(narrative_id)
    }

    pub fn build_network_graph<P, O>(&self, person_ids: &[P], organization_ids: &[O]) -> NetworkGraph
    where
        P: AsRef<str>,
        O: AsRef<str>,
    {
        self.network().build(person_ids, organization_ids)
    }

    /// Dashboard stats ranking `config.top_narratives` narratives.
    pub fn dashboard_stats(&self, scope: &MissionScope, range: Option<&TimeRange>) -> DashboardStats {
        self.stats()
            .dashboard_stats(scope, range, self.config.top_narratives)
    }

    pub fn narrative_status_counts(&self, range: Option<&TimeRange>) -> StatusCounts {
        self.stats().narrative_status_counts(range)
    }

    /// The latest `config.recent_events` top-level events.
    pub fn recent_events(&self, range: Option<&TimeRange>) -> Vec<Event> {
        self.stats().recent_events(self.config.recent_events, range)
    }

    pub fn all_locations_with_counts(&self, range: Option<&TimeRange>) -> Vec<LocationSummary> {
        self.stats().all_locations_with_counts(range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{date, fixture_store};
    use entity_store::FactionMention;

    #[test]
    fn test_config_sizes_drive_wrappers() {
        let store = fixture_store();
        let query = NarrativeQuery::with_config(
            &store,
            QueryConfig {
                top_narratives: 1,
                recent_events: 2,
            },
        );

        assert_eq!(query.dashboard_stats(&MissionScope::All, None).top_narratives.len(), 1);
        assert_eq!(query.recent_events(None).len(), 2);

        let defaults = NarrativeQuery::new(&store);
        assert_eq!(defaults.dashboard_stats(&MissionScope::All, None).top_narratives.len(), 3);
        assert_eq!(defaults.recent_events(None).len(), 3);
    }

    #[test]
    fn test_next_call_sees_mutation() {
        let mut store = fixture_store();

        let before = NarrativeQuery::new(&store)
            .aggregate_volume_over_time(&MissionScope::parse("m2"), None)
            .total_for("f3");
        assert_eq!(before, 12);

        let mut n3 = store.get::<Narrative>("n3").unwrap().clone();
        n3.volume_over_time[0].faction_volumes.insert("f3".into(), 20);
        n3.faction_mentions.insert(
            "f1".into(),
            FactionMention {
                volume: 100,
                ..Default::default()
            },
        );
        store.update(n3).unwrap();

        let query = NarrativeQuery::new(&store);
        assert_eq!(
            query
                .aggregate_volume_over_time(&MissionScope::parse("m2"), None)
                .total_for("f3"),
            20
        );
        let top = query.dashboard_stats(&MissionScope::All, None).top_narratives;
        assert_eq!(top[0].narrative.id.as_str(), "n3");
    }

    #[test]
    fn test_removed_faction_leaves_axis() {
        let mut store = fixture_store();
        store.remove::<entity_store::Faction>("f3").unwrap();

        let query = NarrativeQuery::new(&store);
        let series = query.aggregate_volume_over_time(&MissionScope::All, None);
        assert!(series.series_for("f3").is_none());
        assert_eq!(series.factions.len(), 2);
        assert_eq!(series.dates.len(), 4);
    }

    #[test]
    fn test_facade_results_are_independent() {
        let store = fixture_store();
        let query = NarrativeQuery::new(&store);

        let mut first = query.all_locations_with_counts(None);
        first.clear();
        assert_eq!(query.all_locations_with_counts(None).len(), 3);

        let january = TimeRange::days(date(2024, 1, 1), date(2024, 1, 31));
        assert_eq!(query.narratives(&MissionScope::All, Some(&january)).len(), 1);
        assert_eq!(query.narrative_status_counts(Some(&january)).total(), 1);
        assert_eq!(query.source_volume_over_time("n3").total_for("src2"), 6);
        assert_eq!(
            query
                .aggregate_source_volume_over_time(&MissionScope::parse("m1"), None)
                .total_for("src1"),
            15
        );
        assert_eq!(query.build_network_graph(&["p1", "p2"], &["org1"]).links.len(), 3);
    }
}
