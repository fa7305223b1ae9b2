//! Stats Engine - dashboard counts, status tallies and rankings.
//!
//! Narratives are filtered by mission and date; sub-narratives follow their
//! parent. Events belong to a mission through its narratives' `event_ids`
//! (sub-events through their parent) and are filtered by their own date.
//! Factions, locations, persons and organizations carry no date and are
//! always counted in full.

mod summary;

pub use summary::*;

use std::cmp::Reverse;

use entity_store::{references, EntityStore, Event, Faction, Narrative};
use tracing::debug;

use crate::resolver::RelationshipResolver;
use crate::scope::MissionScope;
use crate::time_range::TimeRange;

/// Dashboard statistics over an [`EntityStore`].
#[derive(Debug, Clone, Copy)]
pub struct StatsEngine<'a> {
    resolver: RelationshipResolver<'a>,
}

impl<'a> StatsEngine<'a> {
    pub fn new(store: &'a EntityStore) -> Self {
        Self {
            resolver: RelationshipResolver::new(store),
        }
    }

    /// Counts of everything in scope plus the `top_n` narratives by volume.
    pub fn dashboard_stats(
        &self,
        scope: &MissionScope,
        range: Option<&TimeRange>,
        top_n: usize,
    ) -> DashboardStats {
        let narratives = self.resolver.narratives(scope, range);

        let stats = DashboardStats {
            narratives: narratives.len(),
            sub_narratives: self.resolver.sub_narratives(scope, range).len(),
            factions: self.resolver.factions().len(),
            locations: self.resolver.locations().len(),
            events: self.resolver.events_in_scope(scope, range).len(),
            persons: self.resolver.persons().len(),
            organizations: self.resolver.organizations().len(),
            top_narratives: self.rank(narratives, top_n),
        };

        debug!(
            %scope,
            ranged = range.is_some(),
            narratives = stats.narratives,
            top = stats.top_narratives.len(),
            "computed dashboard stats"
        );
        stats
    }

    /// Narratives in `range` tallied by status; no status counts as new.
    pub fn narrative_status_counts(&self, range: Option<&TimeRange>) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for narrative in self.resolver.narratives(&MissionScope::All, range) {
            counts.increment(narrative.effective_status());
        }
        counts
    }

    /// The `n` latest top-level events in `range`, newest first.
    ///
    /// Equal dates keep collection order; undated events sort last.
    pub fn recent_events(&self, n: usize, range: Option<&TimeRange>) -> Vec<Event> {
        let mut events = self.resolver.top_level_events(range);
        events.sort_by_key(|event| Reverse(event.date));
        events.into_iter().take(n).cloned().collect()
    }

    /// Every location referenced by a narrative or an event in `range`, in
    /// location collection order.
    pub fn all_locations_with_counts(&self, range: Option<&TimeRange>) -> Vec<LocationSummary> {
        let narratives = self.resolver.narratives(&MissionScope::All, range);
        let events = self.resolver.events(range);

        let summaries: Vec<LocationSummary> = self
            .resolver
            .locations()
            .into_iter()
            .filter_map(|location| {
                let id = location.id.as_str();
                let narrative_count = narratives
                    .iter()
                    .filter(|n| references(&n.location_ids, id))
                    .count();
                let event_count = events
                    .iter()
                    .filter(|e| e.location_id.as_ref().is_some_and(|l| l.as_str() == id))
                    .count();
                let origin = match (narrative_count > 0, event_count > 0) {
                    (true, true) => LocationOrigin::Both,
                    (true, false) => LocationOrigin::Narrative,
                    (false, true) => LocationOrigin::Event,
                    (false, false) => return None,
                };
                Some(LocationSummary {
                    location: location.clone(),
                    narrative_count,
                    event_count,
                    origin,
                })
            })
            .collect();

        debug!(ranged = range.is_some(), locations = summaries.len(), "counted locations");
        summaries
    }

    /// Mention volume of a narrative, ignoring keys of deleted factions.
    pub fn total_volume(&self, narrative: &Narrative) -> u64 {
        narrative
            .faction_mentions
            .iter()
            .filter(|(faction_id, _)| self.resolver.get::<Faction>(faction_id.as_str()).is_some())
            .fold(0u64, |total, (_, mention)| total.saturating_add(mention.volume))
    }

    fn rank(&self, narratives: Vec<&'a Narrative>, top_n: usize) -> Vec<RankedNarrative> {
        let mut ranked: Vec<(u64, &Narrative)> = narratives
            .into_iter()
            .map(|narrative| (self.total_volume(narrative), narrative))
            .collect();
        // Stable: equal volumes keep collection order.
        ranked.sort_by_key(|(volume, _)| Reverse(*volume));
        ranked
            .into_iter()
            .take(top_n)
            .map(|(total_volume, narrative)| RankedNarrative {
                narrative: narrative.clone(),
                total_volume,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{date, fixture_store};
    use entity_store::{Location, NarrativeStatus};

    fn january() -> TimeRange {
        TimeRange::days(date(2024, 1, 1), date(2024, 1, 31))
    }

    fn ranked_ids(stats: &DashboardStats) -> Vec<&str> {
        stats
            .top_narratives
            .iter()
            .map(|r| r.narrative.id.as_str())
            .collect()
    }

    #[test]
    fn test_dashboard_counts_unfiltered() {
        let store = fixture_store();
        let stats = StatsEngine::new(&store).dashboard_stats(&MissionScope::All, None, 5);

        assert_eq!(stats.narratives, 3);
        assert_eq!(stats.sub_narratives, 2);
        assert_eq!(stats.factions, 3);
        assert_eq!(stats.locations, 3);
        assert_eq!(stats.events, 4);
        assert_eq!(stats.persons, 3);
        assert_eq!(stats.organizations, 2);
    }

    #[test]
    fn test_dashboard_counts_filtered() {
        let store = fixture_store();
        let engine = StatsEngine::new(&store);

        let stats = engine.dashboard_stats(&MissionScope::parse("m1"), Some(&january()), 5);
        assert_eq!(stats.narratives, 1);
        assert_eq!(stats.sub_narratives, 1);
        assert_eq!(stats.events, 2);
        // Undated kinds are never filtered.
        assert_eq!(stats.factions, 3);
        assert_eq!(stats.persons, 3);
        assert_eq!(ranked_ids(&stats), vec!["n1"]);
    }

    #[test]
    fn test_dashboard_events_follow_mission() {
        let store = fixture_store();
        let engine = StatsEngine::new(&store);

        assert_eq!(engine.dashboard_stats(&MissionScope::parse("m1"), None, 5).events, 2);
        assert_eq!(engine.dashboard_stats(&MissionScope::parse("m2"), None, 5).events, 1);

        let unknown = engine.dashboard_stats(&MissionScope::parse("no-such-mission"), None, 5);
        assert_eq!(unknown.narratives, 0);
        assert_eq!(unknown.events, 0);
    }

    #[test]
    fn test_top_narratives_ties_keep_collection_order() {
        let store = fixture_store();
        let engine = StatsEngine::new(&store);

        let stats = engine.dashboard_stats(&MissionScope::All, None, 5);
        assert_eq!(ranked_ids(&stats), vec!["n1", "n3", "n2"]);
        let volumes: Vec<u64> = stats.top_narratives.iter().map(|r| r.total_volume).collect();
        assert_eq!(volumes, vec![40, 40, 25]);

        let top_two = engine.dashboard_stats(&MissionScope::All, None, 2);
        assert_eq!(ranked_ids(&top_two), vec!["n1", "n3"]);

        assert!(engine
            .dashboard_stats(&MissionScope::All, None, 0)
            .top_narratives
            .is_empty());
    }

    #[test]
    fn test_total_volume_skips_deleted_factions() {
        let store = fixture_store();
        let engine = StatsEngine::new(&store);

        let n2 = store.get::<Narrative>("n2").unwrap();
        assert_eq!(n2.total_mention_volume(), 124);
        assert_eq!(engine.total_volume(n2), 25);
    }

    #[test]
    fn test_status_counts_default_to_new() {
        let store = fixture_store();
        let counts = StatsEngine::new(&store).narrative_status_counts(None);

        assert_eq!(counts.get(NarrativeStatus::New), 1);
        assert_eq!(counts.in_progress, 1);
        assert_eq!(counts.under_investigation, 0);
        assert_eq!(counts.resolved, 1);
        assert_eq!(counts.total(), 3);
    }

    #[test]
    fn test_status_counts_in_range() {
        let store = fixture_store();
        let counts = StatsEngine::new(&store).narrative_status_counts(Some(&january()));

        assert_eq!(counts.in_progress, 1);
        assert_eq!(counts.total(), 1);
    }

    #[test]
    fn test_recent_events_top_level_newest_first() {
        let store = fixture_store();
        let engine = StatsEngine::new(&store);

        let recent: Vec<String> = engine
            .recent_events(2, None)
            .into_iter()
            .map(|e| e.id.to_string())
            .collect();
        assert_eq!(recent, vec!["e3", "e4"]);

        let all: Vec<String> = engine
            .recent_events(10, None)
            .into_iter()
            .map(|e| e.id.to_string())
            .collect();
        assert_eq!(all, vec!["e3", "e4", "e1"]);
    }

    #[test]
    fn test_recent_events_undated_last() {
        let mut store = EntityStore::new();
        let mut undated = Event::new("e0", "Unknown date", date(2024, 1, 1));
        undated.date = None;
        store.insert(undated).unwrap();
        store.insert(Event::new("e1", "Older", date(2023, 5, 1))).unwrap();

        let recent = StatsEngine::new(&store).recent_events(5, None);
        let ids: Vec<&str> = recent.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["e1", "e0"]);
    }

    #[test]
    fn test_locations_with_counts() {
        let store = fixture_store();
        let summaries = StatsEngine::new(&store).all_locations_with_counts(None);

        let rows: Vec<(&str, usize, usize, LocationOrigin)> = summaries
            .iter()
            .map(|s| (s.location.id.as_str(), s.narrative_count, s.event_count, s.origin))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("l1", 2, 2, LocationOrigin::Both),
                ("l2", 2, 1, LocationOrigin::Both),
                ("l3", 0, 1, LocationOrigin::Event),
            ]
        );
    }

    #[test]
    fn test_locations_with_counts_in_range() {
        let store = fixture_store();
        let summaries = StatsEngine::new(&store).all_locations_with_counts(Some(&january()));

        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].location.id.as_str(), "l1");
        assert_eq!(summaries[0].narrative_count, 1);
        assert_eq!(summaries[0].event_count, 2);
    }

    #[test]
    fn test_narrative_only_location() {
        let mut store = EntityStore::new();
        store
            .insert(Location::new("l1", "Quay", Default::default()))
            .unwrap();
        store
            .insert(Narrative::new("n1", "Docked").with_location("l1"))
            .unwrap();

        let summaries = StatsEngine::new(&store).all_locations_with_counts(None);
        assert_eq!(summaries[0].origin, LocationOrigin::Narrative);
    }
}
