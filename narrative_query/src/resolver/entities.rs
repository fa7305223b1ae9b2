//! Single-record lookups and filtered collection listings.

use std::collections::HashSet;

use entity_store::{
    Document, Event, Faction, FactionOverlap, Location, Mission, Narrative, Organization, Person,
    Source, SourceCategory, SubNarrative,
};

use super::RelationshipResolver;
use crate::scope::MissionScope;
use crate::time_range::{in_range_opt, TimeRange};

impl<'a> RelationshipResolver<'a> {
    // =========================================================================
    // Single lookups
    // =========================================================================

    /// Looks up a mission by id.
    pub fn mission(&self, id: &str) -> Option<&'a Mission> {
        self.get(id)
    }

    /// Looks up a narrative by id.
    pub fn narrative(&self, id: &str) -> Option<&'a Narrative> {
        self.get(id)
    }

    /// Looks up a sub-narrative by id.
    pub fn sub_narrative(&self, id: &str) -> Option<&'a SubNarrative> {
        self.get(id)
    }

    /// Looks up a faction by id.
    pub fn faction(&self, id: &str) -> Option<&'a Faction> {
        self.get(id)
    }

    /// Looks up a faction overlap by id.
    pub fn faction_overlap(&self, id: &str) -> Option<&'a FactionOverlap> {
        self.get(id)
    }

    /// Looks up a location by id.
    pub fn location(&self, id: &str) -> Option<&'a Location> {
        self.get(id)
    }

    /// Looks up an event by id.
    pub fn event(&self, id: &str) -> Option<&'a Event> {
        self.get(id)
    }

    /// Looks up a person by id.
    pub fn person(&self, id: &str) -> Option<&'a Person> {
        self.get(id)
    }

    /// Looks up an organization by id.
    pub fn organization(&self, id: &str) -> Option<&'a Organization> {
        self.get(id)
    }

    /// Looks up a document by id.
    pub fn document(&self, id: &str) -> Option<&'a Document> {
        self.get(id)
    }

    /// Looks up a source by id.
    pub fn source(&self, id: &str) -> Option<&'a Source> {
        self.get(id)
    }

    /// Looks up a source category by id.
    pub fn source_category(&self, id: &str) -> Option<&'a SourceCategory> {
        self.get(id)
    }

    // =========================================================================
    // Listings
    // =========================================================================

    /// Every mission, in collection order.
    pub fn missions(&self) -> Vec<&'a Mission> {
        self.store.all::<Mission>().iter().collect()
    }

    /// Narratives in `scope` whose reference date lies in `range`.
    ///
    /// With [`MissionScope::All`] and no range this is the whole collection
    /// in canonical order.
    pub fn narratives(&self, scope: &MissionScope, range: Option<&TimeRange>) -> Vec<&'a Narrative> {
        self.scan(|narrative: &Narrative| {
            scope.includes(narrative)
                && in_range_opt(narrative.reference_date().as_ref(), range)
        })
    }

    /// Sub-narratives whose parent narrative is in scope.
    ///
    /// A sub-narrative whose parent is missing is never in scope.
    pub fn sub_narratives(
        &self,
        scope: &MissionScope,
        range: Option<&TimeRange>,
    ) -> Vec<&'a SubNarrative> {
        let parents = self.narratives(scope, range);
        self.scan(|sub: &SubNarrative| {
            sub.parent_narrative_id
                .as_ref()
                .is_some_and(|parent_id| parents.iter().any(|p| &p.id == parent_id))
        })
    }

    /// Every faction. Factions carry no date.
    pub fn factions(&self) -> Vec<&'a Faction> {
        self.store.all::<Faction>().iter().collect()
    }

    /// Every faction overlap record.
    pub fn faction_overlaps(&self) -> Vec<&'a FactionOverlap> {
        self.store.all::<FactionOverlap>().iter().collect()
    }

    /// Every location.
    pub fn locations(&self) -> Vec<&'a Location> {
        self.store.all::<Location>().iter().collect()
    }

    /// Events dated within `range`, parents and sub-events alike.
    pub fn events(&self, range: Option<&TimeRange>) -> Vec<&'a Event> {
        self.scan(|event: &Event| in_range_opt(event.date.as_ref(), range))
    }

    /// Events in `scope` dated within `range`.
    ///
    /// A mission owns the events its narratives list in `event_ids`, plus the
    /// direct sub-events of those. Narrative dates play no part here; each
    /// event is filtered by its own date.
    pub fn events_in_scope(&self, scope: &MissionScope, range: Option<&TimeRange>) -> Vec<&'a Event> {
        if let MissionScope::All = scope {
            return self.events(range);
        }

        let owned: HashSet<&str> = self
            .narratives(scope, None)
            .into_iter()
            .flat_map(|narrative| narrative.event_ids.iter().map(|id| id.as_str()))
            .collect();

        self.scan(|event: &Event| {
            let in_scope = owned.contains(event.id.as_str())
                || event
                    .parent_event_id
                    .as_ref()
                    .is_some_and(|parent| owned.contains(parent.as_str()));
            in_scope && in_range_opt(event.date.as_ref(), range)
        })
    }

    /// Top-level events dated within `range`.
    pub fn top_level_events(&self, range: Option<&TimeRange>) -> Vec<&'a Event> {
        self.scan(|event: &Event| event.is_top_level() && in_range_opt(event.date.as_ref(), range))
    }

    /// Every person.
    pub fn persons(&self) -> Vec<&'a Person> {
        self.store.all::<Person>().iter().collect()
    }

    /// Every organization.
    pub fn organizations(&self) -> Vec<&'a Organization> {
        self.store.all::<Organization>().iter().collect()
    }

    /// Documents published within `range`.
    pub fn documents(&self, range: Option<&TimeRange>) -> Vec<&'a Document> {
        self.scan(|document: &Document| in_range_opt(document.published_date.as_ref(), range))
    }

    /// Every source.
    pub fn sources(&self) -> Vec<&'a Source> {
        self.store.all::<Source>().iter().collect()
    }

    /// Every source category, nested or not.
    pub fn source_categories(&self) -> Vec<&'a SourceCategory> {
        self.store.all::<SourceCategory>().iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{date, fixture_store};
    use entity_store::{EntityStore, Record, RecordId};

    fn ids<T: Record>(records: &[&T]) -> Vec<String> {
        records.iter().map(|r| r.id().to_string()).collect()
    }

    #[test]
    fn test_single_lookup_not_found_is_none() {
        let store = fixture_store();
        let resolver = RelationshipResolver::new(&store);

        assert!(resolver.narrative("n1").is_some());
        assert!(resolver.narrative("does-not-exist").is_none());
        assert!(resolver.person("n1").is_none());
    }

    #[test]
    fn test_lookup_returns_stored_record() {
        let mut store = EntityStore::new();
        let person = Person::new("p9", "Mara Quill").with_faction("f1");
        store.insert(person.clone()).unwrap();

        let resolver = RelationshipResolver::new(&store);
        assert_eq!(resolver.person("p9"), Some(&person));
    }

    #[test]
    fn test_all_scope_returns_full_collection_in_order() {
        let store = fixture_store();
        let resolver = RelationshipResolver::new(&store);

        let listed = resolver.narratives(&MissionScope::All, None);
        let canonical: Vec<&Narrative> = store.all::<Narrative>().iter().collect();
        assert_eq!(listed, canonical);
    }

    #[test]
    fn test_narratives_filtered_by_mission() {
        let store = fixture_store();
        let resolver = RelationshipResolver::new(&store);

        let listed = resolver.narratives(&MissionScope::parse("m1"), None);
        assert_eq!(ids(&listed), vec!["n1", "n2"]);

        assert!(resolver
            .narratives(&MissionScope::parse("no-such-mission"), None)
            .is_empty());
    }

    #[test]
    fn test_narratives_filtered_by_time() {
        let store = fixture_store();
        let resolver = RelationshipResolver::new(&store);

        let range = TimeRange::days(date(2024, 1, 1), date(2024, 1, 31));
        let listed = resolver.narratives(&MissionScope::All, Some(&range));
        assert_eq!(ids(&listed), vec!["n1"]);
    }

    #[test]
    fn test_sub_narratives_follow_parent_scope() {
        let store = fixture_store();
        let resolver = RelationshipResolver::new(&store);

        let in_m1 = resolver.sub_narratives(&MissionScope::parse("m1"), None);
        assert_eq!(ids(&in_m1), vec!["s1"]);

        let in_m2 = resolver.sub_narratives(&MissionScope::parse("m2"), None);
        assert_eq!(ids(&in_m2), vec!["s2"]);

        let january = TimeRange::days(date(2024, 1, 1), date(2024, 1, 31));
        let in_january = resolver.sub_narratives(&MissionScope::All, Some(&january));
        assert_eq!(ids(&in_january), vec!["s1"]);
    }

    #[test]
    fn test_events_filtered_by_date() {
        let store = fixture_store();
        let resolver = RelationshipResolver::new(&store);

        let range = TimeRange::days(date(2024, 1, 1), date(2024, 1, 31));
        assert_eq!(ids(&resolver.events(Some(&range))), vec!["e1", "e2"]);
        assert_eq!(ids(&resolver.top_level_events(Some(&range))), vec!["e1"]);
        assert_eq!(resolver.events(None).len(), store.count::<Event>());
    }

    #[test]
    fn test_events_in_scope_follow_mission_narratives() {
        let store = fixture_store();
        let resolver = RelationshipResolver::new(&store);

        let m1 = MissionScope::parse("m1");
        assert_eq!(ids(&resolver.events_in_scope(&m1, None)), vec!["e1", "e2"]);
        assert_eq!(ids(&resolver.events_in_scope(&MissionScope::parse("m2"), None)), vec!["e3"]);
        assert!(resolver
            .events_in_scope(&MissionScope::parse("no-such-mission"), None)
            .is_empty());

        let first_day = TimeRange::days(date(2024, 1, 10), date(2024, 1, 10));
        assert_eq!(ids(&resolver.events_in_scope(&m1, Some(&first_day))), vec!["e1"]);

        assert_eq!(resolver.events_in_scope(&MissionScope::All, None).len(), 4);
    }

    #[test]
    fn test_documents_filtered_by_publication() {
        let mut store = EntityStore::new();
        let mut dated = Document::new("d1", "Dated");
        dated.published_date = Some(date(2024, 5, 1));
        store.insert(dated).unwrap();
        store.insert(Document::new("d2", "Undated")).unwrap();

        let resolver = RelationshipResolver::new(&store);
        let range = TimeRange::days(date(2024, 5, 1), date(2024, 5, 1));

        assert_eq!(ids(&resolver.documents(Some(&range))), vec!["d1"]);
        assert_eq!(resolver.documents(None).len(), 2);
        assert_eq!(resolver.document("d2").map(|d| &d.id), Some(&RecordId::from("d2")));
    }
}
