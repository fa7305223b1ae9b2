//! Cross-reference accessors, grouped by the record they start from.

use entity_store::{
    references, Document, Event, Faction, FactionOverlap, Location, Mission, Narrative,
    Organization, Person, Source, SourceCategory, SubNarrative,
};

use super::RelationshipResolver;

impl<'a> RelationshipResolver<'a> {
    // =========================================================================
    // Narratives
    // =========================================================================

    /// The mission a narrative belongs to, if it names one that exists.
    pub fn mission_for_narrative(&self, narrative_id: &str) -> Option<&'a Mission> {
        self.narrative(narrative_id)
            .and_then(|n| self.resolve_opt(n.mission_id.as_ref()))
    }

    /// Reverse scan on `parentNarrativeId`, not the parent's own id list.
    pub fn sub_narratives_for_narrative(&self, narrative_id: &str) -> Vec<&'a SubNarrative> {
        self.children_of(narrative_id, |s: &SubNarrative| s.parent_narrative_id.as_ref())
    }

    /// Parent of a sub-narrative, via its `parentNarrativeId`.
    pub fn parent_narrative(&self, sub_narrative_id: &str) -> Option<&'a Narrative> {
        self.sub_narrative(sub_narrative_id)
            .and_then(|s| self.resolve_opt(s.parent_narrative_id.as_ref()))
    }

    /// People listed on the narrative, in list order.
    pub fn persons_for_narrative(&self, narrative_id: &str) -> Vec<&'a Person> {
        self.narrative(narrative_id)
            .map(|n| self.resolve_ids(&n.person_ids))
            .unwrap_or_default()
    }

    /// Organizations listed on the narrative.
    pub fn organizations_for_narrative(&self, narrative_id: &str) -> Vec<&'a Organization> {
        self.narrative(narrative_id)
            .map(|n| self.resolve_ids(&n.organization_ids))
            .unwrap_or_default()
    }

    /// Locations listed on the narrative.
    pub fn locations_for_narrative(&self, narrative_id: &str) -> Vec<&'a Location> {
        self.narrative(narrative_id)
            .map(|n| self.resolve_ids(&n.location_ids))
            .unwrap_or_default()
    }

    /// Events listed in the narrative's `eventIds`.
    pub fn events_for_narrative(&self, narrative_id: &str) -> Vec<&'a Event> {
        self.narrative(narrative_id)
            .map(|n| self.resolve_ids(&n.event_ids))
            .unwrap_or_default()
    }

    /// Factions with a mention entry on the narrative. Stale keys are skipped.
    pub fn factions_for_narrative(&self, narrative_id: &str) -> Vec<&'a Faction> {
        self.narrative(narrative_id)
            .map(|n| self.resolve_keys(&n.faction_mentions))
            .unwrap_or_default()
    }

    /// Sources with a volume entry on the narrative.
    pub fn sources_for_narrative(&self, narrative_id: &str) -> Vec<&'a Source> {
        self.narrative(narrative_id)
            .map(|n| self.resolve_keys(&n.source_volumes))
            .unwrap_or_default()
    }

    /// Documents listed on the narrative or listing the narrative.
    pub fn documents_for_narrative(&self, narrative_id: &str) -> Vec<&'a Document> {
        let listed = self
            .narrative(narrative_id)
            .map(|n| n.document_ids.as_slice())
            .unwrap_or_default();
        self.scan(|d: &Document| {
            references(listed, d.id.as_str()) || references(&d.narrative_ids, narrative_id)
        })
    }

    // =========================================================================
    // Sub-narratives
    // =========================================================================

    /// People listed on the sub-narrative.
    pub fn persons_for_sub_narrative(&self, sub_narrative_id: &str) -> Vec<&'a Person> {
        self.sub_narrative(sub_narrative_id)
            .map(|s| self.resolve_ids(&s.person_ids))
            .unwrap_or_default()
    }

    /// Organizations listed on the sub-narrative.
    pub fn organizations_for_sub_narrative(&self, sub_narrative_id: &str) -> Vec<&'a Organization> {
        self.sub_narrative(sub_narrative_id)
            .map(|s| self.resolve_ids(&s.organization_ids))
            .unwrap_or_default()
    }

    /// Locations listed on the sub-narrative.
    pub fn locations_for_sub_narrative(&self, sub_narrative_id: &str) -> Vec<&'a Location> {
        self.sub_narrative(sub_narrative_id)
            .map(|s| self.resolve_ids(&s.location_ids))
            .unwrap_or_default()
    }

    /// Events listed on the sub-narrative.
    pub fn events_for_sub_narrative(&self, sub_narrative_id: &str) -> Vec<&'a Event> {
        self.sub_narrative(sub_narrative_id)
            .map(|s| self.resolve_ids(&s.event_ids))
            .unwrap_or_default()
    }

    /// Factions mentioned by the sub-narrative; stale keys are skipped.
    pub fn factions_for_sub_narrative(&self, sub_narrative_id: &str) -> Vec<&'a Faction> {
        self.sub_narrative(sub_narrative_id)
            .map(|s| self.resolve_keys(&s.faction_mentions))
            .unwrap_or_default()
    }

    /// Documents that list the sub-narrative.
    pub fn documents_for_sub_narrative(&self, sub_narrative_id: &str) -> Vec<&'a Document> {
        self.related_to(sub_narrative_id, |d: &Document| d.sub_narrative_ids.as_slice())
    }

    // =========================================================================
    // Missions
    // =========================================================================

    /// Narratives whose `missionId` is this mission.
    pub fn narratives_for_mission(&self, mission_id: &str) -> Vec<&'a Narrative> {
        self.scan(|n: &Narrative| n.mission_id.as_ref().is_some_and(|m| m.as_str() == mission_id))
    }

    // =========================================================================
    // Factions
    // =========================================================================

    /// Narratives with a mention entry for the faction.
    pub fn narratives_for_faction(&self, faction_id: &str) -> Vec<&'a Narrative> {
        self.keyed_by(faction_id, |n: &Narrative| &n.faction_mentions)
    }

    /// Sub-narratives with a mention entry for the faction.
    pub fn sub_narratives_for_faction(&self, faction_id: &str) -> Vec<&'a SubNarrative> {
        self.keyed_by(faction_id, |s: &SubNarrative| &s.faction_mentions)
    }

    /// People the faction lists as affiliated, or who list the faction.
    pub fn persons_for_faction(&self, faction_id: &str) -> Vec<&'a Person> {
        let listed = self
            .faction(faction_id)
            .map(|f| f.affiliated_person_ids.as_slice())
            .unwrap_or_default();
        self.scan(|p: &Person| {
            references(listed, p.id.as_str()) || references(&p.affiliated_faction_ids, faction_id)
        })
    }

    /// Organizations the faction lists, or that list the faction.
    pub fn organizations_for_faction(&self, faction_id: &str) -> Vec<&'a Organization> {
        let listed = self
            .faction(faction_id)
            .map(|f| f.affiliated_organization_ids.as_slice())
            .unwrap_or_default();
        self.scan(|o: &Organization| {
            references(listed, o.id.as_str()) || references(&o.affiliated_faction_ids, faction_id)
        })
    }

    /// Factions related in either direction. Never includes the faction itself.
    pub fn related_factions(&self, faction_id: &str) -> Vec<&'a Faction> {
        let listed = self
            .faction(faction_id)
            .map(|f| f.related_faction_ids.as_slice())
            .unwrap_or_default();
        self.scan(|f: &Faction| {
            f.id.as_str() != faction_id
                && (references(listed, f.id.as_str())
                    || references(&f.related_faction_ids, faction_id))
        })
    }

    /// Overlap records that include the faction.
    pub fn faction_overlaps_for_faction(&self, faction_id: &str) -> Vec<&'a FactionOverlap> {
        self.related_to(faction_id, |o: &FactionOverlap| o.faction_ids.as_slice())
    }

    /// Factions named by an overlap record.
    pub fn factions_for_overlap(&self, overlap_id: &str) -> Vec<&'a Faction> {
        self.faction_overlap(overlap_id)
            .map(|o| self.resolve_ids(&o.faction_ids))
            .unwrap_or_default()
    }

    // =========================================================================
    // People and organizations
    // =========================================================================

    /// Narratives listing the person.
    pub fn narratives_for_person(&self, person_id: &str) -> Vec<&'a Narrative> {
        self.related_to(person_id, |n: &Narrative| n.person_ids.as_slice())
    }

    /// Sub-narratives listing the person.
    pub fn sub_narratives_for_person(&self, person_id: &str) -> Vec<&'a SubNarrative> {
        self.related_to(person_id, |s: &SubNarrative| s.person_ids.as_slice())
    }

    /// Factions the person lists, or that list the person.
    pub fn factions_for_person(&self, person_id: &str) -> Vec<&'a Faction> {
        let listed = self
            .person(person_id)
            .map(|p| p.affiliated_faction_ids.as_slice())
            .unwrap_or_default();
        self.scan(|f: &Faction| {
            references(listed, f.id.as_str()) || references(&f.affiliated_person_ids, person_id)
        })
    }

    /// Locations on the person's own record.
    pub fn locations_for_person(&self, person_id: &str) -> Vec<&'a Location> {
        self.person(person_id)
            .map(|p| self.resolve_ids(&p.related_location_ids))
            .unwrap_or_default()
    }

    /// Events the person lists, or that list the person.
    pub fn events_for_person(&self, person_id: &str) -> Vec<&'a Event> {
        let listed = self
            .person(person_id)
            .map(|p| p.related_event_ids.as_slice())
            .unwrap_or_default();
        self.scan(|e: &Event| {
            references(listed, e.id.as_str()) || references(&e.person_ids, person_id)
        })
    }

    /// Documents mentioning the person.
    pub fn documents_for_person(&self, person_id: &str) -> Vec<&'a Document> {
        self.related_to(person_id, |d: &Document| d.person_ids.as_slice())
    }

    /// Narratives listing the organization.
    pub fn narratives_for_organization(&self, organization_id: &str) -> Vec<&'a Narrative> {
        self.related_to(organization_id, |n: &Narrative| n.organization_ids.as_slice())
    }

    /// Sub-narratives listing the organization.
    pub fn sub_narratives_for_organization(&self, organization_id: &str) -> Vec<&'a SubNarrative> {
        self.related_to(organization_id, |s: &SubNarrative| s.organization_ids.as_slice())
    }

    /// Factions the organization lists, or that list it.
    pub fn factions_for_organization(&self, organization_id: &str) -> Vec<&'a Faction> {
        let listed = self
            .organization(organization_id)
            .map(|o| o.affiliated_faction_ids.as_slice())
            .unwrap_or_default();
        self.scan(|f: &Faction| {
            references(listed, f.id.as_str())
                || references(&f.affiliated_organization_ids, organization_id)
        })
    }

    /// Locations on the organization's own record.
    pub fn locations_for_organization(&self, organization_id: &str) -> Vec<&'a Location> {
        self.organization(organization_id)
            .map(|o| self.resolve_ids(&o.related_location_ids))
            .unwrap_or_default()
    }

    /// Events listing the organization.
    pub fn events_for_organization(&self, organization_id: &str) -> Vec<&'a Event> {
        self.related_to(organization_id, |e: &Event| e.organization_ids.as_slice())
    }

    /// Documents mentioning the organization.
    pub fn documents_for_organization(&self, organization_id: &str) -> Vec<&'a Document> {
        self.related_to(organization_id, |d: &Document| d.organization_ids.as_slice())
    }

    // =========================================================================
    // Locations
    // =========================================================================

    /// Narratives set at the location.
    pub fn narratives_for_location(&self, location_id: &str) -> Vec<&'a Narrative> {
        self.related_to(location_id, |n: &Narrative| n.location_ids.as_slice())
    }

    /// Sub-narratives set at the location.
    pub fn sub_narratives_for_location(&self, location_id: &str) -> Vec<&'a SubNarrative> {
        self.related_to(location_id, |s: &SubNarrative| s.location_ids.as_slice())
    }

    /// Events whose `locationId` is this location.
    pub fn events_for_location(&self, location_id: &str) -> Vec<&'a Event> {
        self.scan(|e: &Event| e.location_id.as_ref().is_some_and(|l| l.as_str() == location_id))
    }

    /// People who list the location.
    pub fn persons_for_location(&self, location_id: &str) -> Vec<&'a Person> {
        self.related_to(location_id, |p: &Person| p.related_location_ids.as_slice())
    }

    /// Organizations that list the location.
    pub fn organizations_for_location(&self, location_id: &str) -> Vec<&'a Organization> {
        self.related_to(location_id, |o: &Organization| o.related_location_ids.as_slice())
    }

    /// Documents that list the location.
    pub fn documents_for_location(&self, location_id: &str) -> Vec<&'a Document> {
        self.related_to(location_id, |d: &Document| d.location_ids.as_slice())
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Parent of a sub-event, via its `parentEventId`.
    pub fn parent_event(&self, event_id: &str) -> Option<&'a Event> {
        self.event(event_id)
            .and_then(|e| self.resolve_opt(e.parent_event_id.as_ref()))
    }

    /// Reverse scan on `parentEventId`, not the parent's own id list.
    pub fn sub_events(&self, event_id: &str) -> Vec<&'a Event> {
        self.children_of(event_id, |e: &Event| e.parent_event_id.as_ref())
    }

    /// Where the event took place.
    pub fn location_for_event(&self, event_id: &str) -> Option<&'a Location> {
        self.event(event_id)
            .and_then(|e| self.resolve_opt(e.location_id.as_ref()))
    }

    /// People listed on the event.
    pub fn persons_for_event(&self, event_id: &str) -> Vec<&'a Person> {
        self.event(event_id)
            .map(|e| self.resolve_ids(&e.person_ids))
            .unwrap_or_default()
    }

    /// Organizations listed on the event.
    pub fn organizations_for_event(&self, event_id: &str) -> Vec<&'a Organization> {
        self.event(event_id)
            .map(|e| self.resolve_ids(&e.organization_ids))
            .unwrap_or_default()
    }

    /// Narratives listing the event.
    pub fn narratives_for_event(&self, event_id: &str) -> Vec<&'a Narrative> {
        self.related_to(event_id, |n: &Narrative| n.event_ids.as_slice())
    }

    /// Sub-narratives listing the event.
    pub fn sub_narratives_for_event(&self, event_id: &str) -> Vec<&'a SubNarrative> {
        self.related_to(event_id, |s: &SubNarrative| s.event_ids.as_slice())
    }

    /// Documents covering the event.
    pub fn documents_for_event(&self, event_id: &str) -> Vec<&'a Document> {
        self.related_to(event_id, |d: &Document| d.event_ids.as_slice())
    }

    // =========================================================================
    // Documents and sources
    // =========================================================================

    /// The source that published the document.
    pub fn source_for_document(&self, document_id: &str) -> Option<&'a Source> {
        self.document(document_id)
            .and_then(|d| self.resolve_opt(d.source_id.as_ref()))
    }

    /// Documents published by the source.
    pub fn documents_for_source(&self, source_id: &str) -> Vec<&'a Document> {
        self.scan(|d: &Document| d.source_id.as_ref().is_some_and(|s| s.as_str() == source_id))
    }

    /// The category a source is filed under.
    pub fn category_for_source(&self, source_id: &str) -> Option<&'a SourceCategory> {
        self.source(source_id)
            .and_then(|s| self.resolve_opt(s.category_id.as_ref()))
    }

    /// Sources filed directly under the category.
    pub fn sources_for_category(&self, category_id: &str) -> Vec<&'a Source> {
        self.scan(|s: &Source| s.category_id.as_ref().is_some_and(|c| c.as_str() == category_id))
    }

    /// Direct child categories, via `parentCategoryId`.
    pub fn sub_categories(&self, category_id: &str) -> Vec<&'a SourceCategory> {
        self.children_of(category_id, |c: &SourceCategory| c.parent_category_id.as_ref())
    }
}
