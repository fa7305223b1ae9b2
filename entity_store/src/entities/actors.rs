//! Factions and the people and organizations affiliated with them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{EntityKind, Record, RecordId, Sentiment};
use crate::store::Dataset;

/// A grouping of public actors sharing a stance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Faction {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub member_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub related_faction_ids: Vec<RecordId>,
    #[serde(default)]
    pub affiliated_person_ids: Vec<RecordId>,
    #[serde(default)]
    pub affiliated_organization_ids: Vec<RecordId>,
}

impl Faction {
    pub fn new(id: impl Into<RecordId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: String::new(),
            member_count: 0,
            description: None,
            related_faction_ids: Vec::new(),
            affiliated_person_ids: Vec::new(),
            affiliated_organization_ids: Vec::new(),
        }
    }

    pub fn with_related_faction(mut self, faction_id: impl Into<RecordId>) -> Self {
        self.related_faction_ids.push(faction_id.into());
        self
    }
}

impl Record for Faction {
    const KIND: EntityKind = EntityKind::Faction;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn collection(data: &Dataset) -> &[Self] {
        &data.factions
    }

    fn collection_mut(data: &mut Dataset) -> &mut Vec<Self> {
        &mut data.factions
    }
}

/// Recorded shared membership between two or more factions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactionOverlap {
    pub id: RecordId,
    #[serde(default)]
    pub faction_ids: Vec<RecordId>,
    #[serde(default)]
    pub overlap_size: u64,
    /// Narrative ID -> sentiment shared by the overlapping members.
    #[serde(default)]
    pub shared_sentiment: BTreeMap<RecordId, Sentiment>,
}

impl FactionOverlap {
    pub fn new(id: impl Into<RecordId>, faction_ids: Vec<RecordId>, overlap_size: u64) -> Self {
        Self {
            id: id.into(),
            faction_ids,
            overlap_size,
            shared_sentiment: BTreeMap::new(),
        }
    }
}

impl Record for FactionOverlap {
    const KIND: EntityKind = EntityKind::FactionOverlap;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn collection(data: &Dataset) -> &[Self] {
        &data.faction_overlaps
    }

    fn collection_mut(data: &mut Dataset) -> &mut Vec<Self> {
        &mut data.faction_overlaps
    }
}

/// A named individual.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: RecordId,
    pub name: String,
    #[serde(rename = "type", default)]
    pub person_type: String,
    /// Faction ID -> sentiment toward that faction.
    #[serde(default)]
    pub faction_sentiment: BTreeMap<RecordId, Sentiment>,

    #[serde(default)]
    pub affiliated_faction_ids: Vec<RecordId>,
    #[serde(default)]
    pub related_location_ids: Vec<RecordId>,
    #[serde(default)]
    pub related_event_ids: Vec<RecordId>,
}

impl Person {
    pub fn new(id: impl Into<RecordId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            person_type: String::new(),
            faction_sentiment: BTreeMap::new(),
            affiliated_faction_ids: Vec::new(),
            related_location_ids: Vec::new(),
            related_event_ids: Vec::new(),
        }
    }

    pub fn with_faction(mut self, faction_id: impl Into<RecordId>) -> Self {
        self.affiliated_faction_ids.push(faction_id.into());
        self
    }

    pub fn with_location(mut self, location_id: impl Into<RecordId>) -> Self {
        self.related_location_ids.push(location_id.into());
        self
    }

    pub fn with_event(mut self, event_id: impl Into<RecordId>) -> Self {
        self.related_event_ids.push(event_id.into());
        self
    }
}

impl Record for Person {
    const KIND: EntityKind = EntityKind::Person;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn collection(data: &Dataset) -> &[Self] {
        &data.persons
    }

    fn collection_mut(data: &mut Dataset) -> &mut Vec<Self> {
        &mut data.persons
    }
}

/// A company, agency, outlet or other collective actor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: RecordId,
    pub name: String,
    #[serde(rename = "type", default)]
    pub organization_type: String,
    #[serde(default)]
    pub faction_sentiment: BTreeMap<RecordId, Sentiment>,

    #[serde(default)]
    pub affiliated_faction_ids: Vec<RecordId>,
    #[serde(default)]
    pub related_location_ids: Vec<RecordId>,
}

impl Organization {
    pub fn new(id: impl Into<RecordId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            organization_type: String::new(),
            faction_sentiment: BTreeMap::new(),
            affiliated_faction_ids: Vec::new(),
            related_location_ids: Vec::new(),
        }
    }

    pub fn with_faction(mut self, faction_id: impl Into<RecordId>) -> Self {
        self.affiliated_faction_ids.push(faction_id.into());
        self
    }

    pub fn with_location(mut self, location_id: impl Into<RecordId>) -> Self {
        self.related_location_ids.push(location_id.into());
        self
    }
}

impl Record for Organization {
    const KIND: EntityKind = EntityKind::Organization;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn collection(data: &Dataset) -> &[Self] {
        &data.organizations
    }

    fn collection_mut(data: &mut Dataset) -> &mut Vec<Self> {
        &mut data.organizations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_type_uses_wire_name() {
        let json = r#"{"id": "p1", "name": "Ada Vance", "type": "journalist",
                       "factionSentiment": {"f1": 0.5, "f2": "negative"}}"#;
        let person: Person = serde_json::from_str(json).unwrap();

        assert_eq!(person.person_type, "journalist");
        assert_eq!(person.faction_sentiment.get("f2").map(Sentiment::score), Some(-1.0));
        assert!(person.affiliated_faction_ids.is_empty());
    }

    #[test]
    fn test_faction_builder() {
        let faction = Faction::new("f1", "Reformists").with_related_faction("f2");
        assert_eq!(faction.related_faction_ids, vec![RecordId::from("f2")]);
        assert_eq!(faction.member_count, 0);
    }
}
