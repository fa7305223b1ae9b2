//! Missions, locations and events.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{EntityKind, Record, RecordId};
use crate::store::Dataset;

/// A top-level analytical goal that narratives are filed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mission {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Mission {
    pub fn new(id: impl Into<RecordId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: String::new(),
            description: None,
        }
    }
}

impl Record for Mission {
    const KIND: EntityKind = EntityKind::Mission;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn collection(data: &Dataset) -> &[Self] {
        &data.missions
    }

    fn collection_mut(data: &mut Dataset) -> &mut Vec<Self> {
        &mut data.missions
    }
}

/// Geographic coordinates in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// A place in the world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub coordinates: Coordinates,
    #[serde(rename = "type", default)]
    pub location_type: String,
}

impl Location {
    pub fn new(id: impl Into<RecordId>, name: impl Into<String>, coordinates: Coordinates) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            coordinates,
            location_type: String::new(),
        }
    }
}

impl Record for Location {
    const KIND: EntityKind = EntityKind::Location;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn collection(data: &Dataset) -> &[Self] {
        &data.locations
    }

    fn collection_mut(data: &mut Dataset) -> &mut Vec<Self> {
        &mut data.locations
    }
}

/// Something that happened, optionally nested under a parent event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: RecordId,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_event_id: Option<RecordId>,

    #[serde(default)]
    pub sub_event_ids: Vec<RecordId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_id: Option<RecordId>,
    #[serde(default)]
    pub person_ids: Vec<RecordId>,
    #[serde(default)]
    pub organization_ids: Vec<RecordId>,
}

impl Event {
    pub fn new(id: impl Into<RecordId>, text: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            date: Some(date),
            parent_event_id: None,
            sub_event_ids: Vec::new(),
            location_id: None,
            person_ids: Vec::new(),
            organization_ids: Vec::new(),
        }
    }

    pub fn with_parent(mut self, parent_event_id: impl Into<RecordId>) -> Self {
        self.parent_event_id = Some(parent_event_id.into());
        self
    }

    pub fn with_location(mut self, location_id: impl Into<RecordId>) -> Self {
        self.location_id = Some(location_id.into());
        self
    }

    pub fn with_person(mut self, person_id: impl Into<RecordId>) -> Self {
        self.person_ids.push(person_id.into());
        self
    }

    pub fn with_organization(mut self, organization_id: impl Into<RecordId>) -> Self {
        self.organization_ids.push(organization_id.into());
        self
    }

    /// Top-level events have no parent.
    pub fn is_top_level(&self) -> bool {
        self.parent_event_id.is_none()
    }
}

impl Record for Event {
    const KIND: EntityKind = EntityKind::Event;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn collection(data: &Dataset) -> &[Self] {
        &data.events
    }

    fn collection_mut(data: &mut Dataset) -> &mut Vec<Self> {
        &mut data.events
    }

    fn attach(&self, data: &mut Dataset) {
        let Some(parent_id) = &self.parent_event_id else {
            return;
        };
        if let Some(parent) = data.events.iter_mut().find(|e| &e.id == parent_id) {
            if !parent.sub_event_ids.contains(&self.id) {
                parent.sub_event_ids.push(self.id.clone());
            }
        }
    }

    fn detach(&self, data: &mut Dataset) {
        let Some(parent_id) = &self.parent_event_id else {
            return;
        };
        if let Some(parent) = data.events.iter_mut().find(|e| &e.id == parent_id) {
            parent.sub_event_ids.retain(|id| id != &self.id);
        }
    }

    fn on_removed(&self, data: &mut Dataset) {
        // Orphaned sub-events become top-level events.
        for event in data.events.iter_mut() {
            if event.parent_event_id.as_ref() == Some(&self.id) {
                event.parent_event_id = None;
            }
        }
    }
}
