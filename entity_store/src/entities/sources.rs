//! Documents and the sources they come from.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{EntityKind, Record, RecordId};
use crate::store::Dataset;

/// A published item (article, post, transcript) that evidences narratives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<RecordId>,
    #[serde(default)]
    pub excerpt: String,

    #[serde(default)]
    pub narrative_ids: Vec<RecordId>,
    #[serde(default)]
    pub sub_narrative_ids: Vec<RecordId>,
    #[serde(default)]
    pub person_ids: Vec<RecordId>,
    #[serde(default)]
    pub organization_ids: Vec<RecordId>,
    #[serde(default)]
    pub location_ids: Vec<RecordId>,
    #[serde(default)]
    pub event_ids: Vec<RecordId>,
}

impl Document {
    pub fn new(id: impl Into<RecordId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            url: String::new(),
            published_date: None,
            source_id: None,
            excerpt: String::new(),
            narrative_ids: Vec::new(),
            sub_narrative_ids: Vec::new(),
            person_ids: Vec::new(),
            organization_ids: Vec::new(),
            location_ids: Vec::new(),
            event_ids: Vec::new(),
        }
    }

    pub fn with_source(mut self, source_id: impl Into<RecordId>) -> Self {
        self.source_id = Some(source_id.into());
        self
    }

    pub fn with_narrative(mut self, narrative_id: impl Into<RecordId>) -> Self {
        self.narrative_ids.push(narrative_id.into());
        self
    }

    pub fn with_sub_narrative(mut self, sub_narrative_id: impl Into<RecordId>) -> Self {
        self.sub_narrative_ids.push(sub_narrative_id.into());
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

    pub fn with_location(mut self, location_id: impl Into<RecordId>) -> Self {
        self.location_ids.push(location_id.into());
        self
    }

    pub fn with_event(mut self, event_id: impl Into<RecordId>) -> Self {
        self.event_ids.push(event_id.into());
        self
    }
}

impl Record for Document {
    const KIND: EntityKind = EntityKind::Document;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn collection(data: &Dataset) -> &[Self] {
        &data.documents
    }

    fn collection_mut(data: &mut Dataset) -> &mut Vec<Self> {
        &mut data.documents
    }
}

/// A publisher or channel that documents and volumes are attributed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub color: String,
    #[serde(rename = "type", default)]
    pub source_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<RecordId>,
}

impl Source {
    pub fn new(id: impl Into<RecordId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: String::new(),
            source_type: String::new(),
            category_id: None,
        }
    }

    pub fn with_category(mut self, category_id: impl Into<RecordId>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }
}

impl Record for Source {
    const KIND: EntityKind = EntityKind::Source;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn collection(data: &Dataset) -> &[Self] {
        &data.sources
    }

    fn collection_mut(data: &mut Dataset) -> &mut Vec<Self> {
        &mut data.sources
    }
}

/// Grouping of sources, optionally nested under a parent category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceCategory {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_category_id: Option<RecordId>,
}

impl SourceCategory {
    pub fn new(id: impl Into<RecordId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: String::new(),
            parent_category_id: None,
        }
    }
}

impl Record for SourceCategory {
    const KIND: EntityKind = EntityKind::SourceCategory;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn collection(data: &Dataset) -> &[Self] {
        &data.source_categories
    }

    fn collection_mut(data: &mut Dataset) -> &mut Vec<Self> {
        &mut data.source_categories
    }
}
