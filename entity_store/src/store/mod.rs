//! The entity store - the central structure holding every record collection.
//!
//! Collections are ordered sequences; insertion order is the canonical order
//! every reader sees. The store maintains the two materialised parent/child
//! pairs on mutation and notifies subscribers after each change.

mod error;
mod notify;

pub use error::*;
pub use notify::*;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, warn};

use crate::entities::{
    Document, EntityKind, Event, Faction, FactionOverlap, Location, Mission, Narrative,
    Organization, Person, Record, RecordId, Source, SourceCategory, SubNarrative,
};

/// All record collections, in canonical order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Dataset {
    pub missions: Vec<Mission>,
    pub narratives: Vec<Narrative>,
    pub sub_narratives: Vec<SubNarrative>,
    pub factions: Vec<Faction>,
    pub faction_overlaps: Vec<FactionOverlap>,
    pub locations: Vec<Location>,
    pub events: Vec<Event>,
    pub persons: Vec<Person>,
    pub organizations: Vec<Organization>,
    pub documents: Vec<Document>,
    pub sources: Vec<Source>,
    pub source_categories: Vec<SourceCategory>,
}

impl Dataset {
    /// Number of records of the given kind.
    pub fn count(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Mission => self.missions.len(),
            EntityKind::Narrative => self.narratives.len(),
            EntityKind::SubNarrative => self.sub_narratives.len(),
            EntityKind::Faction => self.factions.len(),
            EntityKind::FactionOverlap => self.faction_overlaps.len(),
            EntityKind::Location => self.locations.len(),
            EntityKind::Event => self.events.len(),
            EntityKind::Person => self.persons.len(),
            EntityKind::Organization => self.organizations.len(),
            EntityKind::Document => self.documents.len(),
            EntityKind::Source => self.sources.len(),
            EntityKind::SourceCategory => self.source_categories.len(),
        }
    }

    /// First id that appears twice within a single collection, if any.
    fn first_duplicate(&self) -> Option<(EntityKind, RecordId)> {
        duplicate_in(&self.missions)
            .or_else(|| duplicate_in(&self.narratives))
            .or_else(|| duplicate_in(&self.sub_narratives))
            .or_else(|| duplicate_in(&self.factions))
            .or_else(|| duplicate_in(&self.faction_overlaps))
            .or_else(|| duplicate_in(&self.locations))
            .or_else(|| duplicate_in(&self.events))
            .or_else(|| duplicate_in(&self.persons))
            .or_else(|| duplicate_in(&self.organizations))
            .or_else(|| duplicate_in(&self.documents))
            .or_else(|| duplicate_in(&self.sources))
            .or_else(|| duplicate_in(&self.source_categories))
    }
}

fn duplicate_in<T: Record>(records: &[T]) -> Option<(EntityKind, RecordId)> {
    let mut seen = HashSet::new();
    records
        .iter()
        .find(|record| !seen.insert(record.id().as_str()))
        .map(|record| (T::KIND, record.id().clone()))
}

/// A borrowed record of any kind, as returned by [`EntityStore::get_by_id`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RecordRef<'a> {
    Mission(&'a Mission),
    Narrative(&'a Narrative),
    SubNarrative(&'a SubNarrative),
    Faction(&'a Faction),
    FactionOverlap(&'a FactionOverlap),
    Location(&'a Location),
    Event(&'a Event),
    Person(&'a Person),
    Organization(&'a Organization),
    Document(&'a Document),
    Source(&'a Source),
    SourceCategory(&'a SourceCategory),
}

impl RecordRef<'_> {
    pub fn kind(&self) -> EntityKind {
        match self {
            RecordRef::Mission(_) => EntityKind::Mission,
            RecordRef::Narrative(_) => EntityKind::Narrative,
            RecordRef::SubNarrative(_) => EntityKind::SubNarrative,
            RecordRef::Faction(_) => EntityKind::Faction,
            RecordRef::FactionOverlap(_) => EntityKind::FactionOverlap,
            RecordRef::Location(_) => EntityKind::Location,
            RecordRef::Event(_) => EntityKind::Event,
            RecordRef::Person(_) => EntityKind::Person,
            RecordRef::Organization(_) => EntityKind::Organization,
            RecordRef::Document(_) => EntityKind::Document,
            RecordRef::Source(_) => EntityKind::Source,
            RecordRef::SourceCategory(_) => EntityKind::SourceCategory,
        }
    }

    pub fn id(&self) -> &RecordId {
        match self {
            RecordRef::Mission(r) => &r.id,
            RecordRef::Narrative(r) => &r.id,
            RecordRef::SubNarrative(r) => &r.id,
            RecordRef::Faction(r) => &r.id,
            RecordRef::FactionOverlap(r) => &r.id,
            RecordRef::Location(r) => &r.id,
            RecordRef::Event(r) => &r.id,
            RecordRef::Person(r) => &r.id,
            RecordRef::Organization(r) => &r.id,
            RecordRef::Document(r) => &r.id,
            RecordRef::Source(r) => &r.id,
            RecordRef::SourceCategory(r) => &r.id,
        }
    }
}

/// Owner of every record collection.
///
/// Readers borrow the store immutably; mutations go through `insert`,
/// `update`, `remove` or `replace_dataset`, each followed by a notification.
#[derive(Debug, Default)]
pub struct EntityStore {
    data: Dataset,
    subscribers: Subscribers,
}

impl EntityStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store over an existing dataset.
    pub fn from_dataset(data: Dataset) -> Result<Self> {
        if let Some((kind, id)) = data.first_duplicate() {
            warn!(%kind, %id, "rejecting dataset with duplicate record id");
            return Err(StoreError::DuplicateId { kind, id });
        }
        Ok(Self {
            data,
            subscribers: Subscribers::default(),
        })
    }

    /// Parse a dataset from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let data: Dataset = serde_json::from_str(json)?;
        Self::from_dataset(data)
    }

    /// Load a dataset from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Serialise the current dataset to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.data)?)
    }

    /// The current collections.
    pub fn dataset(&self) -> &Dataset {
        &self.data
    }

    /// Swap the whole dataset, notifying subscribers once.
    pub fn replace_dataset(&mut self, data: Dataset) -> Result<()> {
        if let Some((kind, id)) = data.first_duplicate() {
            warn!(%kind, %id, "rejecting dataset with duplicate record id");
            return Err(StoreError::DuplicateId { kind, id });
        }
        self.data = data;
        debug!("dataset replaced");
        self.subscribers.notify(&StoreChange::replaced());
        Ok(())
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Every record of type `T`, in canonical order.
    pub fn all<T: Record>(&self) -> &[T] {
        T::collection(&self.data)
    }

    /// Look up a record of type `T` by id.
    pub fn get<T: Record>(&self, id: &str) -> Option<&T> {
        T::collection(&self.data)
            .iter()
            .find(|record| record.id().as_str() == id)
    }

    /// Look up a record by collection kind and id.
    pub fn get_by_id(&self, kind: EntityKind, id: &str) -> Option<RecordRef<'_>> {
        match kind {
            EntityKind::Mission => self.get::<Mission>(id).map(RecordRef::Mission),
            EntityKind::Narrative => self.get::<Narrative>(id).map(RecordRef::Narrative),
            EntityKind::SubNarrative => self.get::<SubNarrative>(id).map(RecordRef::SubNarrative),
            EntityKind::Faction => self.get::<Faction>(id).map(RecordRef::Faction),
            EntityKind::FactionOverlap => {
                self.get::<FactionOverlap>(id).map(RecordRef::FactionOverlap)
            }
            EntityKind::Location => self.get::<Location>(id).map(RecordRef::Location),
            EntityKind::Event => self.get::<Event>(id).map(RecordRef::Event),
            EntityKind::Person => self.get::<Person>(id).map(RecordRef::Person),
            EntityKind::Organization => self.get::<Organization>(id).map(RecordRef::Organization),
            EntityKind::Document => self.get::<Document>(id).map(RecordRef::Document),
            EntityKind::Source => self.get::<Source>(id).map(RecordRef::Source),
            EntityKind::SourceCategory => {
                self.get::<SourceCategory>(id).map(RecordRef::SourceCategory)
            }
        }
    }

    pub fn contains<T: Record>(&self, id: &str) -> bool {
        self.get::<T>(id).is_some()
    }

    pub fn count<T: Record>(&self) -> usize {
        T::collection(&self.data).len()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add a record. An empty id is replaced by a fresh one.
    ///
    /// Returns the id the record was stored under.
    pub fn insert<T: Record>(&mut self, mut record: T) -> Result<RecordId> {
        if record.id().is_empty() {
            record.set_id(RecordId::new());
        }
        let id = record.id().clone();
        if self.contains::<T>(id.as_str()) {
            return Err(StoreError::DuplicateId { kind: T::KIND, id });
        }

        record.attach(&mut self.data);
        T::collection_mut(&mut self.data).push(record);

        let kind = T::KIND;
        debug!(%kind, %id, "record created");
        self.subscribers
            .notify(&StoreChange::record(ChangeOp::Created, T::KIND, id.clone()));
        Ok(id)
    }

    /// Replace the record with the same id, keeping its position.
    pub fn update<T: Record>(&mut self, record: T) -> Result<()> {
        let id = record.id().clone();
        let position = self.position_of::<T>(id.as_str())?;

        let previous = T::collection(&self.data)[position].clone();
        previous.detach(&mut self.data);
        record.attach(&mut self.data);
        T::collection_mut(&mut self.data)[position] = record;

        let kind = T::KIND;
        debug!(%kind, %id, "record updated");
        self.subscribers
            .notify(&StoreChange::record(ChangeOp::Updated, T::KIND, id));
        Ok(())
    }

    /// Remove a record by id, returning it.
    pub fn remove<T: Record>(&mut self, id: &str) -> Result<T> {
        let position = self.position_of::<T>(id)?;

        let removed = T::collection_mut(&mut self.data).remove(position);
        removed.detach(&mut self.data);
        removed.on_removed(&mut self.data);

        let kind = T::KIND;
        let id = removed.id().clone();
        debug!(%kind, %id, "record removed");
        self.subscribers
            .notify(&StoreChange::record(ChangeOp::Removed, kind, id));
        Ok(removed)
    }

    fn position_of<T: Record>(&self, id: &str) -> Result<usize> {
        T::collection(&self.data)
            .iter()
            .position(|record| record.id().as_str() == id)
            .ok_or_else(|| StoreError::NotFound {
                kind: T::KIND,
                id: RecordId::from(id),
            })
    }

    // =========================================================================
    // Subscriptions
    // =========================================================================

    /// Register a listener called after every successful mutation.
    pub fn subscribe(&mut self, listener: impl Fn(&StoreChange) + 'static) -> SubscriptionId {
        self.subscribers.add(Box::new(listener))
    }

    /// Returns whether the subscription existed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.remove(id)
    }
}
