//! Record definitions for every collection the store holds.
//!
//! Relationships are forward references kept as id lists (or id-keyed maps)
//! on the owning side only. Reverse lookups are the query layer's job.

mod actors;
mod narrative;
mod sentiment;
mod sources;
mod world;

pub use actors::*;
pub use narrative::*;
pub use sentiment::*;
pub use sources::*;
pub use world::*;

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use uuid::Uuid;

use crate::store::Dataset;

/// Unique identifier for any record. Ids are opaque strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl RecordId {
    /// Create a new random record ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Borrow<str> for RecordId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for RecordId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for RecordId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The twelve record kinds held by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityKind {
    Mission,
    Narrative,
    SubNarrative,
    Faction,
    FactionOverlap,
    Location,
    Event,
    Person,
    Organization,
    Document,
    Source,
    SourceCategory,
}

impl EntityKind {
    pub const ALL: [EntityKind; 12] = [
        EntityKind::Mission,
        EntityKind::Narrative,
        EntityKind::SubNarrative,
        EntityKind::Faction,
        EntityKind::FactionOverlap,
        EntityKind::Location,
        EntityKind::Event,
        EntityKind::Person,
        EntityKind::Organization,
        EntityKind::Document,
        EntityKind::Source,
        EntityKind::SourceCategory,
    ];

    /// Name of the collection holding records of this kind.
    pub fn collection_name(&self) -> &'static str {
        match self {
            EntityKind::Mission => "missions",
            EntityKind::Narrative => "narratives",
            EntityKind::SubNarrative => "subNarratives",
            EntityKind::Faction => "factions",
            EntityKind::FactionOverlap => "factionOverlaps",
            EntityKind::Location => "locations",
            EntityKind::Event => "events",
            EntityKind::Person => "persons",
            EntityKind::Organization => "organizations",
            EntityKind::Document => "documents",
            EntityKind::Source => "sources",
            EntityKind::SourceCategory => "sourceCategories",
        }
    }

    /// Resolve a collection name back to its kind.
    pub fn from_collection_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.collection_name() == name)
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.collection_name())
    }
}

/// A record living in one of the store's collections.
///
/// The hook methods keep the two materialised parent/child pairs
/// (narrative/sub-narrative, event/sub-event) consistent on mutation. Every
/// other relationship is one-directional and left alone.
pub trait Record: Clone + 'static {
    const KIND: EntityKind;

    fn id(&self) -> &RecordId;

    fn set_id(&mut self, id: RecordId);

    fn collection(data: &Dataset) -> &[Self];

    fn collection_mut(data: &mut Dataset) -> &mut Vec<Self>;

    /// Register this record in its parent's child list.
    fn attach(&self, _data: &mut Dataset) {}

    /// Remove this record from its parent's child list.
    fn detach(&self, _data: &mut Dataset) {}

    /// Clean up records that depended on this one after it was removed.
    fn on_removed(&self, _data: &mut Dataset) {}
}

/// Membership test used for id-list forward references.
pub fn references(ids: &[RecordId], id: &str) -> bool {
    ids.iter().any(|candidate| candidate.as_str() == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_generation() {
        let a = RecordId::new();
        let b = RecordId::new();
        assert_ne!(a, b);
        assert!(!a.is_empty());
    }

    #[test]
    fn test_default_record_id_is_fresh() {
        let a = RecordId::default();
        let b = RecordId::default();
        assert!(!a.is_empty());
        assert_ne!(a, b);
    }

    #[test]
    fn test_record_id_borrow_lookup() {
        use std::collections::BTreeMap;

        let mut map = BTreeMap::new();
        map.insert(RecordId::from("f1"), 10u64);
        assert_eq!(map.get("f1"), Some(&10));
        assert!(map.get("f2").is_none());
    }

    #[test]
    fn test_record_id_serializes_as_plain_string() {
        let id = RecordId::from("n-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"n-1\"");
    }

    #[test]
    fn test_collection_name_round_trip() {
        for kind in EntityKind::ALL {
            assert_eq!(EntityKind::from_collection_name(kind.collection_name()), Some(kind));
        }
        assert_eq!(EntityKind::from_collection_name("widgets"), None);
    }
}
