//! Narratives and sub-narratives.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

use super::{EntityKind, Record, RecordId, Sentiment};
use crate::store::Dataset;

/// Investigation status of a narrative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NarrativeStatus {
    #[default]
    New,
    InProgress,
    UnderInvestigation,
    Resolved,
}

impl NarrativeStatus {
    pub const ALL: [NarrativeStatus; 4] = [
        NarrativeStatus::New,
        NarrativeStatus::InProgress,
        NarrativeStatus::UnderInvestigation,
        NarrativeStatus::Resolved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NarrativeStatus::New => "new",
            NarrativeStatus::InProgress => "in_progress",
            NarrativeStatus::UnderInvestigation => "under_investigation",
            NarrativeStatus::Resolved => "resolved",
        }
    }
}

/// How much a faction talks about a narrative, and how it feels about it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct FactionMention {
    #[serde(default)]
    pub volume: u64,
    #[serde(default)]
    pub sentiment: Sentiment,
}

/// One date bucket of a volume-over-time series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumePoint {
    pub date: NaiveDate,
    /// Faction ID -> mention count on this date.
    #[serde(default)]
    pub faction_volumes: BTreeMap<RecordId, u64>,
    /// Source ID -> mention count on this date.
    #[serde(default)]
    pub source_volumes: BTreeMap<RecordId, u64>,
}

impl VolumePoint {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            faction_volumes: BTreeMap::new(),
            source_volumes: BTreeMap::new(),
        }
    }

    pub fn with_faction(mut self, faction_id: impl Into<RecordId>, volume: u64) -> Self {
        self.faction_volumes.insert(faction_id.into(), volume);
        self
    }

    pub fn with_source(mut self, source_id: impl Into<RecordId>, volume: u64) -> Self {
        self.source_volumes.insert(source_id.into(), volume);
        self
    }
}

/// A tracked claim or story.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Narrative {
    pub id: RecordId,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<NarrativeStatus>,
    #[serde(default)]
    pub sentiment: Sentiment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mission_id: Option<RecordId>,
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,

    /// Faction ID -> mention summary.
    #[serde(default)]
    pub faction_mentions: BTreeMap<RecordId, FactionMention>,
    /// Source ID -> total mention count.
    #[serde(default)]
    pub source_volumes: BTreeMap<RecordId, u64>,
    /// Faction ID -> (Source ID -> mention count).
    #[serde(default)]
    pub faction_sources: BTreeMap<RecordId, BTreeMap<RecordId, u64>>,
    /// Date-ascending buckets, one per date.
    #[serde(default)]
    pub volume_over_time: Vec<VolumePoint>,

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
    #[serde(default)]
    pub document_ids: Vec<RecordId>,
}

impl Narrative {
    /// Create a new narrative with the given text.
    pub fn new(id: impl Into<RecordId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            status: None,
            sentiment: Sentiment::default(),
            mission_id: None,
            created_at: None,
            faction_mentions: BTreeMap::new(),
            source_volumes: BTreeMap::new(),
            faction_sources: BTreeMap::new(),
            volume_over_time: Vec::new(),
            sub_narrative_ids: Vec::new(),
            person_ids: Vec::new(),
            organization_ids: Vec::new(),
            location_ids: Vec::new(),
            event_ids: Vec::new(),
            document_ids: Vec::new(),
        }
    }

    pub fn with_mission(mut self, mission_id: impl Into<RecordId>) -> Self {
        self.mission_id = Some(mission_id.into());
        self
    }

    pub fn with_status(mut self, status: NarrativeStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    pub fn with_faction_mention(
        mut self,
        faction_id: impl Into<RecordId>,
        volume: u64,
        sentiment: impl Into<Sentiment>,
    ) -> Self {
        self.faction_mentions.insert(
            faction_id.into(),
            FactionMention {
                volume,
                sentiment: sentiment.into(),
            },
        );
        self
    }

    pub fn with_volume_point(mut self, point: VolumePoint) -> Self {
        self.volume_over_time.push(point);
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

    /// Status, with an absent value read as [`NarrativeStatus::New`].
    pub fn effective_status(&self) -> NarrativeStatus {
        self.status.unwrap_or_default()
    }

    /// Sum of mention volume over every faction.
    pub fn total_mention_volume(&self) -> u64 {
        self.faction_mentions
            .values()
            .fold(0u64, |total, mention| total.saturating_add(mention.volume))
    }

    /// The date used for time filtering: `created_at`, else the first bucket.
    pub fn reference_date(&self) -> Option<DateTime<Utc>> {
        self.created_at.or_else(|| {
            self.volume_over_time
                .first()
                .and_then(|point| point.date.and_hms_opt(0, 0, 0))
                .map(|naive| naive.and_utc())
        })
    }
}

impl Record for Narrative {
    const KIND: EntityKind = EntityKind::Narrative;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn collection(data: &Dataset) -> &[Self] {
        &data.narratives
    }

    fn collection_mut(data: &mut Dataset) -> &mut Vec<Self> {
        &mut data.narratives
    }

    fn on_removed(&self, data: &mut Dataset) {
        data.sub_narratives
            .retain(|sub| sub.parent_narrative_id.as_ref() != Some(&self.id));
    }
}

/// A finer-grained theme scoped to one parent narrative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubNarrative {
    pub id: RecordId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_narrative_id: Option<RecordId>,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<NarrativeStatus>,
    #[serde(default)]
    pub sentiment: Sentiment,
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub faction_mentions: BTreeMap<RecordId, FactionMention>,
    #[serde(default)]
    pub source_volumes: BTreeMap<RecordId, u64>,
    #[serde(default)]
    pub faction_sources: BTreeMap<RecordId, BTreeMap<RecordId, u64>>,
    #[serde(default)]
    pub volume_over_time: Vec<VolumePoint>,

    #[serde(default)]
    pub person_ids: Vec<RecordId>,
    #[serde(default)]
    pub organization_ids: Vec<RecordId>,
    #[serde(default)]
    pub location_ids: Vec<RecordId>,
    #[serde(default)]
    pub event_ids: Vec<RecordId>,
}

impl SubNarrative {
    pub fn new(
        id: impl Into<RecordId>,
        parent_narrative_id: impl Into<RecordId>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            parent_narrative_id: Some(parent_narrative_id.into()),
            text: text.into(),
            status: None,
            sentiment: Sentiment::default(),
            created_at: None,
            faction_mentions: BTreeMap::new(),
            source_volumes: BTreeMap::new(),
            faction_sources: BTreeMap::new(),
            volume_over_time: Vec::new(),
            person_ids: Vec::new(),
            organization_ids: Vec::new(),
            location_ids: Vec::new(),
            event_ids: Vec::new(),
        }
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

    pub fn effective_status(&self) -> NarrativeStatus {
        self.status.unwrap_or_default()
    }
}

impl Record for SubNarrative {
    const KIND: EntityKind = EntityKind::SubNarrative;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn collection(data: &Dataset) -> &[Self] {
        &data.sub_narratives
    }

    fn collection_mut(data: &mut Dataset) -> &mut Vec<Self> {
        &mut data.sub_narratives
    }

    fn attach(&self, data: &mut Dataset) {
        let Some(parent_id) = &self.parent_narrative_id else {
            return;
        };
        if let Some(parent) = data.narratives.iter_mut().find(|n| &n.id == parent_id) {
            if !parent.sub_narrative_ids.contains(&self.id) {
                parent.sub_narrative_ids.push(self.id.clone());
            }
        }
    }

    fn detach(&self, data: &mut Dataset) {
        let Some(parent_id) = &self.parent_narrative_id else {
            return;
        };
        if let Some(parent) = data.narratives.iter_mut().find(|n| &n.id == parent_id) {
            parent.sub_narrative_ids.retain(|id| id != &self.id);
        }
    }
}

/// Reads an RFC 3339 timestamp or a bare `YYYY-MM-DD` date (taken as UTC
/// midnight). Anything else is logged and read as absent.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if let Ok(instant) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(Some(instant.with_timezone(&Utc)));
    }
    if let Some(midnight) = NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Ok(Some(midnight.and_utc()));
    }
    warn!(value = %raw, "ignoring unparseable createdAt");
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_defaults_to_new() {
        let narrative = Narrative::new("n1", "Grain prices are being manipulated");
        assert!(narrative.status.is_none());
        assert_eq!(narrative.effective_status(), NarrativeStatus::New);
    }

    #[test]
    fn test_total_mention_volume() {
        let narrative = Narrative::new("n1", "Test")
            .with_faction_mention("f1", 10, 0.2)
            .with_faction_mention("f2", 32, -0.5);
        assert_eq!(narrative.total_mention_volume(), 42);
    }

    #[test]
    fn test_reference_date_falls_back_to_first_bucket() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let narrative = Narrative::new("n1", "Test").with_volume_point(VolumePoint::new(date));
        assert_eq!(
            narrative.reference_date().map(|d| d.date_naive()),
            Some(date)
        );

        assert!(Narrative::new("n2", "Undated").reference_date().is_none());
    }

    #[test]
    fn test_narrative_deserializes_with_missing_fields() {
        let json = r#"{
            "id": "n1",
            "text": "Water supply contaminated",
            "status": "under_investigation",
            "sentiment": "negative",
            "volumeOverTime": [
                {"date": "2024-01-01", "factionVolumes": {"f1": 4}}
            ]
        }"#;

        let narrative: Narrative = serde_json::from_str(json).unwrap();
        assert_eq!(narrative.effective_status(), NarrativeStatus::UnderInvestigation);
        assert_eq!(narrative.sentiment.score(), -1.0);
        assert!(narrative.person_ids.is_empty());
        assert!(narrative.faction_mentions.is_empty());
        assert_eq!(narrative.volume_over_time[0].faction_volumes.get("f1"), Some(&4));
        assert!(narrative.volume_over_time[0].source_volumes.is_empty());
    }

    #[test]
    fn test_created_at_accepts_bare_date() {
        let narrative: Narrative =
            serde_json::from_str(r#"{"id": "n1", "text": "T", "createdAt": "2024-01-05"}"#).unwrap();
        let expected = NaiveDate::from_ymd_opt(2024, 1, 5)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|d| d.and_utc());
        assert_eq!(narrative.created_at, expected);

        let sub: SubNarrative = serde_json::from_str(
            r#"{"id": "s1", "parentNarrativeId": "n1", "text": "T", "createdAt": "2024-01-05"}"#,
        )
        .unwrap();
        assert_eq!(sub.created_at, expected);
    }

    #[test]
    fn test_created_at_accepts_rfc3339() {
        let narrative: Narrative = serde_json::from_str(
            r#"{"id": "n1", "text": "T", "createdAt": "2024-01-05T11:30:00+02:00"}"#,
        )
        .unwrap();
        let created = narrative.created_at.unwrap();
        assert_eq!(created.to_rfc3339(), "2024-01-05T09:30:00+00:00");

        let encoded = serde_json::to_string(&narrative).unwrap();
        let decoded: Narrative = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded.created_at, Some(created));
    }

    #[test]
    fn test_created_at_unparseable_or_null_is_absent() {
        let garbled: Narrative =
            serde_json::from_str(r#"{"id": "n1", "text": "T", "createdAt": "last week"}"#).unwrap();
        assert!(garbled.created_at.is_none());

        let null: Narrative =
            serde_json::from_str(r#"{"id": "n1", "text": "T", "createdAt": null}"#).unwrap();
        assert!(null.created_at.is_none());
    }
}
