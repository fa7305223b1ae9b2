//! Owned dashboard results.

use entity_store::{Location, Narrative, NarrativeStatus};
use serde::{Deserialize, Serialize};

/// Entity counts for the dashboard header, plus the loudest narratives.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub narratives: usize,
    pub sub_narratives: usize,
    pub factions: usize,
    pub locations: usize,
    pub events: usize,
    pub persons: usize,
    pub organizations: usize,
    pub top_narratives: Vec<RankedNarrative>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedNarrative {
    pub narrative: Narrative,
    /// Mention volume summed over factions that still exist.
    pub total_volume: u64,
}

/// Narrative tally per status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct StatusCounts {
    pub new: usize,
    pub in_progress: usize,
    pub under_investigation: usize,
    pub resolved: usize,
}

impl StatusCounts {
    pub fn get(&self, status: NarrativeStatus) -> usize {
        match status {
            NarrativeStatus::New => self.new,
            NarrativeStatus::InProgress => self.in_progress,
            NarrativeStatus::UnderInvestigation => self.under_investigation,
            NarrativeStatus::Resolved => self.resolved,
        }
    }

    pub fn increment(&mut self, status: NarrativeStatus) {
        let slot = match status {
            NarrativeStatus::New => &mut self.new,
            NarrativeStatus::InProgress => &mut self.in_progress,
            NarrativeStatus::UnderInvestigation => &mut self.under_investigation,
            NarrativeStatus::Resolved => &mut self.resolved,
        };
        *slot += 1;
    }

    pub fn total(&self) -> usize {
        NarrativeStatus::ALL.iter().map(|status| self.get(*status)).sum()
    }
}

/// How a location came to be on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationOrigin {
    /// Referenced only by narratives.
    Narrative,
    /// Referenced only through events.
    Event,
    Both,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationSummary {
    pub location: Location,
    pub narrative_count: usize,
    pub event_count: usize,
    pub origin: LocationOrigin,
}
