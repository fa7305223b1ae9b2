//! Mission scoping.

use entity_store::{Narrative, RecordId};
use serde::{Deserialize, Serialize};

/// Sentinel mission id meaning "every mission".
pub const ALL_MISSIONS: &str = "all";

/// Which narratives a query looks at.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MissionScope {
    #[default]
    All,
    Mission(RecordId),
}

impl MissionScope {
    /// Parse a mission id, treating `"all"` as the unfiltered scope.
    pub fn parse(mission_id: &str) -> Self {
        if mission_id == ALL_MISSIONS {
            MissionScope::All
        } else {
            MissionScope::Mission(RecordId::from(mission_id))
        }
    }

    pub fn includes(&self, narrative: &Narrative) -> bool {
        match self {
            MissionScope::All => true,
            MissionScope::Mission(id) => narrative.mission_id.as_ref() == Some(id),
        }
    }
}

impl From<&str> for MissionScope {
    fn from(mission_id: &str) -> Self {
        Self::parse(mission_id)
    }
}

impl std::fmt::Display for MissionScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MissionScope::All => write!(f, "{}", ALL_MISSIONS),
            MissionScope::Mission(id) => write!(f, "{}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_sentinel() {
        assert_eq!(MissionScope::parse("all"), MissionScope::All);
        assert_eq!(
            MissionScope::from("m1"),
            MissionScope::Mission(RecordId::from("m1"))
        );
    }

    #[test]
    fn test_includes() {
        let filed = Narrative::new("n1", "Filed").with_mission("m1");
        let unfiled = Narrative::new("n2", "Unfiled");

        assert!(MissionScope::All.includes(&filed));
        assert!(MissionScope::All.includes(&unfiled));
        assert!(MissionScope::parse("m1").includes(&filed));
        assert!(!MissionScope::parse("m1").includes(&unfiled));
        assert!(!MissionScope::parse("m2").includes(&filed));
    }
}
