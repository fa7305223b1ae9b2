//! Node and link types of the co-occurrence graph.

use entity_store::{Narrative, RecordId, SubNarrative};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Person,
    Organization,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: RecordId,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
}

/// Link type, derived from the kinds of its two endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinkKind {
    PersonPerson,
    OrgOrg,
    PersonOrg,
}

impl LinkKind {
    pub fn between(a: NodeKind, b: NodeKind) -> Self {
        match (a, b) {
            (NodeKind::Person, NodeKind::Person) => LinkKind::PersonPerson,
            (NodeKind::Organization, NodeKind::Organization) => LinkKind::OrgOrg,
            _ => LinkKind::PersonOrg,
        }
    }
}

/// A narrative or sub-narrative both endpoints of a link appear in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "record", rename_all = "camelCase")]
pub enum SharedNarrative {
    Narrative(Narrative),
    SubNarrative(SubNarrative),
}

impl SharedNarrative {
    pub fn id(&self) -> &RecordId {
        match self {
            SharedNarrative::Narrative(narrative) => &narrative.id,
            SharedNarrative::SubNarrative(sub) => &sub.id,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            SharedNarrative::Narrative(narrative) => &narrative.text,
            SharedNarrative::SubNarrative(sub) => &sub.text,
        }
    }
}

/// An undirected link. `source` precedes `target` in node order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphLink {
    pub source: RecordId,
    pub target: RecordId,
    #[serde(rename = "type")]
    pub kind: LinkKind,
    pub narratives: Vec<SharedNarrative>,
    /// Number of shared narratives and sub-narratives.
    pub strength: usize,
}

impl GraphLink {
    pub fn connects(&self, a: &str, b: &str) -> bool {
        (self.source.as_str() == a && self.target.as_str() == b)
            || (self.source.as_str() == b && self.target.as_str() == a)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NetworkGraph {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
}

impl NetworkGraph {
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|node| node.id.as_str() == id)
    }

    /// The link between two nodes, in either direction.
    pub fn link_between(&self, a: &str, b: &str) -> Option<&GraphLink> {
        self.links.iter().find(|link| link.connects(a, b))
    }

    /// Links touching `id`.
    pub fn links_of<'g>(&'g self, id: &'g str) -> impl Iterator<Item = &'g GraphLink> + 'g {
        self.links
            .iter()
            .filter(move |link| link.source.as_str() == id || link.target.as_str() == id)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
