//! Network Graph Builder - people and organizations linked by the narratives
//! they share.
//!
//! Nodes are the requested persons (in input order) followed by the requested
//! organizations (in input order); unknown and repeated ids are dropped, and
//! an id requested in both roles becomes a single person node. Every
//! unordered pair of nodes is visited once, so a pair yields at most one link
//! and never a self-loop.

mod graph;

pub use graph::*;

use std::collections::{BTreeSet, HashSet};

use entity_store::{EntityStore, Narrative, RecordId, SubNarrative};
use tracing::debug;

use crate::resolver::RelationshipResolver;
use crate::scope::MissionScope;
use crate::time_range::TimeRange;

/// Builds co-occurrence graphs from an [`EntityStore`].
#[derive(Debug, Clone, Copy)]
pub struct NetworkGraphBuilder<'a> {
    resolver: RelationshipResolver<'a>,
}

/// A node together with the narratives and sub-narratives it appears in,
/// as indices into their collections.
struct Membership {
    node: GraphNode,
    narratives: BTreeSet<usize>,
    sub_narratives: BTreeSet<usize>,
}

impl<'a> NetworkGraphBuilder<'a> {
    pub fn new(store: &'a EntityStore) -> Self {
        Self {
            resolver: RelationshipResolver::new(store),
        }
    }

    /// Graph over the given persons and organizations.
    pub fn build<P, O>(&self, person_ids: &[P], organization_ids: &[O]) -> NetworkGraph
    where
        P: AsRef<str>,
        O: AsRef<str>,
    {
        let store = self.resolver.store();
        let narratives = store.all::<Narrative>();
        let sub_narratives = store.all::<SubNarrative>();

        let members = self.members(person_ids, organization_ids, narratives, sub_narratives);

        let mut links = Vec::new();
        for i in 0..members.len() {
            for j in (i + 1)..members.len() {
                let (a, b) = (&members[i], &members[j]);
                let shared: Vec<SharedNarrative> = a
                    .narratives
                    .intersection(&b.narratives)
                    .map(|&index| SharedNarrative::Narrative(narratives[index].clone()))
                    .chain(
                        a.sub_narratives
                            .intersection(&b.sub_narratives)
                            .map(|&index| {
                                SharedNarrative::SubNarrative(sub_narratives[index].clone())
                            }),
                    )
                    .collect();
                if shared.is_empty() {
                    continue;
                }
                links.push(GraphLink {
                    source: a.node.id.clone(),
                    target: b.node.id.clone(),
                    kind: LinkKind::between(a.node.kind, b.node.kind),
                    strength: shared.len(),
                    narratives: shared,
                });
            }
        }

        let nodes: Vec<GraphNode> = members.into_iter().map(|member| member.node).collect();
        debug!(nodes = nodes.len(), links = links.len(), "built network graph");
        NetworkGraph { nodes, links }
    }

    /// Graph over the persons and organizations a narrative references.
    pub fn build_for_narrative(&self, narrative_id: &str) -> NetworkGraph {
        match self.resolver.narrative(narrative_id) {
            Some(narrative) => self.build(
                narrative.person_ids.as_slice(),
                narrative.organization_ids.as_slice(),
            ),
            None => NetworkGraph::default(),
        }
    }

    /// Graph over every person and organization referenced by the narratives
    /// in scope and range. Links still count every shared narrative.
    pub fn build_for_scope(&self, scope: &MissionScope, range: Option<&TimeRange>) -> NetworkGraph {
        let narratives = self.resolver.narratives(scope, range);
        let person_ids = first_seen(narratives.iter().flat_map(|n| n.person_ids.iter()));
        let organization_ids =
            first_seen(narratives.iter().flat_map(|n| n.organization_ids.iter()));
        self.build(person_ids.as_slice(), organization_ids.as_slice())
    }

    fn members<P, O>(
        &self,
        person_ids: &[P],
        organization_ids: &[O],
        narratives: &[Narrative],
        sub_narratives: &[SubNarrative],
    ) -> Vec<Membership>
    where
        P: AsRef<str>,
        O: AsRef<str>,
    {
        let mut members = Vec::new();

        // One id makes one node, claimed by whichever pass sees it first.
        let mut seen = HashSet::new();
        for id in person_ids {
            let id: &str = id.as_ref();
            if !seen.insert(id) {
                continue;
            }
            let Some(person) = self.resolver.person(id) else {
                debug!(%id, "dropping unknown person from graph");
                continue;
            };
            members.push(Membership {
                node: GraphNode {
                    id: person.id.clone(),
                    label: person.name.clone(),
                    kind: NodeKind::Person,
                },
                narratives: positions(narratives, |n: &Narrative| n.person_ids.as_slice(), id),
                sub_narratives: positions(
                    sub_narratives,
                    |s: &SubNarrative| s.person_ids.as_slice(),
                    id,
                ),
            });
        }

        for id in organization_ids {
            let id: &str = id.as_ref();
            if !seen.insert(id) {
                continue;
            }
            let Some(organization) = self.resolver.organization(id) else {
                debug!(%id, "dropping unknown organization from graph");
                continue;
            };
            members.push(Membership {
                node: GraphNode {
                    id: organization.id.clone(),
                    label: organization.name.clone(),
                    kind: NodeKind::Organization,
                },
                narratives: positions(narratives, |n: &Narrative| n.organization_ids.as_slice(), id),
                sub_narratives: positions(
                    sub_narratives,
                    |s: &SubNarrative| s.organization_ids.as_slice(),
                    id,
                ),
            });
        }

        members
    }
}

/// Indices of the records whose id list `via` contains `id`.
fn positions<T>(records: &[T], via: impl Fn(&T) -> &[RecordId], id: &str) -> BTreeSet<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| entity_store::references(via(record), id))
        .map(|(index, _)| index)
        .collect()
}

fn first_seen<'r>(ids: impl Iterator<Item = &'r RecordId>) -> Vec<&'r RecordId> {
    let mut seen = HashSet::new();
    ids.filter(|id| seen.insert(*id)).collect()
}
