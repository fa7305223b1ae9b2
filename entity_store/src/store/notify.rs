//! Change notification for store listeners.

use serde::{Deserialize, Serialize};

use crate::entities::{EntityKind, RecordId};

/// What happened to a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeOp {
    Created,
    Updated,
    Removed,
    /// The whole dataset was swapped out.
    Replaced,
}

/// A single mutation, delivered to every subscriber after it is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreChange {
    pub op: ChangeOp,
    /// `None` for dataset-wide changes.
    pub kind: Option<EntityKind>,
    pub id: Option<RecordId>,
}

impl StoreChange {
    pub fn record(op: ChangeOp, kind: EntityKind, id: RecordId) -> Self {
        Self {
            op,
            kind: Some(kind),
            id: Some(id),
        }
    }

    pub fn replaced() -> Self {
        Self {
            op: ChangeOp::Replaced,
            kind: None,
            id: None,
        }
    }
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u64);

pub type Listener = Box<dyn Fn(&StoreChange)>;

/// Registered listeners, notified in subscription order.
#[derive(Default)]
pub struct Subscribers {
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl Subscribers {
    pub fn add(&mut self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    /// Returns whether a listener was registered under `id`.
    pub fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub fn notify(&self, change: &StoreChange) {
        for (_, listener) in &self.listeners {
            listener(change);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl std::fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscribers")
            .field("listeners", &self.listeners.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}
