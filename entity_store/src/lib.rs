//! # Entity Store
//!
//! The canonical record collections of the narrative dashboard - missions,
//! narratives, factions, people, organizations, locations, events, documents
//! and sources - and the in-memory store that owns them.
//!
//! This crate is the single source of truth for record state. It knows how to
//! load, mutate and notify, but contains no query or aggregation logic; that
//! lives in `narrative_query`, which only ever reads from an [`EntityStore`].

pub mod entities;
pub mod store;

pub use entities::*;
pub use store::*;
