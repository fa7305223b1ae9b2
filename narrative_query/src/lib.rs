//! # Narrative Query
//!
//! The read side of the narrative dashboard. Every query is a pure
//! recomputation over the collections of an `entity_store::EntityStore`;
//! nothing is cached between calls.
//!
//! ## Core Components
//!
//! - **resolver**: Single lookups, filtered listings and reverse relationship lookups
//! - **aggregation**: Faction and source volume summed over a date axis
//! - **network**: Person/organization co-occurrence graphs
//! - **stats**: Dashboard counts, status tallies and rankings
//! - **time_range** / **scope**: The time and mission filters every query shares
//!
//! ## Failure Model
//!
//! Queries never fail. A missing record is `None`, an empty relation is an
//! empty `Vec`, a dangling reference is skipped and an inverted time range
//! matches nothing. Only loading a [`QueryConfig`] returns an error.

pub mod aggregation;
pub mod config;
pub mod network;
pub mod query;
pub mod resolver;
pub mod scope;
pub mod stats;
pub mod time_range;

#[cfg(test)]
mod test_support;

pub use aggregation::*;
pub use config::{QueryConfig, QueryError};
pub use network::*;
pub use query::*;
pub use resolver::*;
pub use scope::*;
pub use stats::*;
pub use time_range::*;
