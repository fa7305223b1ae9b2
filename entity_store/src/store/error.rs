use thiserror::Error;

use crate::entities::{EntityKind, RecordId};

/// Errors raised by store mutations and dataset loading.
///
/// Reads never fail; a missing record is an `Option::None`.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{kind} already contains a record with id '{id}'")]
    DuplicateId { kind: EntityKind, id: RecordId },

    #[error("{kind} has no record with id '{id}'")]
    NotFound { kind: EntityKind, id: RecordId },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;
