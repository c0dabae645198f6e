// Copyright (c) 2025 - Cowboy AI, Inc.
//! Error types for inventory operations

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::ValidationError;
use crate::query::Operator;

/// A single persisted record that could not be decoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeFailure {
    /// Location of the offending record
    pub path: PathBuf,
    /// Why the record was rejected
    pub reason: String,
}

/// A single item of a bulk operation that did not apply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemFailure {
    /// Id of the resource the operation targeted
    pub id: String,
    /// Why the operation failed for this id
    pub reason: String,
}

/// Errors that can occur in inventory operations
#[derive(Debug, Error)]
pub enum InventoryError {
    /// Resource failed its invariants
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Type tag is not registered with the factory
    #[error("Unknown resource type: {0}")]
    UnknownType(String),

    /// Property query on a field that is not queryable
    #[error("Unknown property: {0}")]
    UnknownProperty(String),

    /// Query operator outside the supported set
    #[error("Invalid query operator: {0}")]
    InvalidOperator(Operator),

    /// Query carries the wrong number of values for its operator
    #[error("Invalid arity for {op}: expected {expected}, got {actual}")]
    InvalidArity {
        op: Operator,
        expected: &'static str,
        actual: usize,
    },

    /// More than one selection strategy in a single request
    #[error("Conflicting selection: {0} strategies given, at most one allowed")]
    ConflictingSelection(usize),

    /// Resource lookup by id found nothing
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Backing storage could not be used
    #[error("Storage unavailable at {path}: {source}")]
    StorageUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Some persisted records could not be decoded
    #[error("Failed to decode {} persisted record(s)", .0.len())]
    PartialDecodeFailure(Vec<DecodeFailure>),

    /// Some items of a bulk operation failed
    #[error("Bulk operation incomplete: {succeeded} applied, {} failed", .failures.len())]
    BulkFailure {
        succeeded: usize,
        failures: Vec<ItemFailure>,
    },

    /// Operation requires a resource but none was given
    #[error("No resource given")]
    NilResource,

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Store configuration rejected
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl InventoryError {
    /// Wrap an I/O error with the path it happened on
    pub fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        InventoryError::StorageUnavailable {
            path: path.into(),
            source,
        }
    }
}

/// Result type for inventory operations
pub type InventoryResult<T> = Result<T, InventoryError>;

impl From<serde_json::Error> for InventoryError {
    fn from(err: serde_json::Error) -> Self {
        InventoryError::Serialization(err.to_string())
    }
}
