//! Error types for the collection crate.

use thiserror::Error;

/// Errors that can occur when querying a collection.
#[derive(Debug, Error)]
pub enum CollectionError {
    /// A record does not carry the requested field.
    #[error("field '{field}' not found")]
    MissingField { field: String },

    /// Field access was attempted on an item that is not a record.
    #[error("expected a record, found {found} value")]
    NotARecord { found: &'static str },

    /// An added item does not have the same fields as the collection.
    #[error("item fields [{actual}] do not match collection fields [{expected}]")]
    FieldMismatch { expected: String, actual: String },

    /// The comparison value does not fit the operator.
    #[error("operator '{op}' expects {expected} value, got {found}")]
    InvalidOperand {
        op: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    /// A value could not be used as a number in an aggregate.
    #[error("cannot aggregate non-numeric {found} value")]
    NotNumeric { found: &'static str },

    /// The aggregate is undefined for an empty collection.
    #[error("cannot compute {0} of an empty collection")]
    EmptyAggregate(&'static str),

    /// Input could not be parsed as JSON.
    #[error("invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),
}

impl CollectionError {
    /// Create a missing-field error.
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }
}

/// Result type for collection operations.
pub type Result<T> = std::result::Result<T, CollectionError>;
