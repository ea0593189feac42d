//! Error types for shape introspection
//!
//! These errors describe why a value returned by a list call could not be
//! treated as a list, or why its items could not be read out or written back.

use thiserror::Error;

/// Result type for shape introspection
pub type Result<T> = std::result::Result<T, MetaError>;

/// Errors raised while inspecting or rewriting list-shaped values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetaError {
    /// The value has no item sequence
    #[error("{kind} is not a list: no items field")]
    NotAList {
        /// The kind of the offending value, or "object" when unknown
        kind: String,
    },

    /// The value is not a JSON object
    #[error("value is not an object")]
    NotAnObject,

    /// An element of the item sequence is malformed
    #[error("item {index} is invalid: {reason}")]
    InvalidItem {
        /// Position of the element in the item sequence
        index: usize,
        /// What was wrong with it
        reason: String,
    },

    /// A container with a fixed number of slots received a different number of items
    #[error("expected {expected} items, got {actual}")]
    LengthMismatch {
        /// Number of slots in the container
        expected: usize,
        /// Number of items supplied
        actual: usize,
    },

    /// An event type string is not one of the known kinds
    #[error("unknown event type: {0}")]
    UnknownEventType(String),
}
