//! Error types for list/watch sources and their wrappers
//!
//! Errors fall into two groups. Upstream errors (`Api`, `Source`,
//! `WatchClosed`) are produced by concrete sources and pass through the
//! transformation layer untouched. Shape errors (`NotAList`, `ExtractItems`,
//! `SetItems`) are raised by the layer itself when a list response cannot be
//! rewritten, and each names the step that failed.

use thiserror::Error;
use transwatch_protocol::MetaError;

/// Result type for list/watch operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors from list/watch sources and the transformation layer
#[derive(Debug, Error)]
pub enum Error {
    /// The remote API rejected the request
    #[error("API error ({code} {reason}): {message}")]
    Api {
        /// Status code reported by the source
        code: u16,
        /// Machine-readable reason, e.g. `Expired`
        reason: String,
        /// Human-readable description
        message: String,
    },

    /// The source failed for any other reason
    #[error("Source error: {0}")]
    Source(String),

    /// A watch stream was stopped, or its consumer went away
    #[error("Watch stream closed")]
    WatchClosed,

    /// The inner list call returned something without an item sequence
    #[error("inner list did not return a list")]
    NotAList,

    /// The items of a list response could not be read out
    #[error("failed to get items of list to transform: {0}")]
    ExtractItems(#[source] MetaError),

    /// The transformed items could not be written back into the list response
    #[error("failed to transform list: {0}")]
    SetItems(#[source] MetaError),
}

impl Error {
    /// Create an API error
    pub fn api(code: u16, reason: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Api {
            code,
            reason: reason.into(),
            message: message.into(),
        }
    }

    /// Create a generic source error
    pub fn source_error(message: impl Into<String>) -> Self {
        Self::Source(message.into())
    }

    /// Whether this error came from the inner source rather than the transformation layer
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Api { .. } | Self::Source(_) | Self::WatchClosed)
    }

    /// Whether the list response could not be treated as a list
    pub fn is_shape_error(&self) -> bool {
        matches!(self, Self::NotAList | Self::ExtractItems(_) | Self::SetItems(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_shape_errors_name_the_failing_step() {
        assert_eq!(
            Error::NotAList.to_string(),
            "inner list did not return a list"
        );

        let extract = Error::ExtractItems(MetaError::NotAnObject);
        assert!(extract.to_string().starts_with("failed to get items"));
        assert!(extract.source().is_some());

        let set = Error::SetItems(MetaError::LengthMismatch {
            expected: 2,
            actual: 3,
        });
        assert_eq!(
            set.to_string(),
            "failed to transform list: expected 2 items, got 3"
        );
    }

    #[test]
    fn test_error_classification() {
        assert!(Error::api(410, "Expired", "too old").is_upstream());
        assert!(Error::source_error("connection reset").is_upstream());
        assert!(Error::WatchClosed.is_upstream());
        assert!(!Error::NotAList.is_upstream());

        assert!(Error::NotAList.is_shape_error());
        assert!(Error::SetItems(MetaError::NotAnObject).is_shape_error());
        assert!(!Error::WatchClosed.is_shape_error());
    }

    #[test]
    fn test_api_error_display() {
        let err = Error::api(410, "Expired", "resource version too old");
        assert_eq!(
            err.to_string(),
            "API error (410 Expired): resource version too old"
        );
    }
}
