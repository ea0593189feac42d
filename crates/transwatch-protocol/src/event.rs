//! Watch event types
//!
//! A watch stream delivers [`WatchEvent`]s: a kind tag plus the object the
//! change concerns. Transformations only ever touch the object.

use crate::error::MetaError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of change a watch event reports
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventType {
    /// An object was created
    Added,

    /// An object was updated
    Modified,

    /// An object was removed
    Deleted,

    /// Progress marker carrying only a resource version
    Bookmark,

    /// The source reports an error; the object describes it
    Error,
}

impl EventType {
    /// Wire name of the event type
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Added => "ADDED",
            Self::Modified => "MODIFIED",
            Self::Deleted => "DELETED",
            Self::Bookmark => "BOOKMARK",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = MetaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADDED" => Ok(Self::Added),
            "MODIFIED" => Ok(Self::Modified),
            "DELETED" => Ok(Self::Deleted),
            "BOOKMARK" => Ok(Self::Bookmark),
            "ERROR" => Ok(Self::Error),
            other => Err(MetaError::UnknownEventType(other.to_string())),
        }
    }
}

/// A single change notification from a watch stream
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchEvent<K> {
    /// What happened
    #[serde(rename = "type")]
    pub event_type: EventType,

    /// The object it happened to
    pub object: K,
}

impl<K> WatchEvent<K> {
    /// Create an event of the given kind
    pub fn new(event_type: EventType, object: K) -> Self {
        Self { event_type, object }
    }

    /// Create an `ADDED` event
    pub fn added(object: K) -> Self {
        Self::new(EventType::Added, object)
    }

    /// Create a `MODIFIED` event
    pub fn modified(object: K) -> Self {
        Self::new(EventType::Modified, object)
    }

    /// Create a `DELETED` event
    pub fn deleted(object: K) -> Self {
        Self::new(EventType::Deleted, object)
    }

    /// Create a `BOOKMARK` event
    pub fn bookmark(object: K) -> Self {
        Self::new(EventType::Bookmark, object)
    }

    /// Create an `ERROR` event
    pub fn error(object: K) -> Self {
        Self::new(EventType::Error, object)
    }

    /// Apply `f` to the payload, keeping the event type
    pub fn map_object<U>(self, f: impl FnOnce(K) -> U) -> WatchEvent<U> {
        WatchEvent {
            event_type: self.event_type,
            object: f(self.object),
        }
    }
}
