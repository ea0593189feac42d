//! Query options for list and watch calls
//!
//! Options are opaque to the transformation layer: they are handed to the
//! inner source exactly as the caller built them.

use serde::{Deserialize, Serialize};

/// How a requested resource version is interpreted by the source
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ResourceVersionMatch {
    /// Return data at least as new as the given resource version
    NotOlderThan,

    /// Return data at exactly the given resource version
    Exact,
}

/// Options for a list or watch request
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ListOptions {
    /// Restrict results to objects whose labels match this selector
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_selector: Option<String>,

    /// Restrict results to objects whose fields match this selector
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_selector: Option<String>,

    /// Resource version to list or watch from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_version: Option<String>,

    /// How `resource_version` is applied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_version_match: Option<ResourceVersionMatch>,

    /// Maximum number of items in one list response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    /// Continuation token from a previous, truncated list response
    #[serde(default, rename = "continue", skip_serializing_if = "Option::is_none")]
    pub continue_token: Option<String>,

    /// Server-side timeout for the call
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u32>,

    /// Ask the source to emit bookmark events on watch streams
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub allow_watch_bookmarks: bool,

    /// Ask the source to replay current state as synthetic added events
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub send_initial_events: Option<bool>,
}

impl ListOptions {
    /// Create empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the label selector
    pub fn with_label_selector(mut self, selector: impl Into<String>) -> Self {
        self.label_selector = Some(selector.into());
        self
    }

    /// Set the field selector
    pub fn with_field_selector(mut self, selector: impl Into<String>) -> Self {
        self.field_selector = Some(selector.into());
        self
    }

    /// Set the resource version
    pub fn with_resource_version(mut self, version: impl Into<String>) -> Self {
        self.resource_version = Some(version.into());
        self
    }

    /// Set how the resource version is matched
    pub fn with_resource_version_match(mut self, matching: ResourceVersionMatch) -> Self {
        self.resource_version_match = Some(matching);
        self
    }

    /// Set the page size
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the continuation token
    pub fn with_continue_token(mut self, token: impl Into<String>) -> Self {
        self.continue_token = Some(token.into());
        self
    }

    /// Set the server-side timeout
    pub fn with_timeout_seconds(mut self, seconds: u32) -> Self {
        self.timeout_seconds = Some(seconds);
        self
    }

    /// Request bookmark events
    pub fn with_watch_bookmarks(mut self) -> Self {
        self.allow_watch_bookmarks = true;
        self
    }

    /// Request initial events on watch
    pub fn with_initial_events(mut self, send: bool) -> Self {
        self.send_initial_events = Some(send);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_options_serialize_to_empty_object() {
        let json = serde_json::to_value(ListOptions::new()).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }

    #[test]
    fn test_options_builder_uses_wire_names() {
        let options = ListOptions::new()
            .with_label_selector("app=web")
            .with_limit(500)
            .with_continue_token("abc")
            .with_resource_version_match(ResourceVersionMatch::NotOlderThan)
            .with_watch_bookmarks();

        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(json["labelSelector"], "app=web");
        assert_eq!(json["limit"], 500);
        assert_eq!(json["continue"], "abc");
        assert_eq!(json["resourceVersionMatch"], "NotOlderThan");
        assert_eq!(json["allowWatchBookmarks"], true);

        let back: ListOptions = serde_json::from_value(json).unwrap();
        assert_eq!(back, options);
    }
}
