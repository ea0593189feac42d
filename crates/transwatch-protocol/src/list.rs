//! List responses and shape introspection
//!
//! A list call returns some container of items. The [`Collection`] trait is
//! how the transformation layer looks inside it without knowing its concrete
//! type: it asks whether the value is list-shaped, takes the items out, and
//! puts a sequence of the same length back.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Shape introspection for values returned by a list call
///
/// Implementations must preserve order: `set_items(extract_items()?)` leaves
/// the container as it was. Everything besides the items (resource version,
/// continuation token, kind) is left alone by both operations.
pub trait Collection {
    /// The element type
    type Item;

    /// Whether this value carries an item sequence at all
    fn is_list(&self) -> bool;

    /// Move the items out, in order
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a list or an element cannot be
    /// represented as `Self::Item`.
    fn extract_items(&mut self) -> Result<Vec<Self::Item>>;

    /// Replace the items with `items`, in order
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a list or cannot hold the given items.
    fn set_items(&mut self, items: Vec<Self::Item>) -> Result<()>;
}

/// Metadata attached to a list response
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ListMeta {
    /// Resource version the list was read at
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_version: Option<String>,

    /// Token for fetching the next page
    #[serde(default, rename = "continue", skip_serializing_if = "Option::is_none")]
    pub continue_token: Option<String>,

    /// Number of items left after this page, when the source knows it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining_item_count: Option<i64>,
}

impl ListMeta {
    /// Set the resource version
    pub fn with_resource_version(mut self, version: impl Into<String>) -> Self {
        self.resource_version = Some(version.into());
        self
    }

    /// Set the continuation token
    pub fn with_continue_token(mut self, token: impl Into<String>) -> Self {
        self.continue_token = Some(token.into());
        self
    }

    /// Set the remaining item count
    pub fn with_remaining_item_count(mut self, count: i64) -> Self {
        self.remaining_item_count = Some(count);
        self
    }
}

/// A typed list response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ObjectList<K> {
    /// API group and version of the list
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_version: String,

    /// Kind of the list, e.g. `PodList`
    #[serde(default)]
    pub kind: String,

    /// List metadata
    #[serde(default)]
    pub metadata: ListMeta,

    /// The items
    pub items: Vec<K>,
}

impl<K> ObjectList<K> {
    /// Create a list holding `items` with empty metadata
    pub fn new(items: Vec<K>) -> Self {
        Self {
            api_version: String::new(),
            kind: "List".to_string(),
            metadata: ListMeta::default(),
            items,
        }
    }

    /// Set the api version and kind
    pub fn with_type(mut self, api_version: impl Into<String>, kind: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self.kind = kind.into();
        self
    }

    /// Set the list metadata
    pub fn with_metadata(mut self, metadata: ListMeta) -> Self {
        self.metadata = metadata;
        self
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list has no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<K> Collection for ObjectList<K> {
    type Item = K;

    fn is_list(&self) -> bool {
        true
    }

    fn extract_items(&mut self) -> Result<Vec<K>> {
        Ok(std::mem::take(&mut self.items))
    }

    fn set_items(&mut self, items: Vec<K>) -> Result<()> {
        self.items = items;
        Ok(())
    }
}

impl<K> Collection for Vec<K> {
    type Item = K;

    fn is_list(&self) -> bool {
        true
    }

    fn extract_items(&mut self) -> Result<Vec<K>> {
        Ok(std::mem::take(self))
    }

    fn set_items(&mut self, items: Vec<K>) -> Result<()> {
        *self = items;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_list_round_trip_keeps_metadata() {
        let mut list = ObjectList::new(vec!["a", "b", "c"])
            .with_type("v1", "ConfigMapList")
            .with_metadata(
                ListMeta::default()
                    .with_resource_version("17")
                    .with_continue_token("next-page"),
            );

        let items = list.extract_items().unwrap();
        assert_eq!(items, vec!["a", "b", "c"]);
        assert!(list.is_empty());

        list.set_items(items).unwrap();
        assert_eq!(list.items, vec!["a", "b", "c"]);
        assert_eq!(list.kind, "ConfigMapList");
        assert_eq!(list.metadata.resource_version.as_deref(), Some("17"));
        assert_eq!(list.metadata.continue_token.as_deref(), Some("next-page"));
    }

    #[test]
    fn test_list_meta_wire_names() {
        let meta = ListMeta::default()
            .with_continue_token("tok")
            .with_remaining_item_count(3);
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json, serde_json::json!({"continue": "tok", "remainingItemCount": 3}));
    }

    #[test]
    fn test_vec_is_a_collection() {
        let mut items = vec![1, 2];
        assert!(items.is_list());
        let taken = items.extract_items().unwrap();
        assert!(items.is_empty());
        items.set_items(taken.into_iter().rev().collect()).unwrap();
        assert_eq!(items, vec![2, 1]);
    }
}
