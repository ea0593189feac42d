//! JSON-backed objects of any kind
//!
//! [`DynamicObject`] is for sources whose schema is not known at compile
//! time. The same type serves as a single object and as a list response: a
//! dynamic object is list-shaped when it carries an `items` array.

use crate::error::{MetaError, Result};
use crate::list::Collection;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const ITEMS: &str = "items";

/// An untyped object, stored as its JSON fields
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct DynamicObject {
    fields: Map<String, Value>,
}

impl DynamicObject {
    /// Create an object with the given api version and kind
    pub fn new(api_version: impl Into<String>, kind: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert("apiVersion".to_string(), Value::String(api_version.into()));
        fields.insert("kind".to_string(), Value::String(kind.into()));
        Self { fields }
    }

    /// Wrap a JSON value
    ///
    /// # Errors
    ///
    /// Returns [`MetaError::NotAnObject`] unless `value` is a JSON object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            _ => Err(MetaError::NotAnObject),
        }
    }

    /// Unwrap into a JSON value
    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }

    /// Set `metadata.name`
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.set_metadata("name", Value::String(name.into()));
        self
    }

    /// Set `metadata.namespace`
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.set_metadata("namespace", Value::String(namespace.into()));
        self
    }

    /// Set a top-level field
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    /// The `apiVersion` field
    pub fn api_version(&self) -> Option<&str> {
        self.fields.get("apiVersion").and_then(Value::as_str)
    }

    /// The `kind` field
    pub fn kind(&self) -> Option<&str> {
        self.fields.get("kind").and_then(Value::as_str)
    }

    /// `metadata.name`
    pub fn name(&self) -> Option<&str> {
        self.metadata_str("name")
    }

    /// `metadata.namespace`
    pub fn namespace(&self) -> Option<&str> {
        self.metadata_str("namespace")
    }

    /// `metadata.resourceVersion`
    pub fn resource_version(&self) -> Option<&str> {
        self.metadata_str("resourceVersion")
    }

    /// A top-level field
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// A top-level field, mutably
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.fields.get_mut(key)
    }

    /// Set a top-level field, returning the previous value
    pub fn set(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.fields.insert(key.into(), value)
    }

    /// Remove a top-level field, returning it
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.fields.remove(key)
    }

    /// All top-level fields
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    fn metadata_str(&self, key: &str) -> Option<&str> {
        self.fields
            .get("metadata")
            .and_then(|m| m.get(key))
            .and_then(Value::as_str)
    }

    fn set_metadata(&mut self, key: &str, value: Value) {
        let mut metadata = match self.fields.remove("metadata") {
            Some(Value::Object(metadata)) => metadata,
            _ => Map::new(),
        };
        metadata.insert(key.to_string(), value);
        self.fields
            .insert("metadata".to_string(), Value::Object(metadata));
    }

    fn not_a_list(&self) -> MetaError {
        MetaError::NotAList {
            kind: self.kind().unwrap_or("object").to_string(),
        }
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl Collection for DynamicObject {
    type Item = DynamicObject;

    fn is_list(&self) -> bool {
        matches!(self.fields.get(ITEMS), Some(Value::Array(_) | Value::Null))
    }

    fn extract_items(&mut self) -> Result<Vec<DynamicObject>> {
        match self.fields.get(ITEMS) {
            Some(Value::Array(_)) => {}
            Some(Value::Null) => return Ok(Vec::new()),
            _ => return Err(self.not_a_list()),
        }
        let Some(Value::Array(values)) = self
            .fields
            .insert(ITEMS.to_string(), Value::Array(Vec::new()))
        else {
            return Err(self.not_a_list());
        };

        let mut items = Vec::with_capacity(values.len());
        let mut values = values.into_iter().enumerate();
        while let Some((index, value)) = values.next() {
            match value {
                Value::Object(fields) => items.push(DynamicObject { fields }),
                other => {
                    let reason = format!("expected object, got {}", json_type(&other));
                    // Put the list back the way it was
                    let restored = items
                        .into_iter()
                        .map(DynamicObject::into_value)
                        .chain(std::iter::once(other))
                        .chain(values.map(|(_, v)| v))
                        .collect();
                    self.fields.insert(ITEMS.to_string(), Value::Array(restored));
                    return Err(MetaError::InvalidItem { index, reason });
                }
            }
        }
        Ok(items)
    }

    fn set_items(&mut self, items: Vec<DynamicObject>) -> Result<()> {
        if !self.is_list() {
            return Err(self.not_a_list());
        }
        let items = items.into_iter().map(DynamicObject::into_value).collect();
        self.fields.insert(ITEMS.to_string(), Value::Array(items));
        Ok(())
    }
}
