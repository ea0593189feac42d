//! Shared list/watch data types for the transwatch transformation layer
//!
//! This crate holds the pure data model that both sides of a list/watch
//! source agree on. It performs no I/O and knows nothing about how the
//! source is reached.
//!
//! # Type Organization
//!
//! - **Query options**: [`options`] - selectors, resource versions, paging
//! - **Watch events**: [`event`] - event kinds and event payloads
//! - **List responses**: [`list`] - list metadata, typed lists, the [`Collection`] trait
//! - **Dynamic objects**: [`dynamic`] - JSON-backed objects and lists
//! - **Error types**: [`error`] - shape introspection errors
//!
//! # Design Principles
//!
//! - **Zero I/O**: All types are pure data structures
//! - **Serialization**: serde-based, field names match the wire format of list/watch APIs
//! - **Shape introspection**: anything returned by a list call can be asked
//!   whether it is a list, have its items taken out, and have items put back

#![deny(unsafe_code)]
#![warn(missing_docs)]
//!
//! # Usage
//!
//! ```
//! use transwatch_protocol::{Collection, ListMeta, ObjectList};
//!
//! let mut list = ObjectList::new(vec![1, 2, 3])
//!     .with_metadata(ListMeta::default().with_resource_version("42"));
//!
//! let items = list.extract_items().unwrap();
//! list.set_items(items.into_iter().map(|n| n * 10).collect()).unwrap();
//!
//! assert_eq!(list.items, vec![10, 20, 30]);
//! assert_eq!(list.metadata.resource_version.as_deref(), Some("42"));
//! ```

pub mod dynamic;
pub mod error;
pub mod event;
pub mod list;
pub mod options;

// Re-export commonly used types at crate level
pub use dynamic::DynamicObject;
pub use error::{MetaError, Result};
pub use event::{EventType, WatchEvent};
pub use list::{Collection, ListMeta, ObjectList};
pub use options::{ListOptions, ResourceVersionMatch};
