//! Transform everything a list/watch source returns
//!
//! Sits between a consumer and a "list + watch" source and applies a
//! caller-supplied function to every item the source returns: each item of
//! a list response, and the payload of each watch event. Timing, ordering
//! and termination of the underlying source are left as they are.

#![deny(unsafe_code)]
#![warn(missing_docs)]
//!
//! # Architecture
//!
//! - **Source trait**: [`ListerWatcher`], implemented by real sources and by wrappers alike
//! - **Watch streams**: [`Watch`] with a shared [`ResultChan`]; [`ChannelWatch`] as a ready-made stream
//! - **Source wrapper**: [`wrap_list_watch`] rewrites list results and wraps watch streams
//! - **Stream wrapper**: [`TransformingWatch`] forwards and transforms events on a background task
//! - **Error handling**: [`Error`], separating upstream errors from list shape errors
//!
//! # Usage
//!
//! ```
//! use transwatch::{ChannelWatch, ListWatch, ListerWatcher, Watch, transformer, wrap_list_watch};
//! use transwatch_protocol::{DynamicObject, ListOptions, WatchEvent};
//! use serde_json::json;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> transwatch::Result<()> {
//! let source = ListWatch::new(
//!     |_options| async {
//!         Ok(DynamicObject::new("v1", "ConfigMapList").with_field(
//!             "items",
//!             json!([{"kind": "ConfigMap", "data": {"big": "..."}}]),
//!         ))
//!     },
//!     |_options| async {
//!         let watch = ChannelWatch::finite(vec![WatchEvent::added(
//!             DynamicObject::new("v1", "ConfigMap").with_field("data", json!({})),
//!         )]);
//!         Ok(Box::new(watch) as Box<dyn Watch<DynamicObject>>)
//!     },
//! )
//! .into_shared();
//!
//! let slim = wrap_list_watch(
//!     source,
//!     Some(transformer(|mut object: DynamicObject| {
//!         object.remove("data");
//!         object
//!     })),
//! );
//!
//! let list = slim.list(ListOptions::default()).await?;
//! assert_eq!(list.get("items"), Some(&json!([{"kind": "ConfigMap"}])));
//!
//! let event = slim.watch(ListOptions::default()).await?.result_chan().recv().await;
//! assert!(event.unwrap().object.get("data").is_none());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod source;
pub mod transform;
pub mod watch;

// Re-export commonly used types
pub use config::WrapConfig;
pub use error::{Error, Result};
pub use source::{ListWatch, ListerWatcher, SharedListerWatcher};
pub use transform::{
    StreamState, Transformer, TransformingListWatch, TransformingWatch, transformer,
    wrap_list_watch, wrap_list_watch_with_config,
};
pub use watch::{ChannelWatch, ResultChan, Watch, WatchSender, channel};
