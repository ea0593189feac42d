//! Transformation wrappers
//!
//! [`wrap_list_watch`] turns a source into one whose list results and watch
//! events have been passed through a [`Transformer`]. Lists are rewritten
//! before `list` returns; watch streams are wrapped in a
//! [`TransformingWatch`] that forwards events from the inner stream to its
//! own output channel, transforming each one on the way.

pub mod list;
pub mod stream;

pub use list::{TransformingListWatch, wrap_list_watch, wrap_list_watch_with_config};
pub use stream::{StreamState, TransformingWatch};

use std::sync::Arc;

/// A function applied to every listed item and every watch event payload
///
/// It may modify its argument and return it, or return a different value.
/// It is called at most once per item, and never concurrently with itself
/// for the same watch stream. It has no error channel: a transformer that
/// needs to report failure should produce an item that says so.
pub type Transformer<K> = Arc<dyn Fn(K) -> K + Send + Sync>;

/// Box a closure as a [`Transformer`]
pub fn transformer<K>(f: impl Fn(K) -> K + Send + Sync + 'static) -> Transformer<K> {
    Arc::new(f)
}
