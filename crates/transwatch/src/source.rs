//! List/watch sources
//!
//! A source offers two calls with the same options type: a one-shot `list`
//! that returns a snapshot collection, and a `watch` that returns a live
//! stream of changes. Wrappers implement the same trait, so anything that
//! accepts a source accepts a wrapped one.

use crate::error::Result;
use crate::watch::Watch;
use async_trait::async_trait;
use futures::FutureExt;
use futures::future::BoxFuture;
use std::future::Future;
use std::sync::Arc;
use transwatch_protocol::{Collection, ListOptions};

/// A source that can list and watch items
#[async_trait]
pub trait ListerWatcher: Send + Sync {
    /// The item type carried in lists and watch events
    type Item: Send + 'static;

    /// The container a list call returns
    type List: Collection<Item = Self::Item> + Send + 'static;

    /// Fetch a snapshot of the items
    async fn list(&self, options: ListOptions) -> Result<Self::List>;

    /// Open a stream of changes to the items
    async fn watch(&self, options: ListOptions) -> Result<Box<dyn Watch<Self::Item>>>;
}

/// A reference-counted, type-erased source
pub type SharedListerWatcher<K, L> = Arc<dyn ListerWatcher<Item = K, List = L>>;

/// Boxed list function of a [`ListWatch`]
pub type ListFunc<L> = Arc<dyn Fn(ListOptions) -> BoxFuture<'static, Result<L>> + Send + Sync>;

/// Boxed watch function of a [`ListWatch`]
pub type WatchFunc<K> =
    Arc<dyn Fn(ListOptions) -> BoxFuture<'static, Result<Box<dyn Watch<K>>>> + Send + Sync>;

/// A source assembled from a list function and a watch function
///
/// # Example
///
/// ```
/// use transwatch::{ChannelWatch, ListWatch, ListerWatcher, Watch};
/// use transwatch_protocol::{ListOptions, ObjectList, WatchEvent};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> transwatch::Result<()> {
/// let source = ListWatch::new(
///     |_options| async { Ok(ObjectList::new(vec![1, 2, 3])) },
///     |_options| async {
///         let watch = ChannelWatch::finite(vec![WatchEvent::added(4)]);
///         Ok(Box::new(watch) as Box<dyn Watch<i32>>)
///     },
/// );
///
/// let list = source.list(ListOptions::default()).await?;
/// assert_eq!(list.items, vec![1, 2, 3]);
/// # Ok(())
/// # }
/// ```
pub struct ListWatch<K, L> {
    list_fn: ListFunc<L>,
    watch_fn: WatchFunc<K>,
}

impl<K, L> Clone for ListWatch<K, L> {
    fn clone(&self) -> Self {
        Self {
            list_fn: Arc::clone(&self.list_fn),
            watch_fn: Arc::clone(&self.watch_fn),
        }
    }
}

impl<K, L> ListWatch<K, L>
where
    K: Send + 'static,
    L: Collection<Item = K> + Send + 'static,
{
    /// Build a source from two async functions
    pub fn new<LF, LFut, WF, WFut>(list_fn: LF, watch_fn: WF) -> Self
    where
        LF: Fn(ListOptions) -> LFut + Send + Sync + 'static,
        LFut: Future<Output = Result<L>> + Send + 'static,
        WF: Fn(ListOptions) -> WFut + Send + Sync + 'static,
        WFut: Future<Output = Result<Box<dyn Watch<K>>>> + Send + 'static,
    {
        Self {
            list_fn: Arc::new(move |options| list_fn(options).boxed()),
            watch_fn: Arc::new(move |options| watch_fn(options).boxed()),
        }
    }

    /// Erase the concrete type
    pub fn into_shared(self) -> SharedListerWatcher<K, L> {
        Arc::new(self)
    }
}

#[async_trait]
impl<K, L> ListerWatcher for ListWatch<K, L>
where
    K: Send + 'static,
    L: Collection<Item = K> + Send + 'static,
{
    type Item = K;
    type List = L;

    async fn list(&self, options: ListOptions) -> Result<L> {
        (self.list_fn)(options).await
    }

    async fn watch(&self, options: ListOptions) -> Result<Box<dyn Watch<K>>> {
        (self.watch_fn)(options).await
    }
}
