//! The transforming list/watch source

use super::Transformer;
use super::stream::TransformingWatch;
use crate::config::WrapConfig;
use crate::error::{Error, Result};
use crate::source::{ListerWatcher, SharedListerWatcher};
use crate::watch::Watch;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;
use transwatch_protocol::{Collection, ListOptions};

/// Apply `transformer` to everything `source` lists or watches
///
/// With no transformer the source is returned as is, without a wrapper
/// around it: the result is the very same `Arc`.
///
/// # Example
///
/// ```
/// use transwatch::{ListWatch, ListerWatcher, Watch, ChannelWatch, transformer, wrap_list_watch};
/// use transwatch_protocol::{EventType, ListOptions, ObjectList, WatchEvent};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> transwatch::Result<()> {
/// let source = ListWatch::new(
///     |_options| async { Ok(ObjectList::new(vec!["a".to_string(), "b".to_string()])) },
///     |_options| async {
///         let watch = ChannelWatch::finite(vec![WatchEvent::added("c".to_string())]);
///         Ok(Box::new(watch) as Box<dyn Watch<String>>)
///     },
/// )
/// .into_shared();
///
/// let upper = wrap_list_watch(source, Some(transformer(|s: String| s.to_uppercase())));
///
/// let list = upper.list(ListOptions::default()).await?;
/// assert_eq!(list.items, vec!["A", "B"]);
///
/// let events = upper.watch(ListOptions::default()).await?.result_chan();
/// let event = events.recv().await.unwrap();
/// assert_eq!(event.event_type, EventType::Added);
/// assert_eq!(event.object, "C");
/// assert!(events.recv().await.is_none());
/// # Ok(())
/// # }
/// ```
pub fn wrap_list_watch<K, L>(
    source: SharedListerWatcher<K, L>,
    transformer: Option<Transformer<K>>,
) -> SharedListerWatcher<K, L>
where
    K: Send + 'static,
    L: Collection<Item = K> + Send + 'static,
{
    wrap_list_watch_with_config(source, transformer, WrapConfig::default())
}

/// Like [`wrap_list_watch`], with explicit settings for the watch streams
pub fn wrap_list_watch_with_config<K, L>(
    source: SharedListerWatcher<K, L>,
    transformer: Option<Transformer<K>>,
    config: WrapConfig,
) -> SharedListerWatcher<K, L>
where
    K: Send + 'static,
    L: Collection<Item = K> + Send + 'static,
{
    let Some(transformer) = transformer else {
        debug!(name = %config.name, "No transformer given, using source unwrapped");
        return source;
    };

    debug!(name = %config.name, "Wrapping list/watch source with transformer");
    Arc::new(TransformingListWatch::new(source, transformer, config))
}

/// A source whose lists and watch events pass through a transformer
///
/// Errors from the inner source are returned untouched. A list response
/// that cannot be rewritten fails with [`Error::NotAList`],
/// [`Error::ExtractItems`] or [`Error::SetItems`] depending on the step.
pub struct TransformingListWatch<K, L>
where
    K: Send + 'static,
    L: Collection<Item = K> + Send + 'static,
{
    inner: SharedListerWatcher<K, L>,
    transformer: Transformer<K>,
    config: WrapConfig,
}

impl<K, L> TransformingListWatch<K, L>
where
    K: Send + 'static,
    L: Collection<Item = K> + Send + 'static,
{
    /// Wrap `inner`
    pub fn new(
        inner: SharedListerWatcher<K, L>,
        transformer: Transformer<K>,
        config: WrapConfig,
    ) -> Self {
        Self {
            inner,
            transformer,
            config,
        }
    }

    /// The wrapped source
    pub fn inner(&self) -> &SharedListerWatcher<K, L> {
        &self.inner
    }
}

#[async_trait]
impl<K, L> ListerWatcher for TransformingListWatch<K, L>
where
    K: Send + 'static,
    L: Collection<Item = K> + Send + 'static,
{
    type Item = K;
    type List = L;

    async fn list(&self, options: ListOptions) -> Result<L> {
        let mut list = self.inner.list(options).await?;

        if !list.is_list() {
            return Err(Error::NotAList);
        }

        let items = list.extract_items().map_err(Error::ExtractItems)?;
        let count = items.len();
        let items: Vec<K> = items
            .into_iter()
            .map(|item| (self.transformer)(item))
            .collect();
        list.set_items(items).map_err(Error::SetItems)?;

        debug!(name = %self.config.name, count, "Transformed list items");
        Ok(list)
    }

    async fn watch(&self, options: ListOptions) -> Result<Box<dyn Watch<K>>> {
        let inner = self.inner.watch(options).await?;
        Ok(Box::new(TransformingWatch::with_config(
            inner,
            Arc::clone(&self.transformer),
            &self.config,
        )))
    }
}
