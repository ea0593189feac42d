//! Mock list/watch source for testing wrappers in isolation
//!
//! Stands in for a real source: list responses and watch streams are
//! queued up front and handed out in FIFO order, errors can be injected,
//! and every call's options are captured for assertion. Watch streams are
//! [`CountingWatch`]es so tests can see how often `stop` reached them.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Mutex;
use transwatch::{ChannelWatch, Error, ListerWatcher, ResultChan, Result, Watch, WatchSender};
use transwatch_protocol::{Collection, ListOptions};

/// A small object with a name and a counter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Widget {
    pub name: String,
    pub counter: u32,
}

impl Widget {
    pub fn new(name: impl Into<String>, counter: u32) -> Self {
        Self {
            name: name.into(),
            counter,
        }
    }
}

/// A channel-backed watch that counts calls to `stop`
pub struct CountingWatch<K> {
    inner: ChannelWatch<K>,
    stops: Arc<AtomicUsize>,
}

impl<K: Send> Watch<K> for CountingWatch<K> {
    fn stop(&self) {
        self.stops.fetch_add(1, Ordering::SeqCst);
        self.inner.stop();
    }

    fn result_chan(&self) -> ResultChan<K> {
        self.inner.result_chan()
    }
}

/// Number of `stop` calls that reached a [`CountingWatch`]
#[derive(Clone)]
pub struct StopCount(Arc<AtomicUsize>);

impl StopCount {
    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// Create a counting watch with the given channel capacity
///
/// Returns the producer side, the stop counter and the stream to hand out.
pub fn counting_watch<K>(capacity: usize) -> (WatchSender<K>, StopCount, CountingWatch<K>) {
    let (sender, inner) = transwatch::channel(capacity);
    let stops = Arc::new(AtomicUsize::new(0));
    let watch = CountingWatch {
        inner,
        stops: Arc::clone(&stops),
    };
    (sender, StopCount(stops), watch)
}

/// A mock source with queued results
pub struct MockSource<K, L> {
    lists: Mutex<VecDeque<Result<L>>>,
    watches: Mutex<VecDeque<Result<Box<dyn Watch<K>>>>>,
    list_calls: Mutex<Vec<ListOptions>>,
    watch_calls: Mutex<Vec<ListOptions>>,
}

impl<K, L> MockSource<K, L>
where
    K: Send + 'static,
    L: Collection<Item = K> + Send + 'static,
{
    pub fn new() -> Self {
        Self {
            lists: Mutex::new(VecDeque::new()),
            watches: Mutex::new(VecDeque::new()),
            list_calls: Mutex::new(Vec::new()),
            watch_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Queue a list response
    pub async fn queue_list(&self, list: L) {
        self.lists.lock().await.push_back(Ok(list));
    }

    /// Make the next list call fail
    pub async fn queue_list_error(&self, error: Error) {
        self.lists.lock().await.push_back(Err(error));
    }

    /// Queue a watch stream
    pub async fn queue_watch(&self, watch: impl Watch<K> + 'static) {
        let watch: Box<dyn Watch<K>> = Box::new(watch);
        self.watches.lock().await.push_back(Ok(watch));
    }

    /// Make the next watch call fail
    pub async fn queue_watch_error(&self, error: Error) {
        self.watches.lock().await.push_back(Err(error));
    }

    /// Options of every list call so far
    pub async fn list_calls(&self) -> Vec<ListOptions> {
        self.list_calls.lock().await.clone()
    }

    /// Options of every watch call so far
    pub async fn watch_calls(&self) -> Vec<ListOptions> {
        self.watch_calls.lock().await.clone()
    }
}

#[async_trait::async_trait]
impl<K, L> ListerWatcher for MockSource<K, L>
where
    K: Send + 'static,
    L: Collection<Item = K> + Send + 'static,
{
    type Item = K;
    type List = L;

    async fn list(&self, options: ListOptions) -> Result<L> {
        self.list_calls.lock().await.push(options);
        self.lists
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Err(Error::source_error("no list response queued")))
    }

    async fn watch(&self, options: ListOptions) -> Result<Box<dyn Watch<K>>> {
        self.watch_calls.lock().await.push(options);
        self.watches
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Err(Error::source_error("no watch stream queued")))
    }
}
