//! The transforming watch stream

use super::Transformer;
use crate::config::WrapConfig;
use crate::watch::{ResultChan, Watch};
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};
use transwatch_protocol::WatchEvent;

/// Lifecycle of a [`TransformingWatch`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    /// Events are being forwarded
    Running,

    /// The inner stream has closed and the output is being closed
    ///
    /// Transient: the forwarding task moves on to [`StreamState::Closed`]
    /// without yielding, so callers normally observe `Running` then `Closed`.
    Draining,

    /// The output is closed; no more events will be delivered
    Closed,
}

impl StreamState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Running,
            1 => Self::Draining,
            _ => Self::Closed,
        }
    }
}

/// A watch stream whose events are transformed copies of an inner stream's
///
/// Construction spawns one forwarding task that reads the inner stream in
/// order, applies the transformer to each payload and sends the result to
/// the wrapper's own bounded output channel. A slow reader of the output
/// stalls the task, which stops reading the inner stream in turn.
///
/// The output closes exactly when the inner stream's channel closes.
/// [`stop`](Watch::stop) only forwards to the inner stream, so a few
/// in-flight events may still arrive after it returns.
///
/// A panic in the transformer is not caught. It ends the forwarding task,
/// which closes the output early; [`is_terminated`](Self::is_terminated)
/// then reports `true`.
pub struct TransformingWatch<K> {
    inner: Arc<dyn Watch<K>>,
    output: ResultChan<K>,
    state: Arc<AtomicU8>,
    forwarder: JoinHandle<()>,
    name: String,
}

impl<K: Send + 'static> TransformingWatch<K> {
    /// Wrap `inner` with default settings
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn new(inner: Box<dyn Watch<K>>, transformer: Transformer<K>) -> Self {
        Self::with_config(inner, transformer, &WrapConfig::default())
    }

    /// Wrap `inner`, sizing the output channel from `config`
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn with_config(
        inner: Box<dyn Watch<K>>,
        transformer: Transformer<K>,
        config: &WrapConfig,
    ) -> Self {
        let inner: Arc<dyn Watch<K>> = Arc::from(inner);
        let (tx, rx) = mpsc::channel(config.channel_capacity.max(1));
        let state = Arc::new(AtomicU8::new(StreamState::Running as u8));

        let forwarder = tokio::spawn(forward(
            Arc::clone(&inner),
            inner.result_chan(),
            tx,
            transformer,
            Arc::clone(&state),
            config.name.clone(),
        ));
        debug!(
            name = %config.name,
            capacity = config.channel_capacity,
            "Started watch forwarding task"
        );

        Self {
            inner,
            output: ResultChan::new(rx),
            state,
            forwarder,
            name: config.name.clone(),
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> StreamState {
        if self.forwarder.is_finished() {
            return StreamState::Closed;
        }
        StreamState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Whether the forwarding task has exited, normally or not
    pub fn is_terminated(&self) -> bool {
        self.forwarder.is_finished()
    }
}

impl<K: Send + 'static> Watch<K> for TransformingWatch<K> {
    fn stop(&self) {
        debug!(name = %self.name, "Stopping inner watch");
        self.inner.stop();
    }

    fn result_chan(&self) -> ResultChan<K> {
        self.output.clone()
    }
}

async fn forward<K>(
    inner: Arc<dyn Watch<K>>,
    input: ResultChan<K>,
    output: mpsc::Sender<WatchEvent<K>>,
    transformer: Transformer<K>,
    state: Arc<AtomicU8>,
    name: String,
) {
    let mut forwarded: u64 = 0;

    while let Some(event) = input.recv().await {
        let event_type = event.event_type;
        let event = event.map_object(|object| transformer(object));

        if output.send(event).await.is_err() {
            // Every reader is gone
            warn!(name = %name, forwarded, "Watch output dropped, stopping inner watch");
            inner.stop();
            break;
        }

        forwarded += 1;
        trace!(name = %name, %event_type, forwarded, "Forwarded watch event");
    }

    state.store(StreamState::Draining as u8, Ordering::Release);
    debug!(name = %name, forwarded, "Inner watch closed");
    drop(output);
    state.store(StreamState::Closed as u8, Ordering::Release);
}
