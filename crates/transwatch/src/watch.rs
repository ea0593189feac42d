//! Watch streams
//!
//! A watch stream is anything that can be stopped and that hands out a
//! [`ResultChan`] to read events from. The channel closes once the stream
//! has terminated, either because the source ran out of events or because
//! [`Watch::stop`] was called and the producer noticed.
//!
//! [`channel`] builds the simplest concrete stream: a bounded channel whose
//! producer side is a [`WatchSender`].

use crate::error::{Error, Result};
use futures::Stream;
use std::sync::Arc;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::{Mutex, mpsc, watch};
use transwatch_protocol::WatchEvent;

/// A live, cancellable stream of watch events
///
/// # Contract for implementers
///
/// After `stop` is called the stream must eventually close its result
/// channel. Wrappers that forward events out of the channel exit only when
/// it closes, so a stream that never closes keeps them alive forever.
/// `stop` may be called more than once and must tolerate it.
pub trait Watch<K>: Send + Sync {
    /// Ask the stream to terminate
    ///
    /// Termination is asynchronous: events already in flight may still be
    /// delivered before the result channel closes.
    fn stop(&self);

    /// A handle to read events from
    ///
    /// Every call returns a handle to the same channel.
    fn result_chan(&self) -> ResultChan<K>;
}

/// Read side of a watch stream
///
/// Handles are cheap to clone and all read from the same channel: each event
/// is delivered to exactly one reader. Once the channel is closed and
/// drained, [`recv`](Self::recv) returns `None` forever.
pub struct ResultChan<K> {
    rx: Arc<Mutex<mpsc::Receiver<WatchEvent<K>>>>,
}

impl<K> Clone for ResultChan<K> {
    fn clone(&self) -> Self {
        Self {
            rx: Arc::clone(&self.rx),
        }
    }
}

impl<K> std::fmt::Debug for ResultChan<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultChan")
            .field("handles", &Arc::strong_count(&self.rx))
            .finish()
    }
}

impl<K> ResultChan<K> {
    /// Wrap the receiving end of a channel
    pub fn new(rx: mpsc::Receiver<WatchEvent<K>>) -> Self {
        Self {
            rx: Arc::new(Mutex::new(rx)),
        }
    }

    /// Wait for the next event, or `None` once the stream has closed
    pub async fn recv(&self) -> Option<WatchEvent<K>> {
        self.rx.lock().await.recv().await
    }

    /// Take the next event if one is ready
    ///
    /// Reports [`TryRecvError::Empty`] while another handle is waiting on the channel.
    pub fn try_recv(&self) -> std::result::Result<WatchEvent<K>, TryRecvError> {
        match self.rx.try_lock() {
            Ok(mut rx) => rx.try_recv(),
            Err(_) => Err(TryRecvError::Empty),
        }
    }

    /// Consume the handle as a [`Stream`] of events
    pub fn into_stream(self) -> impl Stream<Item = WatchEvent<K>> + Send + 'static
    where
        K: Send + 'static,
    {
        futures::stream::unfold(self, |chan| async move {
            chan.recv().await.map(|event| (event, chan))
        })
    }
}

/// Create a channel-backed watch stream with the given capacity
///
/// The [`ChannelWatch`] is handed to consumers; the [`WatchSender`] stays
/// with the producer. Dropping every sender closes the stream.
pub fn channel<K>(capacity: usize) -> (WatchSender<K>, ChannelWatch<K>) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    let (stop_tx, stop_rx) = watch::channel(false);

    let sender = WatchSender { tx, stop: stop_rx };
    let watch = ChannelWatch {
        result: ResultChan::new(rx),
        stop: stop_tx,
    };
    (sender, watch)
}

/// A watch stream fed by a [`WatchSender`]
pub struct ChannelWatch<K> {
    result: ResultChan<K>,
    stop: watch::Sender<bool>,
}

impl<K> ChannelWatch<K> {
    /// A stream that yields `events` in order and then closes
    pub fn finite(events: Vec<WatchEvent<K>>) -> Self {
        let (sender, watch) = channel(events.len());
        for event in events {
            let sent = sender.tx.try_send(event);
            debug_assert!(sent.is_ok(), "channel is sized to hold every event");
        }
        watch
    }

    /// Whether [`Watch::stop`] has been called
    pub fn is_stopped(&self) -> bool {
        *self.stop.borrow()
    }
}

impl<K: Send> Watch<K> for ChannelWatch<K> {
    fn stop(&self) {
        // Idempotent: the flag only ever goes from false to true
        self.stop.send_replace(true);
    }

    fn result_chan(&self) -> ResultChan<K> {
        self.result.clone()
    }
}

/// Producer side of a [`ChannelWatch`]
pub struct WatchSender<K> {
    tx: mpsc::Sender<WatchEvent<K>>,
    stop: watch::Receiver<bool>,
}

impl<K> Clone for WatchSender<K> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
            stop: self.stop.clone(),
        }
    }
}

impl<K> WatchSender<K> {
    /// Send an event, waiting for room in the channel
    ///
    /// # Errors
    ///
    /// Returns [`Error::WatchClosed`] if the stream was stopped before or
    /// while waiting, or if nothing can read the channel anymore.
    pub async fn send(&self, event: WatchEvent<K>) -> Result<()> {
        if self.is_stopped() {
            return Err(Error::WatchClosed);
        }

        let mut stop = self.stop.clone();
        tokio::select! {
            biased;
            Ok(_) = stop.wait_for(|stopped| *stopped) => Err(Error::WatchClosed),
            sent = self.tx.send(event) => sent.map_err(|_| Error::WatchClosed),
        }
    }

    /// Resolves once the consumer stops the stream, or once nothing can
    /// read the channel anymore
    ///
    /// Dropping the [`ChannelWatch`] alone is not a stop: handles returned
    /// by [`Watch::result_chan`] keep the stream readable.
    pub async fn stopped(&self) {
        let mut stop = self.stop.clone();
        if stop.wait_for(|stopped| *stopped).await.is_err() {
            self.tx.closed().await;
        }
    }

    /// Whether the consumer has stopped the stream
    pub fn is_stopped(&self) -> bool {
        *self.stop.borrow()
    }

    /// Whether the read side of the channel is gone
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}
