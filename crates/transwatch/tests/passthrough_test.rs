//! Integration tests for wrapping without a transformer

mod common;

use common::mock_source::{MockSource, Widget, counting_watch};
use std::sync::Arc;
use std::time::Duration;
use transwatch::{
    ChannelWatch, ListerWatcher, SharedListerWatcher, Transformer, Watch, WrapConfig,
    transformer, wrap_list_watch, wrap_list_watch_with_config,
};
use transwatch_protocol::{ListOptions, ObjectList, WatchEvent};

type WidgetSource = MockSource<Widget, ObjectList<Widget>>;

#[tokio::test]
async fn test_no_transformer_returns_the_source_itself() {
    let source: SharedListerWatcher<Widget, ObjectList<Widget>> = WidgetSource::new().shared();

    let wrapped = wrap_list_watch(Arc::clone(&source), None);
    assert!(std::ptr::addr_eq(Arc::as_ptr(&source), Arc::as_ptr(&wrapped)));

    let configured = wrap_list_watch_with_config(
        Arc::clone(&source),
        None,
        WrapConfig::new().with_channel_capacity(8),
    );
    assert!(std::ptr::addr_eq(Arc::as_ptr(&source), Arc::as_ptr(&configured)));
}

#[tokio::test]
async fn test_pass_through_results_match_the_source() {
    let source = WidgetSource::new().shared();
    source
        .queue_list(ObjectList::new(vec![Widget::new("a", 1), Widget::new("b", 2)]))
        .await;
    source
        .queue_watch(ChannelWatch::finite(vec![
            WatchEvent::added(Widget::new("a", 1)),
            WatchEvent::deleted(Widget::new("a", 1)),
        ]))
        .await;

    let wrapped = wrap_list_watch(source.clone(), None);

    let list = wrapped.list(ListOptions::default()).await.unwrap();
    assert_eq!(list.items, vec![Widget::new("a", 1), Widget::new("b", 2)]);

    let chan = wrapped
        .watch(ListOptions::default())
        .await
        .unwrap()
        .result_chan();
    assert_eq!(chan.recv().await, Some(WatchEvent::added(Widget::new("a", 1))));
    assert_eq!(
        chan.recv().await,
        Some(WatchEvent::deleted(Widget::new("a", 1)))
    );
    assert_eq!(chan.recv().await, None);

    assert_eq!(source.list_calls().await.len(), 1);
    assert_eq!(source.watch_calls().await.len(), 1);
}

/// Watch a live stream, keeping only its `ResultChan`, while a producer
/// sends after `watch` has returned
async fn live_events(
    transformer: Option<Transformer<Widget>>,
) -> (Vec<WatchEvent<Widget>>, usize) {
    let source = WidgetSource::new().shared();
    let (sender, stops, inner) = counting_watch(1);
    source.queue_watch(inner).await;

    let wrapped = wrap_list_watch(source, transformer);
    let chan = wrapped
        .watch(ListOptions::default())
        .await
        .unwrap()
        .result_chan();

    let producer = tokio::spawn(async move {
        for counter in 1..=3 {
            sender
                .send(WatchEvent::added(Widget::new("w", counter)))
                .await?;
        }
        sender
            .send(WatchEvent::deleted(Widget::new("w", 3)))
            .await
    });

    let mut events = Vec::new();
    tokio::time::timeout(Duration::from_secs(2), async {
        while let Some(event) = chan.recv().await {
            events.push(event);
        }
    })
    .await
    .expect("stream should close once the producer is done");

    producer.await.unwrap().expect("every send should be delivered");
    (events, stops.get())
}

#[tokio::test]
async fn test_live_stream_behaves_the_same_with_and_without_transformer() {
    let expected = vec![
        WatchEvent::added(Widget::new("w", 1)),
        WatchEvent::added(Widget::new("w", 2)),
        WatchEvent::added(Widget::new("w", 3)),
        WatchEvent::deleted(Widget::new("w", 3)),
    ];

    let (passed_through, passed_through_stops) = live_events(None).await;
    let (identity, identity_stops) = live_events(Some(transformer(|w: Widget| w))).await;

    assert_eq!(passed_through, expected);
    assert_eq!(identity, expected);
    assert_eq!(passed_through_stops, 0);
    assert_eq!(identity_stops, 0);
}
