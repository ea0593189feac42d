//! Strip bulky fields from every object a source returns.
//!
//! Run with: cargo run -p transwatch --example strip_fields

use serde_json::json;
use std::time::Duration;
use transwatch::{
    ListWatch, ListerWatcher, Watch, WrapConfig, channel, transformer,
    wrap_list_watch_with_config,
};
use transwatch_protocol::{DynamicObject, ListOptions, WatchEvent};

fn pod(name: &str, phase: &str) -> DynamicObject {
    DynamicObject::from_value(json!({
        "apiVersion": "v1",
        "kind": "Pod",
        "metadata": {
            "name": name,
            "managedFields": [{"manager": "kubelet", "fieldsV1": {"f:status": {}}}],
            "annotations": {"last-applied-configuration": "{...a few kilobytes...}"}
        },
        "status": {"phase": phase}
    }))
    .unwrap_or_default()
}

/// A source serving a fixed list and a short stream of changes
fn pod_source() -> ListWatch<DynamicObject, DynamicObject> {
    ListWatch::new(
        |_options| async {
            let list = DynamicObject::new("v1", "PodList")
                .with_field("metadata", json!({"resourceVersion": "1000"}))
                .with_field(
                    "items",
                    json!([
                        pod("web-0", "Running").into_value(),
                        pod("web-1", "Pending").into_value(),
                    ]),
                );
            Ok(list)
        },
        |_options| async {
            let (sender, watch) = channel(1);
            tokio::spawn(async move {
                let updates = [
                    WatchEvent::modified(pod("web-1", "Running")),
                    WatchEvent::added(pod("web-2", "Pending")),
                    WatchEvent::deleted(pod("web-0", "Running")),
                ];
                for event in updates {
                    if sender.send(event).await.is_err() {
                        return;
                    }
                    tokio::time::sleep(Duration::from_millis(50)).await;
                }
            });
            Ok(Box::new(watch) as Box<dyn Watch<DynamicObject>>)
        },
    )
}

fn strip(mut object: DynamicObject) -> DynamicObject {
    if let Some(metadata) = object.get_mut("metadata").and_then(|m| m.as_object_mut()) {
        metadata.remove("managedFields");
        metadata.remove("annotations");
    }
    object
}

#[tokio::main]
async fn main() -> transwatch::Result<()> {
    let source = wrap_list_watch_with_config(
        pod_source().into_shared(),
        Some(transformer(strip)),
        WrapConfig::new().with_name("strip-pod-metadata"),
    );

    println!("=== List ===");
    let list = source.list(ListOptions::default()).await?;
    println!("{}", serde_json::to_string_pretty(&list).unwrap_or_default());

    println!("\n=== Watch ===");
    let watch = source
        .watch(ListOptions::new().with_resource_version("1000"))
        .await?;
    let events = watch.result_chan();
    while let Some(event) = events.recv().await {
        println!(
            "{:<9} {} -> {}",
            event.event_type,
            event.object.name().unwrap_or("?"),
            serde_json::to_string(&event.object).unwrap_or_default()
        );
    }

    println!("\nWatch closed.");
    Ok(())
}
