//! Integration tests for the reqwest-backed ping transport.

mod helpers;

use std::sync::Arc;

use reqwest::Url;
use serde_json::json;

use helpers::{PingReceiver, closed_port_url};
use pluginsync_core::config::SyncConfig;
use pluginsync_core::error::ErrorKind;
use pluginsync_core::types::id::PluginId;
use pluginsync_database::MemoryDocumentStore;
use pluginsync_database::repositories::PluginRepository;
use pluginsync_entity::plugin::PLUGIN_COLLECTION;
use pluginsync_service::{HttpPingTransport, PingDispatcher, PingTransport};

fn transport(timeout: Option<u64>) -> HttpPingTransport {
    HttpPingTransport::new(&SyncConfig {
        ping_timeout_seconds: timeout,
        ..SyncConfig::default()
    })
    .expect("client")
}

#[tokio::test]
async fn test_post_has_empty_body() {
    let receiver = PingReceiver::start().await;
    let url = Url::parse(&receiver.url("/hook")).expect("url");

    let status = transport(None).post_empty(&url).await.expect("ping");

    assert_eq!(status, 200);
    let received = receiver.received();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].path, "/hook");
    assert_eq!(received[0].body_len, 0);
}

#[tokio::test]
async fn test_error_status_is_returned_not_raised() {
    let receiver = PingReceiver::start().await;
    let url = Url::parse(&receiver.url("/fail")).expect("url");

    let status = transport(None).post_empty(&url).await.expect("ping");
    assert_eq!(status, 500);
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let url = Url::parse(&closed_port_url().await).expect("url");

    let err = transport(None).post_empty(&url).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Transport);
}

#[tokio::test]
async fn test_timeout_is_transport_error() {
    let receiver = PingReceiver::start().await;
    let url = Url::parse(&receiver.url("/slow")).expect("url");

    let err = transport(Some(1)).post_empty(&url).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Transport);
}

#[tokio::test]
async fn test_dispatcher_pings_stored_callback() {
    let receiver = PingReceiver::start().await;
    let store = MemoryDocumentStore::new();
    let plugin = PluginId::new();
    store
        .insert(
            PLUGIN_COLLECTION,
            json!({ "id": plugin.to_string(), "sync_request_url": receiver.url("/cb?org=1") }),
        )
        .expect("seed");

    let dispatcher = PingDispatcher::new(
        Arc::new(PluginRepository::new(Arc::new(store))),
        Arc::new(transport(None)),
    );
    dispatcher.ping(&plugin.to_string()).await.expect("ping");

    assert_eq!(receiver.paths(), vec!["/cb"]);
}
