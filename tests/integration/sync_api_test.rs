//! Integration tests for the sync trigger and queue inspection endpoints.

mod helpers;

use axum::http::{Method, StatusCode};
use serde_json::json;

use helpers::{PingReceiver, TestApp, closed_port_url};
use pluginsync_core::types::id::{OrganizationId, PluginId};
use pluginsync_entity::organization::ORGANIZATION_COLLECTION;
use pluginsync_entity::plugin::PLUGIN_COLLECTION;

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();

    let (status, body) = app.request(Method::GET, "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "ok");

    let (status, body) = app.request(Method::GET, "/api/health/detailed", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["store_provider"], "memory");
    assert_eq!(body["data"]["store"], "connected");
}

#[tokio::test]
async fn test_sync_queues_and_pings_every_plugin() {
    let receiver = PingReceiver::start().await;
    let app = TestApp::new();
    let p1 = app.add_plugin(&receiver.url("/one"), 0);
    let p2 = app.add_plugin(&receiver.url("/two"), 5);
    let org = app.add_organization(&[p1, p2]);

    let (status, body) = app
        .sync(&org.to_string(), "msg.created", json!({ "text": "hello" }))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["organization_id"], org.to_string());
    assert_eq!(body["data"]["event"], "msg.created");
    assert_eq!(body["data"]["plugins"], json!([p1.to_string(), p2.to_string()]));

    let one = app.plugin(p1);
    assert_eq!(one.queue_sequence, 1);
    assert_eq!(one.queue[0].message, json!({ "text": "hello" }));
    assert_eq!(app.plugin(p2).queue[0].id, 6);

    assert_eq!(receiver.paths(), vec!["/one", "/two"]);
}

#[tokio::test]
async fn test_sync_empty_organization() {
    let receiver = PingReceiver::start().await;
    let app = TestApp::new();
    let org = app.add_organization(&[]);

    let (status, body) = app.sync(&org.to_string(), "evt", json!(null)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["plugins"], json!([]));
    assert_eq!(app.store.write_count(), 0);
    assert!(receiver.received().is_empty());
}

#[tokio::test]
async fn test_sync_unknown_organization_is_404() {
    let app = TestApp::new();
    app.add_plugin("http://127.0.0.1:9/sync", 0);

    let (status, body) = app
        .sync(&OrganizationId::new().to_string(), "evt", json!(null))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");
    assert_eq!(app.store.write_count(), 0);
}

#[tokio::test]
async fn test_sync_malformed_organization_id_is_400() {
    let app = TestApp::new();
    let (status, body) = app.sync("acme-corp", "evt", json!(null)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INVALID_IDENTIFIER");
}

#[tokio::test]
async fn test_sync_requires_event() {
    let app = TestApp::new();
    let org = app.add_organization(&[]);

    let (status, body) = app.sync(&org.to_string(), "", json!(null)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION");

    let (status, _) = app
        .request(
            Method::POST,
            &format!("/api/organizations/{org}/sync"),
            Some(json!({ "message": 1 })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_endpoint_reports_502_after_pinging_others() {
    let receiver = PingReceiver::start().await;
    let app = TestApp::new();
    let p1 = app.add_plugin("", 0);
    let p2 = app.add_plugin(&receiver.url("/two"), 0);
    let org = app.add_organization(&[p1, p2]);

    let (status, body) = app.sync(&org.to_string(), "evt", json!(1)).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "NO_ENDPOINT");
    assert_eq!(app.plugin(p1).queue.len(), 1);
    assert_eq!(app.plugin(p2).queue.len(), 1);
    assert_eq!(receiver.paths(), vec!["/two"]);
}

#[tokio::test]
async fn test_unreachable_plugin_is_transport_error() {
    let receiver = PingReceiver::start().await;
    let app = TestApp::new();
    let p1 = app.add_plugin(&closed_port_url().await, 0);
    let p2 = app.add_plugin(&receiver.url("/two"), 0);
    let org = app.add_organization(&[p1, p2]);

    let (status, body) = app.sync(&org.to_string(), "evt", json!(1)).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "TRANSPORT");
    assert_eq!(receiver.paths(), vec!["/two"]);
}

#[tokio::test]
async fn test_plugin_error_status_still_counts_as_delivered() {
    let receiver = PingReceiver::start().await;
    let app = TestApp::new();
    let p1 = app.add_plugin(&receiver.url("/fail"), 0);
    let org = app.add_organization(&[p1]);

    let (status, body) = app.sync(&org.to_string(), "evt", json!(1)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["pinged"], 1);
}

#[tokio::test]
async fn test_missing_plugin_record_skips_pings() {
    let receiver = PingReceiver::start().await;
    let app = TestApp::new();
    let p1 = app.add_plugin(&receiver.url("/one"), 0);
    let org = app.add_organization(&[p1, PluginId::new()]);

    let (status, body) = app.sync(&org.to_string(), "evt", json!(1)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");
    assert_eq!(app.plugin(p1).queue.len(), 1);
    assert!(receiver.received().is_empty());
}

#[tokio::test]
async fn test_repeated_syncs_and_queue_endpoint() {
    let receiver = PingReceiver::start().await;
    let app = TestApp::new();
    let p1 = app.add_plugin(&receiver.url("/one"), 0);
    let org = app.add_organization(&[p1]);

    for n in 0..3 {
        let (status, _) = app.sync(&org.to_string(), "evt", json!(n)).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = app
        .request(Method::GET, &format!("/api/plugins/{p1}/queue"), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["queuepid"], 3);
    let ids: Vec<i64> = body["data"]["messages"]
        .as_array()
        .expect("messages")
        .iter()
        .filter_map(|m| m["id"].as_i64())
        .collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(body["data"]["messages"][2]["message"], 2);
    assert_eq!(receiver.received().len(), 3);
}

#[tokio::test]
async fn test_queue_endpoint_errors() {
    let app = TestApp::new();

    let (status, _) = app
        .request(Method::GET, "/api/plugins/nope/queue", None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .request(Method::GET, &format!("/api/plugins/{}/queue", PluginId::new()), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_records_stored_with_uppercase_ids_are_synced() {
    let receiver = PingReceiver::start().await;
    let app = TestApp::new();
    let plugin = PluginId::new();
    let org = OrganizationId::new();
    app.store
        .insert(
            PLUGIN_COLLECTION,
            json!({
                "id": plugin.to_string().to_uppercase(),
                "sync_request_url": receiver.url("/upper"),
                "queuepid": 7,
            }),
        )
        .expect("seed plugin");
    app.store
        .insert(
            ORGANIZATION_COLLECTION,
            json!({
                "id": org.to_string().to_uppercase(),
                "plugins": [{ "plugin_id": plugin.to_string().to_uppercase() }],
            }),
        )
        .expect("seed organization");

    let (status, _) = app.sync(&org.to_string(), "evt", json!(1)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .request(Method::GET, &format!("/api/plugins/{plugin}/queue"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["queuepid"], 8);
    assert_eq!(receiver.paths(), vec!["/upper"]);
}
