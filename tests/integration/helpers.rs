//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{Method, Request, StatusCode, Uri};
use axum::routing::post;
use serde_json::{Value, json};
use tower::ServiceExt;

use pluginsync_core::config::AppConfig;
use pluginsync_core::types::id::{OrganizationId, PluginId};
use pluginsync_database::MemoryDocumentStore;
use pluginsync_entity::organization::ORGANIZATION_COLLECTION;
use pluginsync_entity::plugin::{PLUGIN_COLLECTION, Plugin};

/// Test application over an in-memory store.
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Store shared with the router, for seeding and inspection
    pub store: MemoryDocumentStore,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a new test application with default settings.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a test application with the given configuration.
    pub fn with_config(config: AppConfig) -> Self {
        let store = MemoryDocumentStore::new();
        let state = pluginsync_api::build_state(config.clone(), Arc::new(store.clone()))
            .expect("Failed to build state");

        Self {
            router: pluginsync_api::build_app(state),
            store,
            config,
        }
    }

    /// Seed a plugin record.
    pub fn add_plugin(&self, url: &str, seq: i64) -> PluginId {
        let id = PluginId::new();
        self.store
            .insert(
                PLUGIN_COLLECTION,
                json!({ "id": id.to_string(), "sync_request_url": url, "queue": [], "queuepid": seq }),
            )
            .expect("Failed to seed plugin");
        id
    }

    /// Seed an organization with the given plugins installed.
    pub fn add_organization(&self, plugins: &[PluginId]) -> OrganizationId {
        let id = OrganizationId::new();
        let installed: Vec<Value> = plugins
            .iter()
            .map(|p| json!({ "plugin_id": p.to_string() }))
            .collect();
        self.store
            .insert(
                ORGANIZATION_COLLECTION,
                json!({ "id": id.to_string(), "name": "Acme", "plugins": installed }),
            )
            .expect("Failed to seed organization");
        id
    }

    /// Read back a plugin record.
    pub fn plugin(&self, id: PluginId) -> Plugin {
        let doc = self
            .store
            .get(PLUGIN_COLLECTION, id.as_uuid())
            .expect("plugin not stored");
        Plugin::from_document(doc).expect("plugin does not decode")
    }

    /// Send a request through the router and decode the JSON response.
    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(v) => {
                builder = builder.header("content-type", "application/json");
                Body::from(v.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).expect("request"))
            .await
            .expect("router call");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    /// Trigger a sync for an organization.
    pub async fn sync(&self, organization_id: &str, event: &str, message: Value) -> (StatusCode, Value) {
        self.request(
            Method::POST,
            &format!("/api/organizations/{organization_id}/sync"),
            Some(json!({ "event": event, "message": message })),
        )
        .await
    }
}

/// One request received by a [`PingReceiver`].
#[derive(Debug, Clone)]
pub struct ReceivedPing {
    pub path: String,
    pub body_len: usize,
}

/// Local HTTP endpoint standing in for plugin callback URLs.
///
/// Paths containing `fail` answer 500, paths containing `slow` answer after
/// two seconds, anything else answers 200.
pub struct PingReceiver {
    base: String,
    received: Arc<Mutex<Vec<ReceivedPing>>>,
}

impl PingReceiver {
    /// Bind to an ephemeral local port and start serving.
    pub async fn start() -> Self {
        let received = Arc::new(Mutex::new(Vec::new()));
        let app = Router::new()
            .route("/{*path}", post(record))
            .with_state(Arc::clone(&received));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind receiver");
        let addr = listener.local_addr().expect("receiver addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("receiver serve");
        });

        Self {
            base: format!("http://{addr}"),
            received,
        }
    }

    /// Callback URL for `path` on this receiver.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base, path.trim_start_matches('/'))
    }

    /// Requests received so far.
    pub fn received(&self) -> Vec<ReceivedPing> {
        self.received.lock().expect("receiver lock").clone()
    }

    /// Sorted request paths received so far.
    pub fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.received().into_iter().map(|p| p.path).collect();
        paths.sort();
        paths
    }
}

async fn record(
    State(received): State<Arc<Mutex<Vec<ReceivedPing>>>>,
    uri: Uri,
    body: Bytes,
) -> StatusCode {
    let path = uri.path().to_string();
    received.lock().expect("receiver lock").push(ReceivedPing {
        path: path.clone(),
        body_len: body.len(),
    });

    if path.contains("slow") {
        tokio::time::sleep(Duration::from_secs(2)).await;
    }
    if path.contains("fail") {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::OK
    }
}

/// A local URL with nothing listening on it.
pub async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    format!("http://{addr}/sync")
}
