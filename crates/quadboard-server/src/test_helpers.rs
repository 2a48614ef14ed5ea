use std::sync::Arc;

use axum::Router;
use quadboard_service::LocalService;
use quadboard_store::JsonFileStore;
use tokio::net::TcpListener;

/// Build a test router backed by a notes file in a fresh temp dir.
pub async fn test_router() -> Router {
    let dir = tempfile::tempdir().unwrap().keep();
    let store = JsonFileStore::open(dir.join("notes.json")).await.unwrap();
    crate::routes::build_router(LocalService::new(Arc::new(store)))
}

/// A running test server with base_url and background task handle.
pub struct TestServer {
    pub base_url: String,
    _handle: tokio::task::JoinHandle<()>,
}

/// Spawn an axum test server on a random port. Returns the TestServer
/// with the `base_url` (e.g. "http://127.0.0.1:12345").
pub async fn spawn_test_server() -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{addr}");
    let app = test_router().await;
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    TestServer {
        base_url,
        _handle: handle,
    }
}
