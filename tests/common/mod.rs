#![allow(dead_code)]

use std::sync::Arc;

use axum_test::TestServer;
use serde_json::{Value, json};

use snaplink::application::services::UrlService;
use snaplink::infrastructure::persistence::MemoryUrlRepository;
use snaplink::routes::router;
use snaplink::state::AppState;

/// Builds a test server over the full route set backed by the in-memory store.
pub fn test_server() -> TestServer {
    let (server, _repository) = test_server_with_repository();
    server
}

/// Like [`test_server`], but also hands back the repository so tests can
/// seed records the HTTP surface cannot produce (e.g. already expired ones).
pub fn test_server_with_repository() -> (TestServer, Arc<MemoryUrlRepository>) {
    let repository = Arc::new(MemoryUrlRepository::new());
    let url_service = Arc::new(UrlService::new(repository.clone()));
    let state = AppState::new(url_service);

    let server = TestServer::new(router(state, None)).unwrap();

    (server, repository)
}

/// Shortens `url` and returns the short code from the response body.
pub async fn shorten(server: &TestServer, url: &str) -> String {
    let response = server
        .post("/create_short_url")
        .json(&json!({ "url": url }))
        .await;

    response.json::<Value>()["short_url"]
        .as_str()
        .unwrap()
        .to_string()
}
