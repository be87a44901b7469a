//! Shared utilities for integration tests.

use std::collections::HashMap;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::Query;
use axum::http::{header, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use weather_proxy::config::{ApiKey, ProxyConfig};
use weather_proxy::http::HttpServer;
use weather_proxy::lifecycle::Shutdown;

pub const TEST_KEY: &str = "test-secret-key-42";

/// What the mock provider saw on its most recent call.
#[derive(Debug, Clone, Default)]
pub struct SeenRequest {
    pub path: String,
    pub query: HashMap<String, String>,
}

/// Handle to a running mock provider.
#[allow(dead_code)]
pub struct MockUpstream {
    pub addr: SocketAddr,
    hits: Arc<AtomicU32>,
    last: Arc<Mutex<Option<SeenRequest>>>,
}

#[allow(dead_code)]
impl MockUpstream {
    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    pub fn hits(&self) -> u32 {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> SeenRequest {
        self.last.lock().unwrap().clone().expect("upstream was never called")
    }
}

/// Start a programmable mock provider on an ephemeral port.
///
/// `f` receives the decoded query and returns the status and body to answer with.
pub async fn start_programmable_upstream<F, Fut>(f: F) -> MockUpstream
where
    F: Fn(HashMap<String, String>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let hits = Arc::new(AtomicU32::new(0));
    let last = Arc::new(Mutex::new(None));
    let f = Arc::new(f);

    let app = {
        let hits = hits.clone();
        let last = last.clone();
        Router::new().fallback(move |uri: Uri, Query(query): Query<HashMap<String, String>>| {
            let hits = hits.clone();
            let last = last.clone();
            let f = f.clone();
            async move {
                hits.fetch_add(1, Ordering::SeqCst);
                *last.lock().unwrap() = Some(SeenRequest {
                    path: uri.path().to_string(),
                    query: query.clone(),
                });
                let (status, body) = f(query).await;
                (
                    StatusCode::from_u16(status).unwrap(),
                    [(header::CONTENT_TYPE, "application/json")],
                    body,
                )
                    .into_response()
            }
        })
    };

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockUpstream { addr, hits, last }
}

/// Start a mock provider that always answers with the same status and body.
#[allow(dead_code)]
pub async fn start_fixed_upstream(status: u16, body: &'static str) -> MockUpstream {
    start_programmable_upstream(move |_| async move { (status, body.to_string()) }).await
}

/// Start a mock provider whose `search.json` redirects to a live JSON endpoint.
#[allow(dead_code)]
pub async fn start_redirecting_upstream() -> MockUpstream {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Arc::new(AtomicU32::new(0));

    let app = {
        let followed = hits.clone();
        Router::new()
            .route(
                "/v1/search.json",
                get(|| async {
                    (
                        StatusCode::FOUND,
                        [(header::LOCATION, "/elsewhere"), (header::CONTENT_TYPE, "application/json")],
                        r#"{"moved":"/elsewhere"}"#,
                    )
                }),
            )
            .route(
                "/elsewhere",
                get(move || {
                    followed.fetch_add(1, Ordering::SeqCst);
                    async { ([(header::CONTENT_TYPE, "application/json")], r#"{"followed":true}"#) }
                }),
            )
    };

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    // `hits` counts requests that reached the redirect target.
    MockUpstream {
        addr,
        hits,
        last: Arc::new(Mutex::new(None)),
    }
}

/// Proxy config pointed at `base_url` with the test credential.
pub fn proxy_config(base_url: &str) -> ProxyConfig {
    let mut config = ProxyConfig::default();
    config.listener.host = "127.0.0.1".into();
    config.listener.port = 0;
    config.upstream.base_url = base_url.to_string();
    config.upstream.api_key = Some(ApiKey::new(TEST_KEY));
    config
}

/// Run a proxy on an ephemeral port. Trigger the returned `Shutdown` to stop it.
pub async fn start_proxy(config: ProxyConfig) -> (String, Shutdown) {
    let listener = TcpListener::bind(config.listener.bind_address()).await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(config).unwrap();

    let shutdown = Shutdown::new();
    let receiver = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, receiver).await;
    });

    (format!("http://{}", addr), shutdown)
}

/// Test client that surfaces redirects instead of following them.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}
