// Stub search backend shared by the integration tests in one test binary.
use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Deserialize;
use serde_json::json;
use std::{
    sync::{Arc, Mutex, OnceLock},
    time::Duration,
};

use price_widget::domain::Notifier;

// Base URL of the stub backend once it is accepting connections.
static SERVER_URL: OnceLock<String> = OnceLock::new();
// One-time guard so the stub is only started once per test binary.
static SERVER_READY: OnceLock<()> = OnceLock::new();

#[derive(Deserialize)]
struct SearchBody {
    product_name: String,
}

// Canned replies keyed by the searched product name.
async fn search(Json(body): Json<SearchBody>) -> Response {
    match body.product_name.as_str() {
        "headphones" => Json(json!({
            "success": true,
            "results": [
                { "platform": "A", "product_name": "X", "price": 999, "url": "http://a" },
                { "platform": "B", "product_name": "X", "price": 999, "url": "http://b" }
            ]
        }))
        .into_response(),
        "laptop" => Json(json!({
            "success": true,
            "results": [
                { "platform": "Amazon", "product_name": "Laptop 14", "price": 54999, "url": "https://amazon.example/laptop" },
                { "platform": "Flipkart", "product_name": "Laptop 14", "price": 52499.5, "url": "https://flipkart.example/laptop" },
                { "platform": "Croma", "product_name": "Laptop 14", "price": 56000, "url": "https://croma.example/laptop" }
            ],
            "analysis": {
                "best_platform": "Flipkart",
                "best_price": 52499.5,
                "potential_savings": 3500.5,
                "total_platforms": 3
            }
        }))
        .into_response(),
        "mixed" => Json(json!({
            "success": true,
            "results": [
                { "platform": "Bad", "product_name": "Mouse", "price": -5, "url": "http://bad" },
                { "platform": "Good", "product_name": "Mouse", "price": 499, "url": "http://good" }
            ]
        }))
        .into_response(),
        "empty" => Json(json!({ "success": true, "results": [] })).into_response(),
        "boom" => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "scraper crashed" })),
        )
            .into_response(),
        "garbled" => (StatusCode::OK, "<html>maintenance</html>").into_response(),
        _ => Json(json!({
            "success": false,
            "message": "No results found. Try a different search term."
        }))
        .into_response(),
    }
}

// Ensure the stub backend is running and return its base URL.
pub fn ensure_server() -> &'static str {
    SERVER_READY.get_or_init(|| {
        let published_url = Arc::new(OnceLock::<String>::new());
        let published_url_thread = Arc::clone(&published_url);
        // Own OS thread and runtime so the stub outlives each `#[tokio::test]` runtime.
        std::thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("test runtime");
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("bind ephemeral test port");
                let addr = listener.local_addr().expect("get local addr");
                let _ = published_url_thread.set(format!("http://{}", addr));
                let app = Router::new().route("/search", post(search));
                axum::serve(listener, app).await.expect("stub server failed");
            });
        });
        wait_for_server_url_and_readiness(published_url);
    });

    SERVER_URL
        .get()
        .expect("server url should be initialized")
        .as_str()
}

fn wait_for_server_url_and_readiness(published_url: Arc<OnceLock<String>>) {
    let base_url = loop {
        if let Some(url) = published_url.get() {
            break url.clone();
        }
        std::thread::sleep(Duration::from_millis(10));
    };
    let _ = SERVER_URL.set(base_url.clone());

    let addr = base_url
        .strip_prefix("http://")
        .expect("base url should use http://");
    for _ in 0..100 {
        if std::net::TcpStream::connect(addr).is_ok() {
            return;
        }
        std::thread::sleep(Duration::from_millis(20));
    }
    panic!("stub server did not become ready in time");
}

// Base URL of a port nothing listens on.
pub fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let addr = listener.local_addr().expect("get local addr");
    drop(listener);
    format!("http://{}", addr)
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub alerts: Mutex<Vec<String>>,
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        self.alerts
            .lock()
            .expect("alerts mutex poisoned")
            .push(message.to_string());
    }
}
