use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::http::HeaderMap;
use axum::Router;
use bytes::Bytes;
use tokio::net::TcpListener;

use bhashini_proxy::{routes, AppConfig, AppState};

/// One request captured by a mock Bhashini endpoint.
pub struct RecordedRequest {
    pub headers: HeaderMap,
    pub body: Bytes,
}

pub type RequestLog = Arc<Mutex<Vec<RecordedRequest>>>;

pub fn request_log() -> RequestLog {
    Arc::new(Mutex::new(Vec::new()))
}

/// Serve `app` on an ephemeral port in the background.
pub async fn spawn(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server run");
    });
    format!("http://{addr}")
}

/// Proxy configuration with every Bhashini endpoint pointed at `upstream`.
pub fn test_config(upstream: &str, public_dir: PathBuf) -> AppConfig {
    AppConfig {
        api_key: Some("test-key".to_string()),
        public_dir,
        translate_url: format!("{upstream}/v1/translate"),
        tts_url: format!("{upstream}/v1/synthesize"),
        asr_url: format!("{upstream}/v1/recognize"),
        ..AppConfig::default()
    }
}

/// Start the proxy itself. The returned state reaches into the running
/// server; tests use it to drive the offline worker's lifecycle.
pub async fn spawn_proxy(config: AppConfig) -> (String, AppState) {
    let state = AppState::new(config);
    let app = Router::new()
        .merge(routes::create_routes())
        .with_state(state.clone());
    (spawn(app).await, state)
}

static DIR_SEQ: AtomicUsize = AtomicUsize::new(0);

/// Create a fresh public directory populated with `files` (relative path,
/// contents). Parent directories are created as needed.
pub fn temp_public_dir(files: &[(&str, &str)]) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "bhashini-proxy-test-{}-{}",
        std::process::id(),
        DIR_SEQ.fetch_add(1, Ordering::SeqCst)
    ));
    std::fs::create_dir_all(&dir).expect("create public dir");
    for (name, contents) in files {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create asset dir");
        }
        std::fs::write(&path, contents).expect("write shell asset");
    }
    dir
}
