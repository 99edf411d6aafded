use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use axum::http::{Method, StatusCode};
use bytes::Bytes;
use tracing::{debug, info};

use super::cache::{AssetResponse, CacheStorage, CacheStore};

/// Cache generation tag. Bump it when the shell assets change; activation
/// drops every store carrying another tag.
pub const CACHE_GENERATION: &str = "translator-v1";

/// Reserved prefix for proxy endpoints: never cached, never served from
/// cache.
pub const API_PREFIX: &str = "/api/";

/// Shell asset paths precached at install time. `/` and `/index.html` are
/// distinct cache entries even though they resolve to the same file.
pub const SHELL_ASSETS: &[&str] = &["/", "/index.html", "/manifest.json"];

/// Authoritative source of shell assets.
///
/// A missing asset is a resolved `404` response; `Err` means the origin
/// itself is unreachable (the offline case).
#[async_trait]
pub trait ShellOrigin: Send + Sync {
    async fn fetch(&self, path: &str) -> Result<AssetResponse>;
}

/// Offline-first cache layer for the application shell.
///
/// Read requests outside the API prefix are answered from the named cache
/// when possible, while a refresh keeps running against the origin. Writes
/// and API paths are never intercepted.
pub struct OfflineWorker {
    generation: String,
    storage: Arc<CacheStorage>,
    origin: Arc<dyn ShellOrigin>,
    store: Arc<CacheStore>,
}

impl OfflineWorker {
    pub fn new(storage: Arc<CacheStorage>, origin: Arc<dyn ShellOrigin>) -> Self {
        Self::with_generation(CACHE_GENERATION, storage, origin)
    }

    pub fn with_generation(
        generation: &str,
        storage: Arc<CacheStorage>,
        origin: Arc<dyn ShellOrigin>,
    ) -> Self {
        let store = storage.open(generation);
        Self {
            generation: generation.to_string(),
            storage,
            origin,
            store,
        }
    }

    /// Precache the shell asset list. All-or-nothing: if any asset cannot be
    /// fetched with status 200, the store is left untouched.
    pub async fn install(&self) -> Result<()> {
        let mut staged = Vec::with_capacity(SHELL_ASSETS.len());
        for path in SHELL_ASSETS {
            let response = self
                .origin
                .fetch(path)
                .await
                .with_context(|| format!("precache fetch of {path}"))?;
            if response.status != StatusCode::OK {
                bail!("precache fetch of {path} returned {}", response.status);
            }
            staged.push((*path, response));
        }
        for (path, response) in staged {
            self.store.put(path, response);
        }
        info!(
            "precached {} shell assets into {:?}",
            SHELL_ASSETS.len(),
            self.generation
        );
        Ok(())
    }

    /// Take over serving and drop caches left behind by other generations.
    pub fn activate(&self) {
        for name in self.storage.names() {
            if name != self.generation {
                self.storage.delete(&name);
                info!("dropped stale shell cache {:?}", name);
            }
        }
        info!("shell cache {:?} active", self.generation);
    }

    /// Apply the fetch policy to one request.
    ///
    /// `None` means the request is not intercepted (non-read method or API
    /// path) and must go straight to its regular handler. Otherwise the
    /// cached response wins when present, with the origin fetch continuing
    /// in the background; on a miss the caller gets whatever the origin
    /// produces, and only a status-200 response is stored.
    pub async fn handle(&self, method: &Method, path: &str) -> Option<Result<AssetResponse>> {
        if *method != Method::GET {
            return None;
        }
        if path.starts_with(API_PREFIX) {
            return None;
        }

        let cached = self.store.get(path);

        let store = Arc::clone(&self.store);
        let origin = Arc::clone(&self.origin);
        let target = path.to_string();
        let fetch_and_store = async move {
            let response = origin.fetch(&target).await?;
            if response.status == StatusCode::OK {
                store.put(&target, response.clone());
            }
            Ok::<AssetResponse, anyhow::Error>(response)
        };

        match cached {
            Some(hit) => {
                debug!("shell cache hit: {}", path);
                tokio::spawn(async move {
                    if let Err(err) = fetch_and_store.await {
                        debug!("background shell refresh failed: {:#}", err);
                    }
                });
                Some(Ok(hit))
            }
            None => {
                debug!("shell cache miss: {}", path);
                Some(fetch_and_store.await)
            }
        }
    }

    /// Origin read with no cache involvement, for requests the policy
    /// declines to intercept.
    pub async fn fetch_uncached(&self, path: &str) -> Result<AssetResponse> {
        self.origin.fetch(path).await
    }
}

/// Shell origin backed by the public directory on disk.
pub struct DiskOrigin {
    root: PathBuf,
}

impl DiskOrigin {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl ShellOrigin for DiskOrigin {
    async fn fetch(&self, path: &str) -> Result<AssetResponse> {
        // The shell is a flat public directory; parent traversal has no
        // legitimate use.
        if path.split('/').any(|segment| segment == "..") {
            return Ok(AssetResponse::not_found());
        }

        let mut relative = path.trim_start_matches('/').to_string();
        if relative.is_empty() || relative.ends_with('/') {
            relative.push_str("index.html");
        }

        let file = self.root.join(&relative);
        match tokio::fs::read(&file).await {
            Ok(body) => Ok(AssetResponse::ok(content_type_for(&relative), Bytes::from(body))),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(AssetResponse::not_found()),
            Err(err) => Err(err).with_context(|| format!("reading shell asset {path}")),
        }
    }
}

fn content_type_for(relative: &str) -> &'static str {
    match std::path::Path::new(relative)
        .extension()
        .and_then(|ext| ext.to_str())
    {
        Some("html") => "text/html",
        Some("css") => "text/css",
        Some("js") => "application/javascript",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        _ => "application/octet-stream",
    }
}
