use std::sync::Arc;

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use dashmap::DashMap;

/// A response held by (or fetched for) the shell cache.
#[derive(Debug, Clone)]
pub struct AssetResponse {
    pub status: StatusCode,
    pub content_type: String,
    pub body: Bytes,
}

impl AssetResponse {
    pub fn ok(content_type: &str, body: impl Into<Bytes>) -> Self {
        Self {
            status: StatusCode::OK,
            content_type: content_type.to_string(),
            body: body.into(),
        }
    }

    /// A resolved miss from the origin, as opposed to an unreachable origin.
    pub fn not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            content_type: "text/plain".to_string(),
            body: Bytes::from_static(b"not found"),
        }
    }
}

impl IntoResponse for AssetResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, self.content_type)],
            self.body,
        )
            .into_response()
    }
}

/// One named store: request path -> stored response. Entries have no
/// individual expiry; the store as a whole is dropped when its generation
/// tag goes stale.
#[derive(Debug, Default)]
pub struct CacheStore {
    entries: DashMap<String, AssetResponse>,
}

impl CacheStore {
    pub fn get(&self, path: &str) -> Option<AssetResponse> {
        self.entries.get(path).map(|entry| entry.value().clone())
    }

    pub fn put(&self, path: &str, response: AssetResponse) {
        self.entries.insert(path.to_string(), response);
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Registry of named cache stores, keyed by generation tag.
#[derive(Debug, Default)]
pub struct CacheStorage {
    stores: DashMap<String, Arc<CacheStore>>,
}

impl CacheStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a store by name, creating it empty if absent.
    pub fn open(&self, name: &str) -> Arc<CacheStore> {
        self.stores
            .entry(name.to_string())
            .or_default()
            .value()
            .clone()
    }

    pub fn delete(&self, name: &str) -> bool {
        self.stores.remove(name).is_some()
    }

    pub fn names(&self) -> Vec<String> {
        self.stores.iter().map(|entry| entry.key().clone()).collect()
    }
}
