//! Time-boxed response cache for read routes.
//!
//! Entries are keyed by method plus path-and-query and expire after the
//! configured TTL. Only `200 OK` responses of a known size up to
//! `MAX_CACHED_BODY` are stored; larger ones pass through untouched. Any
//! successful write that passes through [`invalidate_on_write`] drops every
//! entry and bumps the cache generation, so a read that started before the
//! write cannot store its now stale response afterwards.

use axum::body::{Body, Bytes, HttpBody, to_bytes};
use axum::extract::{Request, State};
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use super::envelope::{ApiFailure, Status};

const MAX_CACHED_BODY: usize = 8 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct CachedResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl IntoResponse for CachedResponse {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }
}

struct Entry {
    stored_at: Instant,
    response: CachedResponse,
}

pub struct ResponseCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, Entry>>,
    // Bumped by every clear, always while `entries` is locked.
    generation: AtomicU64,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
            generation: AtomicU64::new(0),
        }
    }

    pub fn enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    pub fn key(method: &Method, uri: &Uri) -> String {
        let target = uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or_else(|| uri.path());
        format!("{} {}", method, target)
    }

    /// A fresh entry for `key`. Stale entries are evicted on the way.
    pub fn get(&self, key: &str) -> Option<CachedResponse> {
        let mut entries = self.entries.lock().ok()?;
        let fresh = entries
            .get(key)
            .map(|entry| entry.stored_at.elapsed() < self.ttl)?;
        if fresh {
            entries.get(key).map(|entry| entry.response.clone())
        } else {
            entries.remove(key);
            None
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Stores `response` unless the cache was cleared since `generation`
    /// was read. Returns whether the entry was kept.
    pub fn put(&self, key: String, response: CachedResponse, generation: u64) -> bool {
        let Ok(mut entries) = self.entries.lock() else {
            return false;
        };
        if self.generation.load(Ordering::SeqCst) != generation {
            return false;
        }
        entries.insert(
            key,
            Entry {
                stored_at: Instant::now(),
                response,
            },
        );
        true
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            self.generation.fetch_add(1, Ordering::SeqCst);
            entries.clear();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Serves GET requests from the cache, storing `200 OK` responses on a miss.
pub async fn cache_response(
    State(cache): State<Arc<ResponseCache>>,
    request: Request,
    next: Next,
) -> Response {
    if request.method() != Method::GET || !cache.enabled() {
        return next.run(request).await;
    }

    let key = ResponseCache::key(request.method(), request.uri());
    if let Some(hit) = cache.get(&key) {
        debug!(%key, "cache hit");
        return hit.into_response();
    }

    let generation = cache.generation();
    let response = next.run(request).await;
    if response.status() != StatusCode::OK {
        return response;
    }

    let (parts, body) = response.into_parts();
    let fits = body
        .size_hint()
        .upper()
        .is_some_and(|len| len <= MAX_CACHED_BODY as u64);
    if !fits {
        debug!(%key, "response too large to cache");
        return Response::from_parts(parts, body);
    }
    let bytes = match to_bytes(body, MAX_CACHED_BODY).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(error = %e, %key, "could not buffer response for caching");
            return ApiFailure::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                Status::Failed,
                "Something went wrong when trying to read the response",
            )
            .into_response();
        }
    };

    let cached = CachedResponse {
        status: parts.status,
        headers: parts.headers.clone(),
        body: bytes.clone(),
    };
    if cache.put(key.clone(), cached, generation) {
        debug!(%key, "cache store");
    } else {
        debug!(%key, "cache cleared during request, not storing");
    }
    Response::from_parts(parts, Body::from(bytes))
}

/// Drops every cached entry after a successful non-GET request.
pub async fn invalidate_on_write(
    State(cache): State<Arc<ResponseCache>>,
    request: Request,
    next: Next,
) -> Response {
    let is_write = !matches!(*request.method(), Method::GET | Method::HEAD);
    let response = next.run(request).await;
    if is_write && response.status().is_success() {
        debug!("write succeeded, clearing response cache");
        cache.clear();
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cached(body: &'static str) -> CachedResponse {
        CachedResponse {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: Bytes::from_static(body.as_bytes()),
        }
    }

    #[test]
    fn key_includes_method_and_query() {
        let uri: Uri = "/api/v1/todos?x=1".parse().unwrap();
        assert_eq!(ResponseCache::key(&Method::GET, &uri), "GET /api/v1/todos?x=1");
    }

    #[test]
    fn fresh_entry_is_returned() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        cache.put("GET /todos".into(), cached("[]"), cache.generation());
        let hit = cache.get("GET /todos").unwrap();
        assert_eq!(hit.body, Bytes::from_static(b"[]"));
        assert!(cache.get("GET /other").is_none());
    }

    #[test]
    fn expired_entry_is_evicted() {
        let cache = ResponseCache::new(Duration::from_millis(1));
        cache.put("GET /todos".into(), cached("[]"), cache.generation());
        std::thread::sleep(Duration::from_millis(5));
        assert!(cache.get("GET /todos").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn zero_ttl_disables_cache() {
        assert!(!ResponseCache::new(Duration::ZERO).enabled());
    }

    #[test]
    fn clear_drops_everything() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        cache.put("a".into(), cached("1"), cache.generation());
        cache.put("b".into(), cached("2"), cache.generation());
        cache.clear();
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn response_read_before_a_clear_is_not_stored() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        let started = cache.generation();

        // A write lands while the read is still in flight
        cache.clear();

        assert!(!cache.put("GET /todos".into(), cached("[]"), started));
        assert!(cache.get("GET /todos").is_none());
        assert!(cache.put("GET /todos".into(), cached("[]"), cache.generation()));
    }
}
