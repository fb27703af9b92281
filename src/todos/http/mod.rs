//! # HTTP Layer
//!
//! Maps the todo routes onto the service:
//!
//! ```text
//! GET    {base}/todos            list (served through the response cache)
//! POST   {base}/todos            create
//! GET    {base}/todos/{todoId}   get one
//! PATCH  {base}/todos/{todoId}   update
//! DELETE {base}/todos/{todoId}   delete
//! GET    {base}/docs.json        OpenAPI document
//! ```
//!
//! Handlers are generic over the store so tests can run the full router
//! against an `InMemoryStore`.

use crate::config::ServerConfig;
use crate::service::TodoService;
use crate::store::TodoStore;
use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::get;
use std::sync::Arc;
use std::time::Duration;

pub mod cache;
pub mod envelope;
pub mod handlers;
pub mod openapi;

use cache::ResponseCache;

/// Shared application dependencies.
pub struct AppState<S: TodoStore> {
    pub service: Arc<TodoService<S>>,
    pub cache: Arc<ResponseCache>,
    pub docs: Arc<utoipa::openapi::OpenApi>,
    pub base_path: String,
}

impl<S: TodoStore> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            cache: Arc::clone(&self.cache),
            docs: Arc::clone(&self.docs),
            base_path: self.base_path.clone(),
        }
    }
}

impl<S: TodoStore> AppState<S> {
    pub fn new(service: TodoService<S>, base_path: &str, cache_ttl: Duration) -> Self {
        Self {
            service: Arc::new(service),
            cache: Arc::new(ResponseCache::new(cache_ttl)),
            docs: Arc::new(openapi::document(base_path)),
            base_path: base_path.to_string(),
        }
    }

    pub fn from_config(service: TodoService<S>, config: &ServerConfig) -> Self {
        Self::new(service, &config.base_path, config.cache_ttl())
    }
}

/// Builds the full application router.
pub fn router<S: TodoStore + 'static>(state: AppState<S>) -> Router {
    let cache = Arc::clone(&state.cache);
    let base_path = state.base_path.clone();

    let list = get(handlers::list_todos::<S>)
        .layer(from_fn_with_state(Arc::clone(&cache), cache::cache_response));

    let api = Router::new()
        .route("/todos", list.post(handlers::create_todo::<S>))
        .route(
            "/todos/{todo_id}",
            get(handlers::get_todo::<S>)
                .patch(handlers::update_todo::<S>)
                .delete(handlers::delete_todo::<S>),
        )
        .layer(from_fn_with_state(cache, cache::invalidate_on_write))
        .route("/docs.json", get(handlers::serve_docs::<S>))
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .with_state(state);

    let app = if base_path.is_empty() {
        api
    } else {
        Router::new().nest(&base_path, api)
    };
    app.fallback(handlers::route_not_found)
}
