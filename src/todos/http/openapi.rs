//! OpenAPI description of the todo routes, served at `<base>/docs.json`
//! and printed by `todos openapi`.
//!
//! Operations come from the `#[utoipa::path]` annotations on the handlers and
//! schemas from the `ToSchema` derives on the wire types. Paths are declared
//! relative to the router; the base path is prefixed when the document is
//! built.

use super::envelope::{Notice, Status};
use super::handlers::{self, TodoBody};
use crate::model::Todo;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Todos API",
        description = "REST API for todo records kept in a JSON file"
    ),
    paths(
        handlers::list_todos,
        handlers::create_todo,
        handlers::get_todo,
        handlers::update_todo,
        handlers::delete_todo,
    ),
    components(schemas(Todo, TodoBody, Status, Notice)),
    tags((name = "Todo", description = "Todo records"))
)]
struct ApiDoc;

/// Builds the document for routes mounted under `base_path`.
pub fn document(base_path: &str) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    if !base_path.is_empty() {
        let paths = std::mem::take(&mut doc.paths.paths);
        doc.paths.paths = paths
            .into_iter()
            .map(|(path, item)| (format!("{}{}", base_path, path), item))
            .collect();
    }
    doc
}
