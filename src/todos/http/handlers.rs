//! Request handlers for the todo routes.
//!
//! Handlers validate what the transport hands them, call the service, and
//! wrap the outcome in an [`Envelope`]. Every failure from below is turned
//! into an [`ApiFailure`]; nothing here panics or leaks internal errors.

use super::AppState;
use super::envelope::{ApiFailure, Envelope, Notice, Status};
use crate::error::TodoError;
use crate::model::{NewTodo, Todo, TodoPatch};
use crate::store::TodoStore;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{OriginalUri, Path, State};
use axum::http::{Method, StatusCode, Uri};
use serde::Deserialize;
use tracing::debug;
use utoipa::ToSchema;

const MISSING_KEYS: &str = "One of the following keys is missing 'title', 'body'";
const EMPTY_FIELDS: &str = "'title' and 'body' cannot be empty";
const ID_REQUIRED: &str = "todo Id is required";

/// Body accepted by create and update. Every field is optional here;
/// the handlers decide what is required.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct TodoBody {
    /// What the todo is about, in short. Must be unique.
    #[schema(example = "Dry clothes")]
    pub title: Option<String>,
    /// What you are planning to do, briefly
    #[schema(example = "Take clothes out of washing machine and dry them")]
    pub body: Option<String>,
}

type ApiResult<T> = Result<(StatusCode, Json<Envelope<T>>), ApiFailure>;

fn ok<T>(code: StatusCode, data: T) -> ApiResult<T> {
    Ok((code, Json(Envelope::ok(data))))
}

// Request-level problems are validation errors; they never reach the store.
fn invalid(msg: impl Into<String>) -> ApiFailure {
    ApiFailure::from_error(TodoError::Validation(msg.into()), "validate the request")
}

fn parse_body(payload: Result<Json<TodoBody>, JsonRejection>) -> Result<TodoBody, ApiFailure> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| invalid(rejection.body_text()))
}

fn present(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.is_empty())
}

fn require_id(todo_id: &str) -> Result<(), ApiFailure> {
    if todo_id.is_empty() {
        return Err(invalid(ID_REQUIRED));
    }
    Ok(())
}

/// Get all todos in the app
#[utoipa::path(
    get,
    path = "/todos",
    tag = "Todo",
    responses(
        (status = 200, description = "Successfully retrieves all the todos", body = Envelope<Vec<Todo>>),
        (status = 500, description = "Reading the data file failed", body = Notice),
    )
)]
pub async fn list_todos<S: TodoStore + 'static>(
    State(state): State<AppState<S>>,
) -> ApiResult<Vec<Todo>> {
    debug!("GET todos");
    let todos = state.service.get_all_todos().map_err(|e| {
        ApiFailure::from_error(e, "read from database").with_status(Status::Failure)
    })?;
    ok(StatusCode::OK, todos)
}

/// Get todo by id
#[utoipa::path(
    get,
    path = "/todos/{todoId}",
    tag = "Todo",
    params(("todoId" = String, Path, description = "ID of todo to return")),
    responses(
        (status = 200, description = "Successfully fetches the todo by id", body = Envelope<Todo>),
        (status = 404, description = "Requested todo is not found", body = Notice),
        (status = 500, description = "Internal server error", body = Notice),
    )
)]
pub async fn get_todo<S: TodoStore + 'static>(
    State(state): State<AppState<S>>,
    Path(todo_id): Path<String>,
) -> ApiResult<Todo> {
    debug!(todo_id = %todo_id, "GET todo");
    let todo = state
        .service
        .get_one_todo(&todo_id)
        .map_err(|e| ApiFailure::from_error(e, "fetch todo"))?;
    ok(StatusCode::OK, todo)
}

/// To create a new todo
#[utoipa::path(
    post,
    path = "/todos",
    tag = "Todo",
    request_body = TodoBody,
    responses(
        (status = 201, description = "Todo successfully created", body = Envelope<Todo>),
        (status = 400, description = "A key is missing or the title already exists", body = Notice),
        (status = 500, description = "Internal server error", body = Notice),
    )
)]
pub async fn create_todo<S: TodoStore + 'static>(
    State(state): State<AppState<S>>,
    payload: Result<Json<TodoBody>, JsonRejection>,
) -> ApiResult<Todo> {
    let body = parse_body(payload)?;
    let (Some(title), Some(text)) = (present(body.title), present(body.body)) else {
        return Err(invalid(MISSING_KEYS).with_status(Status::Failure));
    };

    debug!(title = %title, "POST todo");
    let created = state
        .service
        .create_new_todo(NewTodo::new(title, text))
        .map_err(|e| ApiFailure::from_error(e, "create todo"))?;
    ok(StatusCode::CREATED, created)
}

/// To edit a todo with todoId
#[utoipa::path(
    patch,
    path = "/todos/{todoId}",
    tag = "Todo",
    params(("todoId" = String, Path, description = "Id of the todo to edit")),
    request_body = TodoBody,
    responses(
        (status = 200, description = "Successfully edited the todo", body = Envelope<Todo>),
        (status = 400, description = "Empty field, or the title belongs to another todo", body = Notice),
        (status = 404, description = "Todo with todoId does not exist", body = Notice),
        (status = 500, description = "Internal server error", body = Notice),
    )
)]
pub async fn update_todo<S: TodoStore + 'static>(
    State(state): State<AppState<S>>,
    Path(todo_id): Path<String>,
    payload: Result<Json<TodoBody>, JsonRejection>,
) -> ApiResult<Todo> {
    require_id(&todo_id)?;
    let body = parse_body(payload)?;

    let empty = |field: &Option<String>| field.as_deref().is_some_and(str::is_empty);
    if empty(&body.title) || empty(&body.body) {
        return Err(invalid(EMPTY_FIELDS));
    }

    debug!(todo_id = %todo_id, "PATCH todo");
    let patch = TodoPatch {
        title: body.title,
        body: body.body,
    };
    let updated = state
        .service
        .update_one_todo(&todo_id, &patch)
        .map_err(|e| ApiFailure::from_error(e, "edit the todo"))?;
    ok(StatusCode::OK, updated)
}

/// To delete a todo with todoId
#[utoipa::path(
    delete,
    path = "/todos/{todoId}",
    tag = "Todo",
    params(("todoId" = String, Path, description = "The id of todo that needs to be deleted")),
    responses(
        (status = 200, description = "The todo got deleted", body = Notice),
        (status = 404, description = "The todo with id todoId may not exist", body = Notice),
        (status = 500, description = "Internal server error", body = Notice),
    )
)]
pub async fn delete_todo<S: TodoStore + 'static>(
    State(state): State<AppState<S>>,
    Path(todo_id): Path<String>,
) -> Result<Json<Notice>, ApiFailure> {
    require_id(&todo_id)?;
    debug!(todo_id = %todo_id, "DELETE todo");
    state
        .service
        .delete_one_todo(&todo_id)
        .map_err(|e| ApiFailure::from_error(e, "delete the todo"))?;
    Ok(Json(Notice::ok()))
}

pub async fn serve_docs<S: TodoStore + 'static>(
    State(state): State<AppState<S>>,
) -> Json<utoipa::openapi::OpenApi> {
    Json(state.docs.as_ref().clone())
}

pub async fn route_not_found(uri: Uri) -> ApiFailure {
    ApiFailure::new(
        StatusCode::NOT_FOUND,
        Status::Failed,
        format!("No route for {}", uri.path()),
    )
}

pub async fn method_not_allowed(method: Method, OriginalUri(uri): OriginalUri) -> ApiFailure {
    ApiFailure::new(
        StatusCode::METHOD_NOT_ALLOWED,
        Status::Failed,
        format!("Method {} is not allowed on {}", method, uri.path()),
    )
}
