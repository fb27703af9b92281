use crate::error::{ErrorKind, TodoError};
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Ok,
    Failed,
    Failure,
}

/// The `{status, data, msg}` wrapper every response body with a payload uses.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Envelope<T> {
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            status: Status::Ok,
            data: Some(data),
            msg: None,
        }
    }
}

/// An envelope that never carries `data`: failures and bare successes.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Notice {
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "Cannot find todo with id df229dc4-ceac-4777-a04d-236085ba1a6")]
    pub msg: Option<String>,
}

impl Notice {
    pub fn ok() -> Self {
        Self {
            status: Status::Ok,
            msg: None,
        }
    }

    pub fn failed(status: Status, msg: impl Into<String>) -> Self {
        Self {
            status,
            msg: Some(msg.into()),
        }
    }
}

/// A failed request, ready to be rendered as an envelope.
#[derive(Debug, Clone)]
pub struct ApiFailure {
    pub code: StatusCode,
    pub status: Status,
    pub msg: String,
}

impl ApiFailure {
    pub fn new(code: StatusCode, status: Status, msg: impl Into<String>) -> Self {
        Self {
            code,
            status,
            msg: msg.into(),
        }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, Status::Failed, msg)
    }

    /// Maps a lower-layer error to a response.
    ///
    /// Caller-correctable errors keep their message. Storage and other
    /// internal errors are logged and replaced with a generic message
    /// naming `action`.
    pub fn from_error(err: TodoError, action: &str) -> Self {
        match err.kind() {
            ErrorKind::NotFound => Self::new(StatusCode::NOT_FOUND, Status::Failed, err.to_string()),
            ErrorKind::Conflict | ErrorKind::Validation => Self::bad_request(err.to_string()),
            ErrorKind::Storage => {
                error!(error = %err, action, "request failed");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Status::Failed,
                    format!("Something went wrong when trying to {}", action),
                )
            }
        }
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        (self.code, Json(Notice::failed(self.status, self.msg))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_envelope_omits_msg() {
        let value = serde_json::to_value(Envelope::ok(vec![1, 2])).unwrap();
        assert_eq!(value, serde_json::json!({"status": "OK", "data": [1, 2]}));
    }

    #[test]
    fn ok_notice_is_status_only() {
        let value = serde_json::to_value(Notice::ok()).unwrap();
        assert_eq!(value, serde_json::json!({"status": "OK"}));
    }

    #[test]
    fn not_found_maps_to_404_with_message() {
        let failure = ApiFailure::from_error(TodoError::NotFound("42".into()), "fetch todo");
        assert_eq!(failure.code, StatusCode::NOT_FOUND);
        assert_eq!(failure.msg, "Cannot find todo with id 42");
    }

    #[test]
    fn conflict_maps_to_400() {
        let failure = ApiFailure::from_error(TodoError::TitleConflict, "create todo");
        assert_eq!(failure.code, StatusCode::BAD_REQUEST);
        assert_eq!(failure.msg, "This title already exists");
    }

    #[test]
    fn validation_maps_to_400_keeping_message() {
        let err = TodoError::Validation("'title' and 'body' cannot be empty".into());
        let failure = ApiFailure::from_error(err, "edit the todo");
        assert_eq!(failure.code, StatusCode::BAD_REQUEST);
        assert_eq!(failure.status, Status::Failed);
        assert_eq!(failure.msg, "'title' and 'body' cannot be empty");
    }

    #[test]
    fn storage_errors_hide_details() {
        let err = TodoError::Store("disk on fire".into());
        let failure = ApiFailure::from_error(err, "create todo");
        assert_eq!(failure.code, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(failure.status, Status::Failed);
        assert_eq!(failure.msg, "Something went wrong when trying to create todo");
    }
}
