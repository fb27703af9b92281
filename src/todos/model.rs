use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    #[schema(example = "51233d3a-c3d4-44f6-b340-1b060b26b642")]
    pub id: String,
    /// Unique across the collection
    #[schema(example = "Dry clothes")]
    pub title: String,
    #[schema(example = "Take clothes out of washing machine and dry them")]
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    /// Builds a fresh record: new id, `created_at == updated_at`.
    pub fn new(title: String, body: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title,
            body,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns the record that results from laying `patch` over `self`.
    /// Timestamps are left alone; stamping is the store's call.
    pub fn merged(&self, patch: &TodoPatch) -> Todo {
        let mut next = self.clone();
        if let Some(title) = &patch.title {
            next.title = title.clone();
        }
        if let Some(body) = &patch.body {
            next.body = body.clone();
        }
        next
    }

    pub fn same_content(&self, other: &Todo) -> bool {
        self.title == other.title && self.body == other.body
    }
}

/// Input for creating a record. Both fields are required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub title: String,
    pub body: String,
}

impl NewTodo {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Partial update; `None` fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub body: Option<String>,
}

impl TodoPatch {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            body: None,
        }
    }

    pub fn body(body: impl Into<String>) -> Self {
        Self {
            title: None,
            body: Some(body.into()),
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// Next `updated_at` for a record last stamped at `previous`.
///
/// Always strictly later than `previous`, even if the wall clock stalls or
/// steps backwards.
pub fn next_stamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_todo_has_equal_timestamps() {
        let todo = Todo::new("Dry clothes".into(), "Take clothes out".into());
        assert_eq!(todo.created_at, todo.updated_at);
        assert!(Uuid::parse_str(&todo.id).is_ok());
    }

    #[test]
    fn merged_only_touches_provided_fields() {
        let todo = Todo::new("Title".into(), "Body".into());
        let merged = todo.merged(&TodoPatch::body("Other"));
        assert_eq!(merged.title, "Title");
        assert_eq!(merged.body, "Other");
        assert_eq!(merged.updated_at, todo.updated_at);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let todo = Todo::new("T".into(), "B".into());
        let value = serde_json::to_value(&todo).unwrap();
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
        assert!(value.get("created_at").is_none());
    }

    #[test]
    fn next_stamp_moves_forward_from_future_stamp() {
        let ahead = Utc::now() + Duration::hours(1);
        assert!(next_stamp(ahead) > ahead);
    }
}
