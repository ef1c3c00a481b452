use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

/// Opaque unique identifier for a todo, assigned by the server at creation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(String);

impl TodoId {
    /// Generates a fresh identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TodoId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<String> for TodoId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TodoId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Urgency of a todo
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Stable text form used on the wire and in storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LOW" => Ok(Self::Low),
            "MEDIUM" => Ok(Self::Medium),
            "HIGH" => Ok(Self::High),
            _ => Err(format!(
                "Invalid priority '{}'. Valid values: LOW, MEDIUM, HIGH",
                s
            )),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Long-term weight of a todo, tracked independently of [`Priority`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Importance {
    Low,
    #[default]
    Medium,
    High,
}

impl Importance {
    /// Stable text form used on the wire and in storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }
}

impl FromStr for Importance {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LOW" => Ok(Self::Low),
            "MEDIUM" => Ok(Self::Medium),
            "HIGH" => Ok(Self::High),
            _ => Err(format!(
                "Invalid importance '{}'. Valid values: LOW, MEDIUM, HIGH",
                s
            )),
        }
    }
}

impl fmt::Display for Importance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Column a todo lives in on the board
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    #[default]
    Todo,
    Doing,
    Done,
}

impl Status {
    /// Stable text form used on the wire and in storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "TODO",
            Self::Doing => "DOING",
            Self::Done => "DONE",
        }
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TODO" => Ok(Self::Todo),
            "DOING" => Ok(Self::Doing),
            "DONE" => Ok(Self::Done),
            _ => Err(format!(
                "Invalid status '{}'. Valid values: TODO, DOING, DONE",
                s
            )),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A todo card on the kanban board
///
/// `order` is the display rank within the todo's status partition; it is
/// meaningful only relative to other todos sharing the same status.
/// `completed` mirrors `status == Done` and is re-derived on every status
/// change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub importance: Importance,
    pub status: Status,
    pub completed: bool,
    pub order: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    /// Creates a new todo in the TODO column at the given rank
    pub fn new(req: CreateTodo, order: i64) -> Self {
        let now = Utc::now();
        Self {
            id: TodoId::new(),
            title: req.title.trim().to_string(),
            description: req.description.unwrap_or_default(),
            priority: req.priority.unwrap_or_default(),
            importance: req.importance.unwrap_or_default(),
            status: Status::Todo,
            completed: false,
            order,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies a partial field edit. Order and status are never touched here;
    /// a direct `completed` edit is last-write-wins and does not move the card
    pub fn apply_update(&mut self, changes: UpdateTodo) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(priority) = changes.priority {
            self.priority = priority;
        }
        if let Some(importance) = changes.importance {
            self.importance = importance;
        }
        if let Some(completed) = changes.completed {
            self.completed = completed;
        }
        self.updated_at = Utc::now();
    }

    /// Moves the todo to a column at the given rank, re-deriving `completed`
    pub fn move_to(&mut self, status: Status, order: i64) {
        self.status = status;
        self.completed = status == Status::Done;
        self.order = order;
        self.updated_at = Utc::now();
    }
}

/// Fields accepted when creating a todo
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTodo {
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub importance: Option<Importance>,
}

impl CreateTodo {
    /// Checks the one required field: a non-blank title
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.title.trim().is_empty() {
            return Err(crate::error::BoardError::title_required());
        }
        Ok(())
    }
}

/// Partial field edit; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTodo {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub importance: Option<Importance>,
    pub completed: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_req(title: &str) -> CreateTodo {
        CreateTodo {
            title: title.to_string(),
            ..CreateTodo::default()
        }
    }

    #[test]
    fn test_new_todo_defaults() {
        let todo = Todo::new(create_req("Write report"), 0);

        assert_eq!(todo.title, "Write report");
        assert_eq!(todo.description, "");
        assert_eq!(todo.priority, Priority::Medium);
        assert_eq!(todo.importance, Importance::Medium);
        assert_eq!(todo.status, Status::Todo);
        assert!(!todo.completed);
        assert_eq!(todo.order, 0);
        assert_eq!(todo.created_at, todo.updated_at);
    }

    #[test]
    fn test_new_todo_trims_title() {
        let todo = Todo::new(create_req("  Write report  "), 0);
        assert_eq!(todo.title, "Write report");
    }

    #[test]
    fn test_validate_rejects_missing_title() {
        assert!(create_req("").validate().is_err());
        assert!(create_req("   ").validate().is_err());
        assert!(create_req("ok").validate().is_ok());
    }

    #[test]
    fn test_apply_update_partial() {
        let mut todo = Todo::new(create_req("Original"), 0);

        todo.apply_update(UpdateTodo {
            title: Some("Renamed".to_string()),
            priority: Some(Priority::High),
            ..UpdateTodo::default()
        });

        assert_eq!(todo.title, "Renamed");
        assert_eq!(todo.priority, Priority::High);
        // Untouched fields keep their values
        assert_eq!(todo.description, "");
        assert_eq!(todo.importance, Importance::Medium);
        assert_eq!(todo.status, Status::Todo);
        assert_eq!(todo.order, 0);
    }

    #[test]
    fn test_apply_update_bumps_updated_at() {
        let mut todo = Todo::new(create_req("Task"), 0);
        let initial = todo.updated_at;

        std::thread::sleep(std::time::Duration::from_millis(10));
        todo.apply_update(UpdateTodo::default());

        assert!(todo.updated_at > initial);
    }

    #[test]
    fn test_apply_update_can_set_completed_without_status() {
        let mut todo = Todo::new(create_req("Task"), 0);

        todo.apply_update(UpdateTodo {
            completed: Some(true),
            ..UpdateTodo::default()
        });

        assert!(todo.completed);
        assert_eq!(todo.status, Status::Todo);
    }

    #[test]
    fn test_move_to_derives_completed() {
        let mut todo = Todo::new(create_req("Task"), 0);

        todo.move_to(Status::Done, 3);
        assert_eq!(todo.status, Status::Done);
        assert_eq!(todo.order, 3);
        assert!(todo.completed);

        todo.move_to(Status::Doing, 0);
        assert_eq!(todo.status, Status::Doing);
        assert!(!todo.completed);
    }

    #[test]
    fn test_enum_parsing() {
        assert_eq!("HIGH".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!("LOW".parse::<Importance>().unwrap(), Importance::Low);
        assert_eq!("DOING".parse::<Status>().unwrap(), Status::Doing);

        assert!("high".parse::<Priority>().is_err());
        assert!("".parse::<Status>().is_err());
        assert!("ARCHIVED".parse::<Status>().is_err());
    }

    #[test]
    fn test_enum_round_trip() {
        for status in [Status::Todo, Status::Doing, Status::Done] {
            assert_eq!(status.as_str().parse::<Status>().unwrap(), status);
        }
    }

    #[test]
    fn test_wire_format() {
        let todo = Todo::new(create_req("Task"), 0);
        let json = serde_json::to_string(&todo).unwrap();

        // camelCase timestamps, UPPERCASE enums, transparent id
        assert!(json.contains("\"createdAt\""));
        assert!(json.contains("\"updatedAt\""));
        assert!(json.contains("\"MEDIUM\""));
        assert!(json.contains("\"TODO\""));
        assert!(json.contains(&format!("\"id\":\"{}\"", todo.id)));

        let back: Todo = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, todo.id);
        assert_eq!(back.status, todo.status);
    }

    #[test]
    fn test_create_request_defaults() {
        let req: CreateTodo = serde_json::from_str(r#"{"title": "Just a title"}"#).unwrap();

        assert_eq!(req.title, "Just a title");
        assert!(req.description.is_none());
        assert!(req.priority.is_none());
        assert!(req.importance.is_none());
    }

    #[test]
    fn test_create_request_missing_title_deserializes_empty() {
        let req: CreateTodo = serde_json::from_str(r#"{"description": "no title"}"#).unwrap();
        assert_eq!(req.title, "");
        assert!(req.validate().is_err());
    }
}
