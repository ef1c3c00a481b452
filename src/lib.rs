//! # Taskdeck
//!
//! Backend for a browser-based kanban todo board: ordered status columns,
//! drag-and-drop reordering, and a JSON HTTP API.
//!
//! The crate is split along the request path: [`api`] marshals JSON to
//! [`service::BoardService`], which turns board snapshots into write plans
//! via the pure [`domain::ordering`] functions and applies them through a
//! [`storage::Storage`] backend. Every ordering mutation answers with a
//! fresh listing in the canonical board order.

pub mod api;
pub mod domain;
pub mod error;
pub mod service;
pub mod storage;

// Re-export commonly used types
pub use domain::{
    todo::{CreateTodo, Importance, Priority, Status, Todo, TodoId, UpdateTodo},
    MovePlan, OrderAssignment,
};
pub use error::{BoardError, Result};
pub use service::BoardService;
pub use storage::Storage;
