use crate::{
    domain::{OrderAssignment, Todo, TodoId},
    error::Result,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub mod memory;

#[cfg(feature = "sqlite-storage")]
pub mod sqlite;

/// Storage trait for persisting the board's todos
#[async_trait]
pub trait Storage: Send + Sync {
    /// Initializes the storage backend
    async fn initialize(&self) -> Result<()>;

    /// Inserts a freshly created todo
    async fn insert(&self, todo: &Todo) -> Result<()>;

    /// Loads a todo by ID
    async fn fetch(&self, id: &TodoId) -> Result<Todo>;

    /// Lists every todo in canonical board order
    async fn list_all(&self) -> Result<Vec<Todo>>;

    /// Writes the full record of an existing todo
    async fn update(&self, todo: &Todo) -> Result<()>;

    /// Applies a batch of rank assignments, stamping each touched row with
    /// the given modification time. The batch lands whole or not at all.
    async fn apply_order_updates(
        &self,
        assignments: &[OrderAssignment],
        updated_at: DateTime<Utc>,
    ) -> Result<()>;

    /// Deletes a todo
    async fn delete(&self, id: &TodoId) -> Result<()>;
}
