use crate::domain::{sort_canonical, OrderAssignment, Todo, TodoId};
use crate::error::{BoardError, Result};
use crate::storage::Storage;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// In-memory backend. Not durable; used by tests and local development.
#[derive(Default)]
pub struct MemoryStorage {
    todos: Mutex<HashMap<String, Todo>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn locked(&self) -> Result<MutexGuard<'_, HashMap<String, Todo>>> {
        self.todos
            .lock()
            .map_err(|_| BoardError::Storage("todo map lock poisoned".to_string()))
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn initialize(&self) -> Result<()> {
        Ok(())
    }

    async fn insert(&self, todo: &Todo) -> Result<()> {
        let mut todos = self.locked()?;
        todos.insert(todo.id.to_string(), todo.clone());
        Ok(())
    }

    async fn fetch(&self, id: &TodoId) -> Result<Todo> {
        let todos = self.locked()?;
        todos
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| BoardError::TodoNotFound(id.to_string()))
    }

    async fn list_all(&self) -> Result<Vec<Todo>> {
        let todos = self.locked()?;
        let mut all: Vec<Todo> = todos.values().cloned().collect();
        sort_canonical(&mut all);
        Ok(all)
    }

    async fn update(&self, todo: &Todo) -> Result<()> {
        let mut todos = self.locked()?;
        if !todos.contains_key(todo.id.as_str()) {
            return Err(BoardError::TodoNotFound(todo.id.to_string()));
        }
        todos.insert(todo.id.to_string(), todo.clone());
        Ok(())
    }

    async fn apply_order_updates(
        &self,
        assignments: &[OrderAssignment],
        updated_at: DateTime<Utc>,
    ) -> Result<()> {
        let mut todos = self.locked()?;

        // Validate the whole batch under the lock before touching anything
        for assignment in assignments {
            if !todos.contains_key(assignment.id.as_str()) {
                return Err(BoardError::TodoNotFound(assignment.id.to_string()));
            }
        }

        for assignment in assignments {
            if let Some(todo) = todos.get_mut(assignment.id.as_str()) {
                todo.order = assignment.order;
                todo.updated_at = updated_at;
            }
        }
        Ok(())
    }

    async fn delete(&self, id: &TodoId) -> Result<()> {
        let mut todos = self.locked()?;
        todos
            .remove(id.as_str())
            .map(|_| ())
            .ok_or_else(|| BoardError::TodoNotFound(id.to_string()))
    }
}
