use crate::domain::{
    creation_order, plan_move, plan_reorder, CreateTodo, Status, Todo, TodoId, UpdateTodo,
};
use crate::error::{BoardError, Result};
use crate::storage::Storage;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

/// Coordinates board mutations against the store
///
/// Every ordering mutation follows the same sequence: read a board snapshot,
/// compute a pure write plan from it, apply the writes, then read back one
/// fresh canonical listing for the response. A failed write aborts the rest
/// of the sequence, so a client never receives a listing that the store does
/// not hold.
pub struct BoardService {
    store: Arc<dyn Storage>,
}

impl BoardService {
    pub fn new(store: Arc<dyn Storage>) -> Self {
        Self { store }
    }

    /// Returns every todo in canonical board order
    pub async fn list(&self) -> Result<Vec<Todo>> {
        self.store.list_all().await
    }

    /// Creates a todo at the bottom of the TODO column and returns it
    pub async fn create(&self, req: CreateTodo) -> Result<Todo> {
        req.validate()?;

        let snapshot = self.store.list_all().await?;
        let todo = Todo::new(req, creation_order(&snapshot));
        self.store.insert(&todo).await?;

        info!(id = %todo.id, "created todo");
        Ok(todo)
    }

    /// Applies a partial field edit and returns the updated record
    ///
    /// Never touches rank or status; a direct `completed` edit lands as-is.
    pub async fn update_fields(&self, id: &TodoId, changes: UpdateTodo) -> Result<Todo> {
        let mut todo = self.store.fetch(id).await?;
        todo.apply_update(changes);
        self.store.update(&todo).await?;

        info!(id = %todo.id, "updated todo fields");
        Ok(todo)
    }

    /// Deletes a todo. Sibling ranks are left alone; the gap heals on the
    /// column's next reorder or move.
    pub async fn delete(&self, id: &TodoId) -> Result<()> {
        self.store.delete(id).await?;

        info!(id = %id, "deleted todo");
        Ok(())
    }

    /// Re-ranks the listed todos to match their position in the list, then
    /// returns the fresh canonical listing
    pub async fn reorder(&self, ids: &[TodoId]) -> Result<Vec<Todo>> {
        let snapshot = self.store.list_all().await?;
        let assignments = plan_reorder(&snapshot, ids)?;
        self.store
            .apply_order_updates(&assignments, Utc::now())
            .await?;

        info!(count = assignments.len(), "applied reorder");
        self.list().await
    }

    /// Moves a todo to a column, at a target rank or appended, then returns
    /// the fresh canonical listing
    pub async fn move_to_status(
        &self,
        id: &TodoId,
        status: Status,
        target_position: Option<i64>,
    ) -> Result<Vec<Todo>> {
        let snapshot = self.store.list_all().await?;
        let plan = plan_move(&snapshot, id, status, target_position)?;

        let mut moved = snapshot
            .into_iter()
            .find(|t| t.id == plan.id)
            .ok_or_else(|| BoardError::TodoNotFound(id.to_string()))?;
        moved.move_to(plan.status, plan.order);
        self.store.update(&moved).await?;
        // The shift batch carries the moved row's stamp, so every row touched
        // by one move shares one modification time
        self.store
            .apply_order_updates(&plan.shifts, moved.updated_at)
            .await?;

        info!(id = %plan.id, status = %plan.status, shifted = plan.shifts.len(), "moved todo");
        self.list().await
    }
}
