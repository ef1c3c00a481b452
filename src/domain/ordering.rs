use crate::domain::todo::{Status, Todo, TodoId};
use crate::error::{BoardError, Result};

/// A rank write destined for a single todo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderAssignment {
    pub id: TodoId,
    pub order: i64,
}

/// Everything a status move needs written to the store
///
/// `shifts` carries the rank bumps for todos displaced in the destination
/// column; the moved todo itself is described by the top-level fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovePlan {
    pub id: TodoId,
    pub status: Status,
    pub completed: bool,
    pub order: i64,
    pub shifts: Vec<OrderAssignment>,
}

/// Plans an explicit re-rank: each listed todo is assigned its position in
/// the list as its rank
///
/// The id sequence is taken as authoritative and may span columns (a client
/// re-ranking one column sends only that column's ids). The whole batch is
/// validated before any assignment is produced, so one unknown id rejects
/// the entire request and no partial rewrite can reach the store.
pub fn plan_reorder(todos: &[Todo], ids: &[TodoId]) -> Result<Vec<OrderAssignment>> {
    for id in ids {
        if !todos.iter().any(|t| t.id == *id) {
            return Err(BoardError::TodoNotFound(id.to_string()));
        }
    }

    Ok(ids
        .iter()
        .enumerate()
        .map(|(index, id)| OrderAssignment {
            id: id.clone(),
            order: index as i64,
        })
        .collect())
}

/// Plans a move of one todo into a column, at a target rank or appended
///
/// With a target rank, the moved todo takes exactly that rank and every
/// other todo in the destination with a rank at or past it is bumped up by
/// one, so the target rank is uniquely held. Without one, the todo is
/// appended after the column's current occupants. Ranks in the source
/// column are left alone; any gap the departure opens is tolerated and
/// heals on the column's next re-rank.
pub fn plan_move(
    todos: &[Todo],
    todo_id: &TodoId,
    status: Status,
    target_position: Option<i64>,
) -> Result<MovePlan> {
    let moved = todos
        .iter()
        .find(|t| t.id == *todo_id)
        .ok_or_else(|| BoardError::TodoNotFound(todo_id.to_string()))?;

    let others: Vec<&Todo> = todos
        .iter()
        .filter(|t| t.status == status && t.id != moved.id)
        .collect();

    let (order, shifts) = match target_position {
        Some(position) => {
            let shifts = others
                .iter()
                .filter(|t| t.order >= position)
                .map(|t| OrderAssignment {
                    id: t.id.clone(),
                    order: t.order + 1,
                })
                .collect();
            (position, shifts)
        }
        None => (others.len() as i64, Vec::new()),
    };

    Ok(MovePlan {
        id: moved.id.clone(),
        status,
        completed: status == Status::Done,
        order,
        shifts,
    })
}

/// Rank for a newly created todo: one past the highest rank currently held
/// in the TODO column, or 0 when the column is empty
///
/// Taking the maximum rather than the count keeps fresh todos at the bottom
/// even when earlier deletions left gaps in the column's ranks.
pub fn creation_order(todos: &[Todo]) -> i64 {
    todos
        .iter()
        .filter(|t| t.status == Status::Todo)
        .map(|t| t.order)
        .max()
        .map_or(0, |max| max + 1)
}
