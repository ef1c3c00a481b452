use crate::domain::todo::{Status, Todo};
use std::cmp::Ordering;

/// Sorts todos in-place into the canonical board order
///
/// Canonical order is: status by workflow progression, then rank ascending
/// within each column, then newest-created first between equal ranks. Every
/// listing the server returns goes through this function, so a freshly
/// re-ranked column always renders in the order the client asked for.
///
/// # Examples
/// ```
/// use taskdeck::domain::sorting::sort_canonical;
/// use taskdeck::domain::todo::{CreateTodo, Status, Todo};
///
/// let open = Todo::new(
///     CreateTodo { title: "Write report".to_string(), ..CreateTodo::default() },
///     0,
/// );
/// let mut finished = Todo::new(
///     CreateTodo { title: "File taxes".to_string(), ..CreateTodo::default() },
///     0,
/// );
/// finished.move_to(Status::Done, 0);
///
/// let mut todos = vec![finished, open.clone()];
/// sort_canonical(&mut todos);
/// assert_eq!(todos[0].id, open.id);
/// ```
pub fn sort_canonical(todos: &mut [Todo]) {
    todos.sort_by(compare_canonical);
}

/// Canonical comparison between two todos
fn compare_canonical(a: &Todo, b: &Todo) -> Ordering {
    compare_status(a.status, b.status)
        .then_with(|| a.order.cmp(&b.order))
        .then_with(|| b.created_at.cmp(&a.created_at))
}

/// Compare status by workflow progression
///
/// Status order: Todo → Doing → Done. Comparing the text forms instead
/// would collate DOING before DONE before TODO and scramble the board.
fn compare_status(a: Status, b: Status) -> Ordering {
    fn status_order(s: Status) -> u8 {
        match s {
            Status::Todo => 0,
            Status::Doing => 1,
            Status::Done => 2,
        }
    }
    status_order(a).cmp(&status_order(b))
}
