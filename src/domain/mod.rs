pub mod ordering;
pub mod sorting;
pub mod todo;

pub use ordering::{creation_order, plan_move, plan_reorder, MovePlan, OrderAssignment};
pub use sorting::sort_canonical;
pub use todo::{CreateTodo, Importance, Priority, Status, Todo, TodoId, UpdateTodo};
