use crate::domain::{OrderAssignment, Todo, TodoId};
use crate::error::{BoardError, Result};
use crate::storage::Storage;
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, types::Type, Connection, OptionalExtension};
use std::path::Path;
use std::str::FromStr;
use std::sync::{Mutex, MutexGuard};

const SELECT_TODOS: &str = "SELECT id, title, description, priority, importance, status, \
     completed, sort_order, created_at, updated_at FROM todos";

/// Canonical board order expressed in SQL. The status CASE mirrors the
/// workflow progression; collating the raw strings would scramble it.
const CANONICAL_ORDER: &str = "CASE status WHEN 'TODO' THEN 0 WHEN 'DOING' THEN 1 \
     WHEN 'DONE' THEN 2 ELSE 3 END, sort_order ASC, created_at DESC";

/// SQLite-backed storage
///
/// A single connection guarded by a mutex; statements run serialized.
pub struct SqliteStorage {
    conn: Mutex<Connection>,
}

impl SqliteStorage {
    /// Opens (or creates) the database file at the given path
    pub fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        let conn = Connection::open(db_path)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Opens an in-process database that vanishes on drop
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn connection(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| BoardError::Storage("connection lock poisoned".to_string()))
    }
}

fn ts_to_sql(ts: &DateTime<Utc>) -> String {
    // Fixed-width UTC form so lexicographic ORDER BY matches time order
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn ts_from_sql(column: usize, raw: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(err)))
}

fn enum_from_sql<T: FromStr<Err = String>>(column: usize, raw: &str) -> rusqlite::Result<T> {
    raw.parse::<T>()
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(column, Type::Text, err.into()))
}

fn row_to_todo(row: &rusqlite::Row<'_>) -> rusqlite::Result<Todo> {
    let priority: String = row.get(3)?;
    let importance: String = row.get(4)?;
    let status: String = row.get(5)?;
    let created_at: String = row.get(8)?;
    let updated_at: String = row.get(9)?;

    Ok(Todo {
        id: TodoId::from(row.get::<_, String>(0)?),
        title: row.get(1)?,
        description: row.get(2)?,
        priority: enum_from_sql(3, &priority)?,
        importance: enum_from_sql(4, &importance)?,
        status: enum_from_sql(5, &status)?,
        completed: row.get(6)?,
        order: row.get(7)?,
        created_at: ts_from_sql(8, &created_at)?,
        updated_at: ts_from_sql(9, &updated_at)?,
    })
}

#[async_trait]
impl Storage for SqliteStorage {
    async fn initialize(&self) -> Result<()> {
        let conn = self.connection()?;
        conn.execute_batch(include_str!("../../migrations/0001_init.sql"))?;
        Ok(())
    }

    async fn insert(&self, todo: &Todo) -> Result<()> {
        let conn = self.connection()?;
        conn.execute(
            "INSERT INTO todos (id, title, description, priority, importance, status, \
             completed, sort_order, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                todo.id.as_str(),
                todo.title,
                todo.description,
                todo.priority.as_str(),
                todo.importance.as_str(),
                todo.status.as_str(),
                todo.completed,
                todo.order,
                ts_to_sql(&todo.created_at),
                ts_to_sql(&todo.updated_at),
            ],
        )?;
        Ok(())
    }

    async fn fetch(&self, id: &TodoId) -> Result<Todo> {
        let conn = self.connection()?;
        conn.query_row(
            &format!("{} WHERE id = ?1", SELECT_TODOS),
            params![id.as_str()],
            row_to_todo,
        )
        .optional()?
        .ok_or_else(|| BoardError::TodoNotFound(id.to_string()))
    }

    async fn list_all(&self) -> Result<Vec<Todo>> {
        let conn = self.connection()?;
        let mut stmt = conn.prepare(&format!("{} ORDER BY {}", SELECT_TODOS, CANONICAL_ORDER))?;
        let rows = stmt.query_map([], row_to_todo)?;

        let mut todos = Vec::new();
        for row in rows {
            todos.push(row?);
        }
        Ok(todos)
    }

    async fn update(&self, todo: &Todo) -> Result<()> {
        let conn = self.connection()?;
        let changed = conn.execute(
            "UPDATE todos SET title = ?2, description = ?3, priority = ?4, importance = ?5, \
             status = ?6, completed = ?7, sort_order = ?8, updated_at = ?9 WHERE id = ?1",
            params![
                todo.id.as_str(),
                todo.title,
                todo.description,
                todo.priority.as_str(),
                todo.importance.as_str(),
                todo.status.as_str(),
                todo.completed,
                todo.order,
                ts_to_sql(&todo.updated_at),
            ],
        )?;
        if changed == 0 {
            return Err(BoardError::TodoNotFound(todo.id.to_string()));
        }
        Ok(())
    }

    async fn apply_order_updates(
        &self,
        assignments: &[OrderAssignment],
        updated_at: DateTime<Utc>,
    ) -> Result<()> {
        if assignments.is_empty() {
            return Ok(());
        }
        let conn = self.connection()?;
        let stamp = ts_to_sql(&updated_at);

        // Early return drops the transaction and rolls the batch back
        let tx = conn.unchecked_transaction()?;
        for assignment in assignments {
            let changed = tx.execute(
                "UPDATE todos SET sort_order = ?2, updated_at = ?3 WHERE id = ?1",
                params![assignment.id.as_str(), assignment.order, stamp],
            )?;
            if changed == 0 {
                return Err(BoardError::TodoNotFound(assignment.id.to_string()));
            }
        }
        tx.commit()?;
        Ok(())
    }

    async fn delete(&self, id: &TodoId) -> Result<()> {
        let conn = self.connection()?;
        let changed = conn.execute("DELETE FROM todos WHERE id = ?1", params![id.as_str()])?;
        if changed == 0 {
            return Err(BoardError::TodoNotFound(id.to_string()));
        }
        Ok(())
    }
}
