use thiserror::Error;

pub type Result<T> = std::result::Result<T, BoardError>;

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("Todo not found: {0}")]
    TodoNotFound(String),

    /// Rejected input; the message is client-facing and goes out verbatim
    #[error("{0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl BoardError {
    /// Shorthand for the one required-field check the board performs.
    pub fn title_required() -> Self {
        Self::Validation("Title is required".to_string())
    }
}

#[cfg(feature = "sqlite-storage")]
impl From<rusqlite::Error> for BoardError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Storage(err.to_string())
    }
}
