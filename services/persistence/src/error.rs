use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("store lock poisoned: {0}")]
    Poisoned(String),

    #[error("store task failed: {0}")]
    Task(String),
}
