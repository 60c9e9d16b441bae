use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Invalid stored row: {0}")]
    InvalidRow(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;
