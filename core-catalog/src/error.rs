use core_store::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    /// Point lookup found the resource neither remotely nor locally
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: i64 },

    /// Persistence failure; never swallowed, there is no further fallback
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
