use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Username already exists")]
    UsernameTaken,

    #[error("Store lock poisoned: {0}")]
    Poisoned(String),
}

pub type StoreResult<T> = Result<T, StoreError>;
