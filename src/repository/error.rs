//! Error types raised by repository implementations.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,

    #[error("memory store lock was poisoned")]
    LockPoisoned,

    #[error("connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),

    #[error("database error: {0}")]
    Query(#[from] diesel::result::Error),
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
