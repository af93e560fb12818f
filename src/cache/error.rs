use thiserror::Error;

/// Error type returned by reader and writer delegates.
pub type DelegateError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache capacity must be greater than zero")]
    ZeroCapacity,

    #[error("background purge requires a tokio runtime")]
    NoRuntime,

    #[error("reader failed: {0}")]
    Reader(#[source] DelegateError),

    #[error("writer failed: {0}")]
    Writer(#[source] DelegateError),
}
