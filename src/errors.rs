//! Children-Watch Error Hierarchy
//!
//! Defines error types for the watch recipe, categorized by which side of
//! the collaboration failed: the coordination client or the watcher itself.

#[doc(hidden)]
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error type accepted from user callbacks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Failures surfaced by the coordination client (reads, retry
    /// exhaustion, session teardown)
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Watch lifecycle violations and user-callback failures
    #[error(transparent)]
    Watch(#[from] WatchError),

    /// Unrecoverable failures requiring caller intervention
    #[error("Fatal error: {0}")]
    Fatal(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// No node exists at the requested path
    #[error("No node at {0}")]
    NoNode(String),

    /// Client retry policy exhaustion
    #[error("Retry policy exhausted after {retries} attempts for {path}")]
    RetryExhausted { path: String, retries: usize },

    /// The session backing the request expired
    #[error("Session expired")]
    SessionExpired,

    /// Transport-level connection loss
    #[error("Connection loss: {0}")]
    ConnectionLoss(String),
}

#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    /// Watched paths must be non-empty
    #[error("Watch path must not be empty")]
    EmptyPath,

    /// Invalid watcher tuning values
    #[error("Invalid watch config: {0}")]
    InvalidConfig(String),

    /// The user callback failed; the registration itself is unaffected
    #[error("Callback failed: {0}")]
    Callback(#[source] BoxError),
}
