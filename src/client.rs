use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use tokio::sync::broadcast;
use tokio::sync::oneshot;

use crate::Result;
use crate::SessionState;

/// One-shot children-changed notification armed by
/// [`CoordinationClient::get_children_and_watch`].
///
/// Resolves at most once. The client drops the sending half without firing
/// when the session that armed it is lost.
pub type ChildrenNotification = oneshot::Receiver<()>;

/// Contract required from the coordination-service client.
///
/// Implementations own connection management, request retries, and session
/// tracking; the watcher composes with the two operations below and nothing
/// else.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CoordinationClient: Send + Sync + 'static {
    /// Returns the current children of `path` and arms a one-shot
    /// children-changed notification for it.
    ///
    /// Transient failures are retried internally by the client's own retry
    /// policy; errors surface only for a missing path or once that policy
    /// is exhausted. The returned children reflect the state as of
    /// registration, so no update is lost between the read and the arm.
    async fn get_children_and_watch(
        &self,
        path: &str,
    ) -> Result<(Vec<String>, ChildrenNotification)>;

    /// Session-state transitions for the lifetime of the client connection.
    fn subscribe_session(&self) -> broadcast::Receiver<SessionState>;
}
