//! Resilient children watching built on one-shot service notifications
//!
//! The service fires a children-changed notification at most once per
//! registration, so every fire must immediately re-read and re-arm or the
//! watch silently goes dark. [`ChildrenWatcher`] owns that discipline and
//! additionally restores coverage after the client session is lost and
//! reconnected.

use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use tracing::error;
use tracing::info;
use tracing::warn;

use super::event::WatchTrigger;
use super::WatchFlow;
use crate::ChildrenNotification;
use crate::CoordinationClient;
use crate::Result;
use crate::SessionState;
use crate::WatchConfig;
use crate::WatchError;

/// Handle to a running children watch on a single path.
///
/// Construction performs the first read-and-arm synchronously: the callback
/// sees the initial child set before [`spawn`](ChildrenWatcher::spawn)
/// returns, and a missing path fails construction. Afterwards a background
/// task re-reads and re-arms on every notification fire and, when
/// `resume_on_session_loss` is set, after every session restore.
///
/// Dropping the handle stops the watch; returning [`WatchFlow::Stop`] from
/// the callback stops it from inside.
#[derive(Debug)]
pub struct ChildrenWatcher {
    path: String,
    shutdown: CancellationToken,
}

impl ChildrenWatcher {
    /// Start watching `path` with default tuning.
    ///
    /// `callback` is invoked with the current children once immediately and
    /// again after every observed change; invocations are never concurrent.
    /// The path must already exist: existence is a precondition of the
    /// first read, not enforced by this component.
    pub async fn spawn<C, F>(
        client: Arc<C>,
        path: impl Into<String>,
        callback: F,
        resume_on_session_loss: bool,
    ) -> Result<Self>
    where
        C: CoordinationClient,
        F: FnMut(Vec<String>) -> Result<WatchFlow> + Send + 'static,
    {
        Self::spawn_with_config(
            client,
            path,
            callback,
            resume_on_session_loss,
            WatchConfig::default(),
        )
        .await
    }

    /// Start watching `path` with explicit tuning.
    pub async fn spawn_with_config<C, F>(
        client: Arc<C>,
        path: impl Into<String>,
        callback: F,
        resume_on_session_loss: bool,
        config: WatchConfig,
    ) -> Result<Self>
    where
        C: CoordinationClient,
        F: FnMut(Vec<String>) -> Result<WatchFlow> + Send + 'static,
    {
        let path = path.into();
        if path.is_empty() {
            return Err(WatchError::EmptyPath.into());
        }
        config.validate()?;

        let (trigger_tx, trigger_rx) = mpsc::channel(config.trigger_queue_depth);
        let shutdown = CancellationToken::new();
        let mut driver = WatchDriver {
            client,
            path: path.clone(),
            callback,
            state: WatchState {
                stopped: false,
                watch_armed: false,
            },
            trigger_tx,
            trigger_rx,
            shutdown: shutdown.clone(),
        };

        // Subscribe before the first read so a session loss racing
        // construction is still observed.
        if resume_on_session_loss {
            driver.forward_session_events(driver.client.subscribe_session());
        }

        // The first read-and-arm runs in the caller's context; a missing
        // path or an exhausted retry policy fails construction.
        driver.read_and_arm().await?;

        if driver.state.stopped {
            // The initial delivery already asked to stop.
            shutdown.cancel();
        } else {
            tokio::spawn(driver.run());
        }

        Ok(Self { path, shutdown })
    }

    /// The watched path.
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl Drop for ChildrenWatcher {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

/// Watch lifecycle flags. Owned by the driver task, so no lock is needed.
struct WatchState {
    /// Monotonic false -> true. Once true, no further read, re-arm, or
    /// callback invocation happens.
    stopped: bool,

    /// True only while a one-shot registration is believed outstanding with
    /// the service.
    watch_armed: bool,
}

struct WatchDriver<C, F> {
    client: Arc<C>,
    path: String,
    callback: F,
    state: WatchState,
    trigger_tx: mpsc::Sender<WatchTrigger>,
    trigger_rx: mpsc::Receiver<WatchTrigger>,
    shutdown: CancellationToken,
}

impl<C, F> WatchDriver<C, F>
where
    C: CoordinationClient,
    F: FnMut(Vec<String>) -> Result<WatchFlow> + Send + 'static,
{
    /// Consumes triggers one at a time. Single-consumer by construction:
    /// read-and-arm executions and callback invocations are totally
    /// ordered, whichever context produced the trigger.
    async fn run(mut self) {
        loop {
            let trigger = tokio::select! {
                () = self.shutdown.cancelled() => break,
                trigger = self.trigger_rx.recv() => match trigger {
                    Some(trigger) => trigger,
                    None => break,
                },
            };

            if let Err(error) = self.dispatch(trigger).await {
                // Terminal read or callback failure. A failed read leaves
                // the watch un-armed, so the next CONNECTED transition
                // retriggers coverage; callers needing stricter supervision
                // watch these logs or drop the handle.
                error!(path = %self.path, %error, "watch trigger handling failed");
            }

            if self.state.stopped {
                break;
            }
        }
        debug!(path = %self.path, "children watch loop exited");
    }

    async fn dispatch(
        &mut self,
        trigger: WatchTrigger,
    ) -> Result<()> {
        match trigger {
            WatchTrigger::ChildrenChanged => {
                // A one-shot registration is consumed the moment it fires.
                self.state.watch_armed = false;
                self.read_and_arm().await
            }
            WatchTrigger::Session(SessionState::Lost) => {
                // Outstanding registrations do not survive a lost session.
                info!(path = %self.path, "session lost; watch no longer armed");
                self.state.watch_armed = false;
                Ok(())
            }
            WatchTrigger::Session(SessionState::Connected) => {
                if self.state.watch_armed || self.state.stopped {
                    return Ok(());
                }
                info!(path = %self.path, "session restored; re-establishing watch");
                self.read_and_arm().await
            }
            // Coverage is not assumed lost until an explicit LOST, which
            // avoids redundant re-arms during transient reconnects.
            WatchTrigger::Session(SessionState::Suspended) => Ok(()),
        }
    }

    /// Read the current children, re-arm the one-shot notification, then
    /// deliver to the callback.
    async fn read_and_arm(&mut self) -> Result<()> {
        if self.state.stopped {
            return Ok(());
        }

        let (children, notification) = self
            .client
            .get_children_and_watch(&self.path)
            .await
            .map_err(|error| {
                error!(path = %self.path, %error, "children read failed; watch not re-armed");
                error
            })?;
        self.state.watch_armed = true;
        self.forward_notification(notification);

        match (self.callback)(children) {
            Ok(WatchFlow::Continue) => Ok(()),
            Ok(WatchFlow::Stop) => {
                info!(path = %self.path, "callback requested stop");
                self.state.stopped = true;
                Ok(())
            }
            Err(error) => {
                // The watch was re-armed above, so delivery continues on
                // the next fire; the error still propagates to whichever
                // context triggered this read.
                error!(path = %self.path, %error, "children callback failed");
                Err(error)
            }
        }
    }

    /// Turns the armed one-shot into a trigger-queue message.
    fn forward_notification(
        &self,
        notification: ChildrenNotification,
    ) {
        let trigger_tx = self.trigger_tx.clone();
        tokio::spawn(async move {
            // A dropped sender means the arming session is gone; the
            // session listener owns recovery in that case.
            if notification.await.is_ok() {
                let _ = trigger_tx.send(WatchTrigger::ChildrenChanged).await;
            }
        });
    }

    /// Pumps session transitions into the trigger queue.
    fn forward_session_events(
        &self,
        mut session_rx: broadcast::Receiver<SessionState>,
    ) {
        let trigger_tx = self.trigger_tx.clone();
        let shutdown = self.shutdown.clone();
        let path = self.path.clone();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    () = shutdown.cancelled() => break,
                    received = session_rx.recv() => match received {
                        Ok(state) => {
                            if trigger_tx.send(WatchTrigger::Session(state)).await.is_err() {
                                break;
                            }
                        }
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            warn!(path = %path, skipped, "session listener lagged behind client transitions");
                        }
                        Err(broadcast::error::RecvError::Closed) => break,
                    },
                }
            }
        });
    }
}
