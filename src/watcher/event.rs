use crate::SessionState;

/// Outcome returned by the user callback after each delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchFlow {
    /// Keep the watch armed and keep delivering child-set changes
    Continue,

    /// Stop the watcher. No further read, re-arm, or delivery happens, even
    /// if notifications or session events arrive later.
    Stop,
}

/// Inputs funneled into the watcher's single-consumer trigger queue.
///
/// Notification delivery and session delivery arrive on independent
/// contexts; turning both into messages consumed by one loop is what
/// serializes every read-and-arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WatchTrigger {
    /// The armed one-shot notification fired for the watched path
    ChildrenChanged,

    /// A session transition delivered by the client
    Session(SessionState),
}
