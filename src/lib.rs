//! A resilient children-watch recipe for ZooKeeper-style coordination
//! services.
//!
//! [`ChildrenWatcher`] keeps a user callback informed of the current child
//! set of a node, re-arming the service's one-shot notification after every
//! fire and re-establishing coverage after the client session is lost and
//! later restored. Connection management, request retries, and session
//! tracking belong to the [`CoordinationClient`] collaborator.

mod client;
mod config;
mod errors;
mod session;
mod watcher;

pub use client::*;
pub use config::*;
pub use errors::*;
pub use session::*;
pub use watcher::*;
