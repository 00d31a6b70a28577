mod children_watcher;
mod event;

pub use children_watcher::*;
pub use event::*;
