mod watch;
pub use watch::*;

#[cfg(test)]
mod watch_test;
