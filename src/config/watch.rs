use serde::Deserialize;

use crate::Result;
use crate::WatchError;

/// Tuning knobs for a children watcher
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct WatchConfig {
    /// Capacity of the trigger queue that funnels notification fires and
    /// session transitions into the watch loop (must be > 0)
    #[serde(default = "default_trigger_queue_depth")]
    pub trigger_queue_depth: usize,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            trigger_queue_depth: default_trigger_queue_depth(),
        }
    }
}

impl WatchConfig {
    pub fn validate(&self) -> Result<()> {
        if self.trigger_queue_depth == 0 {
            return Err(
                WatchError::InvalidConfig("trigger_queue_depth must be greater than 0".to_string()).into(),
            );
        }
        Ok(())
    }
}

fn default_trigger_queue_depth() -> usize {
    16
}
