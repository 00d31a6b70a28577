use super::*;
use crate::Error;
use crate::WatchError;

#[test]
fn default_config_is_valid() {
    let config = WatchConfig::default();
    assert_eq!(config.trigger_queue_depth, 16);
    assert!(config.validate().is_ok());
}

#[test]
fn zero_queue_depth_is_rejected() {
    let config = WatchConfig {
        trigger_queue_depth: 0,
    };
    assert!(matches!(
        config.validate().unwrap_err(),
        Error::Watch(WatchError::InvalidConfig(_))
    ));
}
