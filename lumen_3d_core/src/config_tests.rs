use crate::error::Error;
use crate::log::LogSeverity;
use super::*;

#[test]
fn test_default_config_is_valid() {
    assert!(Config::default().validate().is_ok());
}

#[test]
fn test_default_values() {
    let config = Config::default();
    assert_eq!(config.parallel_cull_threshold, 2048);
    assert_eq!(config.cull_chunk_size, 256);
    if cfg!(debug_assertions) {
        assert_eq!(config.min_log_severity, LogSeverity::Debug);
    } else {
        assert_eq!(config.min_log_severity, LogSeverity::Info);
    }
}

#[test]
fn test_zero_chunk_size_rejected() {
    let config = Config { cull_chunk_size: 0, ..Config::default() };
    assert!(matches!(config.validate(), Err(Error::InitializationFailed(_))));
}

#[test]
fn test_zero_threshold_is_valid() {
    // Every scene goes to the pool
    let config = Config { parallel_cull_threshold: 0, cull_chunk_size: 1, ..Config::default() };
    assert!(config.validate().is_ok());
}
