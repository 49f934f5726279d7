//! Tests for the logging filter
//!
//! The global subscriber can only be installed once per process, so these
//! tests check the filter selection rather than calling `setup_logging`.

use crate::logging::env_filter;

#[test]
fn test_env_filter_info_level_by_default() {
    let debug_str = format!("{:?}", env_filter(false));
    assert!(debug_str.contains("INFO") || debug_str.contains("info"));
}

#[test]
fn test_env_filter_debug_level_when_verbose() {
    let debug_str = format!("{:?}", env_filter(true));
    assert!(debug_str.contains("DEBUG") || debug_str.contains("debug"));
}

#[test]
fn test_verbose_and_quiet_filters_differ() {
    let quiet = format!("{:?}", env_filter(false));
    let verbose = format!("{:?}", env_filter(true));
    assert_ne!(quiet, verbose);
}
