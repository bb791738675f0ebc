use crate::LogLevel;
use crate::tests::{EnvGuard, setup_config_dir};

use log::LevelFilter;
use serial_test::serial;

#[test]
fn test_log_level_parses_known_names_case_insensitively() {
    assert_eq!(LogLevel::parse_lenient("DEBUG").0, LevelFilter::Debug);
    assert_eq!(LogLevel::parse_lenient("warn").0, LevelFilter::Warn);
    assert_eq!(LogLevel::parse_lenient("off").0, LevelFilter::Off);
}

#[test]
fn test_log_level_unknown_name_falls_back_to_info() {
    assert_eq!(LogLevel::parse_lenient("verbose").0, LevelFilter::Info);
}

#[test]
#[serial]
fn test_log_level_env_override() {
    let (_temp, _guard) = setup_config_dir();
    let _level = EnvGuard::set("SHOP_LOG_LEVEL", "trace");

    let config = crate::Config::load().unwrap();

    assert_eq!(*config.logging.level, LevelFilter::Trace);
}
