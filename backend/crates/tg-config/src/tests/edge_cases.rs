use crate::tests::{setup_config_dir, write_config};
use crate::{Config, LogLevel};

use std::str::FromStr;

use googletest::assert_that;
use googletest::prelude::{anything, contains_substring, eq, err};
use log::LevelFilter;
use serial_test::serial;

// =========================================================================
// Edge Cases
// =========================================================================

#[test]
#[serial]
fn given_malformed_toml_when_load_then_error_mentions_file() {
    // Given
    let (temp, _guard) = setup_config_dir();
    write_config(&temp, "this is not valid toml {{{{");

    // When
    let result = Config::load();

    // Then
    assert_that!(result, err(anything()));
    let err_msg = format!("{}", result.unwrap_err());
    assert_that!(err_msg, contains_substring("config.toml"));
}

#[test]
#[serial]
fn given_unknown_log_level_in_toml_when_load_then_falls_back_to_info() {
    // Given
    let (temp, _guard) = setup_config_dir();
    write_config(&temp, "[logging]\nlevel = \"verbose\"");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(*config.logging.level, eq(LevelFilter::Info));
}

#[test]
fn given_mixed_case_level_when_parsed_then_recognized() {
    let Ok(level) = LogLevel::from_str("  TRACE ");

    assert_that!(*level, eq(LevelFilter::Trace));
}
