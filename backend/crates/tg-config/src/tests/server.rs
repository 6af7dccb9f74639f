use crate::Config;
use crate::tests::{EnvGuard, setup_valid_env};

use googletest::assert_that;
use googletest::prelude::{anything, err, ok};
use serial_test::serial;

// =========================================================================
// Validation Tests - Server
// =========================================================================

#[test]
#[serial]
fn given_port_below_1024_when_validate_then_error() {
    // Given
    let (_temp, _dir, _secret) = setup_valid_env();
    let _port = EnvGuard::set("TG_SERVER_PORT", "80");

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, err(anything()));
}

#[test]
#[serial]
fn given_port_1024_when_validate_then_ok() {
    // Given
    let (_temp, _dir, _secret) = setup_valid_env();
    let _port = EnvGuard::set("TG_SERVER_PORT", "1024");

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, ok(anything()));
}

#[test]
#[serial]
fn given_port_zero_when_validate_then_ok() {
    // Given - port 0 means OS auto-assign
    let (_temp, _dir, _secret) = setup_valid_env();
    let _port = EnvGuard::set("TG_SERVER_PORT", "0");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.validate(), ok(anything()));
}

#[test]
#[serial]
fn given_shutdown_grace_over_limit_when_validate_then_error() {
    // Given
    let (_temp, _dir, _secret) = setup_valid_env();
    let _grace = EnvGuard::set("TG_SERVER_SHUTDOWN_GRACE_SECS", "3600");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.validate(), err(anything()));
}
