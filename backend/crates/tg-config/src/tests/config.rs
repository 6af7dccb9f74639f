use crate::tests::{EnvGuard, setup_config_dir, setup_valid_env, write_config};
use crate::{Config, TenantDirectoryKind};

use googletest::assert_that;
use googletest::prelude::{anything, eq, ok};
use log::LevelFilter;
use serial_test::serial;

// =========================================================================
// Happy Path Tests
// =========================================================================

#[test]
#[serial]
fn given_no_config_file_when_load_then_ok_with_defaults() {
    // Given
    let (_temp, _guard) = setup_config_dir();

    // When
    let result = Config::load();

    // Then
    assert_that!(result, ok(anything()));
    let config = result.unwrap();
    assert_that!(config.server.port, eq(crate::DEFAULT_PORT));
    assert_that!(config.tenancy.base_domain.as_str(), eq("lvh.me"));
    assert_that!(config.rate_limit.max_requests, eq(10));
    assert_that!(config.rate_limit.window_secs, eq(60));
    assert_that!(config.auth.leeway_secs, eq(60));
    assert_that!(config.auth.jwt_secret.is_none(), eq(true));
}

#[test]
#[serial]
fn given_missing_config_dir_when_load_then_directory_is_created() {
    // Given
    let temp = tempfile::TempDir::new().unwrap();
    let nested = temp.path().join("nested").join(".tg");
    let _guard = EnvGuard::set("TG_CONFIG_DIR", nested.to_str().unwrap());

    // When
    let result = Config::load();

    // Then
    assert_that!(result, ok(anything()));
    assert_that!(nested.is_dir(), eq(true));
}

#[test]
#[serial]
fn given_secret_in_env_when_load_and_validate_then_ok() {
    // Given
    let (_temp, _dir, _secret) = setup_valid_env();

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, ok(anything()));
    assert_that!(config.auth.secret(), eq(Some(crate::tests::VALID_SECRET)));
}

#[test]
#[serial]
fn given_valid_toml_file_when_load_then_uses_toml_values() {
    // Given
    let (temp, _guard) = setup_config_dir();
    write_config(
        &temp,
        r#"
            [server]
            port = 9000

            [auth]
            jwt_secret = "0123456789abcdef0123456789abcdef"
            algorithm = "HS384"
            audience = "tenant-gate"

            [[auth.dev_users]]
            username = "alice"
            password = "wonderland"
            role = "owner"

            [tenancy]
            base_domain = "example.test"
            directory = "sqlite"
            seed_tenants = ["acme"]

            [rate_limit.classes.auth]
            max_requests = 5
            window_secs = 30

            [logging]
            level = "debug"
            colored = false
        "#,
    );

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.validate(), ok(anything()));
    assert_that!(config.server.port, eq(9000));
    assert_that!(config.auth.algorithm.as_str(), eq("HS384"));
    assert_that!(config.auth.audience.as_deref(), eq(Some("tenant-gate")));
    assert_that!(config.auth.dev_users.len(), eq(1));
    assert_that!(config.auth.find_dev_user("Alice").is_some(), eq(true));
    assert_that!(config.tenancy.base_domain.as_str(), eq("example.test"));
    assert_that!(config.tenancy.directory, eq(TenantDirectoryKind::Sqlite));
    assert_that!(config.rate_limit.classes.len(), eq(1));
    assert_that!(*config.logging.level, eq(LevelFilter::Debug));
    assert_that!(config.logging.colored, eq(false));
}

#[test]
#[serial]
fn given_env_var_and_toml_when_load_then_env_var_overrides_toml() {
    // Given
    let (temp, _guard) = setup_config_dir();
    write_config(&temp, "[server]\nport = 9000\n[tenancy]\ndirectory = \"sqlite\"");
    let _port = EnvGuard::set("TG_SERVER_PORT", "8888");
    let _directory = EnvGuard::set("TG_TENANCY_DIRECTORY", "memory");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.server.port, eq(8888));
    assert_that!(config.tenancy.directory, eq(TenantDirectoryKind::Memory));
}

#[test]
#[serial]
fn given_multiple_env_overrides_when_load_then_all_apply() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _host = EnvGuard::set("TG_SERVER_HOST", "0.0.0.0");
    let _dev = EnvGuard::set("TG_AUTH_ALLOW_DEV_SECRET", "1");
    let _leeway = EnvGuard::set("TG_AUTH_LEEWAY_SECS", "5");
    let _max = EnvGuard::set("TG_RATE_LIMIT_MAX_REQUESTS", "100");
    let _xff = EnvGuard::set("TG_RATE_LIMIT_TRUST_FORWARDED_FOR", "true");
    let _level = EnvGuard::set("TG_LOG_LEVEL", "warn");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.server.host.as_str(), eq("0.0.0.0"));
    assert_that!(config.auth.allow_dev_secret, eq(true));
    assert_that!(config.auth.leeway_secs, eq(5));
    assert_that!(config.rate_limit.max_requests, eq(100));
    assert_that!(config.rate_limit.trust_forwarded_for, eq(true));
    assert_that!(*config.logging.level, eq(LevelFilter::Warn));
}

#[test]
#[serial]
fn given_unparseable_env_number_when_load_then_keeps_previous_value() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _port = EnvGuard::set("TG_SERVER_PORT", "eighty");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.server.port, eq(crate::DEFAULT_PORT));
}

#[test]
#[serial]
fn given_relative_database_path_when_resolved_then_joined_to_config_dir() {
    // Given
    let (temp, _guard) = setup_config_dir();

    // When
    let config = Config::load().unwrap();
    let path = config.tenant_database_path().unwrap();

    // Then
    assert_that!(path == temp.path().join("tenants.db"), eq(true));
}
