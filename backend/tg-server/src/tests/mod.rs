mod dev_account;
mod housekeeping;

use tg_config::{Config, DevUser, RateClassConfig};

pub(crate) const SECRET: &str = "server-test-secret-at-least-32-bytes";

pub(crate) fn dev_user(username: &str, password: &str, role: &str) -> DevUser {
    DevUser {
        username: username.to_string(),
        password: password.to_string(),
        role: role.to_string(),
    }
}

/// Valid config: two seeded tenants, an owner and an analyst, 2/60s login class
pub(crate) fn test_config() -> Config {
    let mut config = Config::default();
    config.auth.jwt_secret = Some(SECRET.to_string());
    config.auth.dev_users = vec![
        dev_user("alice", "wonderland", "owner"),
        dev_user("bob", "builder", "analyst"),
    ];
    config.tenancy.seed_tenants = vec!["tenant1".to_string(), "tenant2".to_string()];
    config.rate_limit.classes.insert(
        "auth".to_string(),
        RateClassConfig {
            max_requests: 2,
            window_secs: 60,
        },
    );
    config
}
