use super::dev_user;
use crate::{DevAccount, ServerError};

use googletest::prelude::*;
use tg_auth::Role;

#[test]
fn given_configured_users_when_converted_then_roles_parsed() {
    let accounts = DevAccount::from_config(&[
        dev_user("alice", "pw", "Owner"),
        dev_user("root", "pw", "admin"),
    ])
    .unwrap();

    assert_that!(accounts.len(), eq(2));
    assert_that!(accounts[0].role, eq(Role::Owner));
    assert_that!(accounts[1].role, eq(Role::Admin));
}

#[test]
fn given_unknown_role_when_converted_then_startup_error_names_user() {
    let result = DevAccount::from_config(&[dev_user("mallory", "pw", "superuser")]);

    match result {
        Err(ServerError::DevUserRole { username, role }) => {
            assert_eq!(username, "mallory");
            assert_eq!(role, "superuser");
        }
        other => panic!("Expected DevUserRole, got {other:?}"),
    }
}

#[test]
fn given_account_when_matching_then_username_case_insensitive_password_exact() {
    let account = DevAccount::new("Alice", "secret", Role::Owner);

    assert_that!(account.matches("alice", "secret"), eq(true));
    assert_that!(account.matches(" ALICE ", "secret"), eq(true));
    assert_that!(account.matches("alice", "Secret"), eq(false));
    assert_that!(account.matches("bob", "secret"), eq(false));
}

#[test]
fn given_account_when_debug_printed_then_password_hidden() {
    let account = DevAccount::new("alice", "hunter2", Role::Analyst);

    assert_that!(format!("{account:?}").contains("hunter2"), eq(false));
}
