use crate::DevAccount;

use std::sync::Arc;
use std::time::Duration;

use tg_gateway::GatewayState;

/// Router state shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub gateway: GatewayState,
    pub dev_accounts: Arc<Vec<DevAccount>>,
    /// Lifetime of tokens issued by `/auth/login`
    pub token_ttl: Duration,
}

impl AppState {
    pub fn find_account(&self, username: &str, password: &str) -> Option<&DevAccount> {
        self.dev_accounts
            .iter()
            .find(|account| account.matches(username, password))
    }
}
