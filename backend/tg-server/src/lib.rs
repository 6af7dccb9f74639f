pub mod api;
pub mod app_state;
pub mod bootstrap;
pub mod dev_account;
pub mod error;
pub mod health;
pub mod housekeeping;
pub mod logger;
pub mod login;
pub mod refresh;
pub mod routes;
pub mod shutdown_coordinator;
pub mod shutdown_guard;
pub mod token_response;

#[cfg(test)]
mod tests;

pub use app_state::AppState;
pub use bootstrap::{Services, build_services};
pub use dev_account::DevAccount;
pub use error::{Result as ServerResult, ServerError};
pub use housekeeping::spawn_rate_limit_housekeeping;
pub use routes::build_router;
pub use shutdown_coordinator::ShutdownCoordinator;
pub use shutdown_guard::ShutdownGuard;
pub use token_response::{TOKEN_TYPE, TokenResponse};
