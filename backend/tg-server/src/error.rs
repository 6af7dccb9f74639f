use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Config error: {0}")]
    Config(#[from] tg_config::ConfigError),

    #[error("Auth setup error: {0}")]
    Auth(#[from] tg_auth::AuthError),

    #[error("Tenant directory error: {0}")]
    Gateway(#[from] tg_gateway::GatewayError),

    #[error("Dev user '{username}' has unknown role '{role}'")]
    DevUserRole { username: String, role: String },

    #[error("Logger error: {message}")]
    Logger { message: String },
}

pub type Result<T> = std::result::Result<T, ServerError>;
