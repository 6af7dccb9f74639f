use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Tenant directory error: {message} {location}")]
    Directory {
        message: String,
        location: ErrorLocation,
    },

    #[error("SQLx error: {source} {location}")]
    Sqlx {
        #[source]
        source: sqlx::Error,
        location: ErrorLocation,
    },

    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

impl GatewayError {
    #[track_caller]
    pub fn directory<S: Into<String>>(message: S) -> Self {
        Self::Directory {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<sqlx::Error> for GatewayError {
    #[track_caller]
    fn from(source: sqlx::Error) -> Self {
        Self::Sqlx {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;
