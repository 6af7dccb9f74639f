use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Backing store for tenant existence checks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TenantDirectoryKind {
    #[default]
    Memory,
    Sqlite,
}

impl FromStr for TenantDirectoryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "sqlite" => Ok(Self::Sqlite),
            other => Err(format!("unknown tenant directory '{other}'")),
        }
    }
}

impl fmt::Display for TenantDirectoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => f.write_str("memory"),
            Self::Sqlite => f.write_str("sqlite"),
        }
    }
}
