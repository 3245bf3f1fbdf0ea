//! Session store backend configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Session store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store provider: `"postgres"` or `"memory"`.
    #[serde(default = "default_provider")]
    pub provider: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
        }
    }
}

impl StoreConfig {
    /// Resolve the configured provider name.
    pub fn provider(&self) -> Result<StoreProvider, AppError> {
        self.provider.parse()
    }
}

/// Supported session store backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreProvider {
    /// PostgreSQL via sqlx.
    Postgres,
    /// Process-local map; contents are lost on restart.
    Memory,
}

impl std::str::FromStr for StoreProvider {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            _ => Err(AppError::configuration(format!(
                "Unknown store provider: '{s}'. Expected one of: postgres, memory"
            ))),
        }
    }
}

impl fmt::Display for StoreProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Postgres => write!(f, "postgres"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

fn default_provider() -> String {
    "postgres".to_string()
}
