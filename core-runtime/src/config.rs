//! # Application Configuration Module
//!
//! Loads process configuration from the environment with fail-fast
//! validation: a missing or blank required variable aborts startup with an
//! actionable message rather than surfacing later as a connection error.
//!
//! ## Variables
//!
//! | Variable                  | Required | Meaning                              |
//! |---------------------------|----------|--------------------------------------|
//! | `DATABASE_URL`            | yes      | SQLite URL, e.g. `sqlite:songs.db`   |
//! | `EXTERNAL_API_URL`        | yes      | Base URL of the song details API     |
//! | `EXTERNAL_API_USER_AGENT` | no       | User-Agent for API requests          |
//! | `DATABASE_MAX_CONNECTIONS`| no       | Pool size, default 5                 |

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

const DEFAULT_USER_AGENT: &str = "song-library/0.1";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Process configuration for the song library service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// SQLite connection URL
    pub database_url: String,
    /// Base URL of the external song details API
    pub external_api_url: String,
    /// User-Agent header sent to the external API
    pub external_api_user_agent: String,
    /// Maximum database pool connections
    pub database_max_connections: u32,
}

impl AppConfig {
    /// Load configuration from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Exists so tests can supply variables without touching the process
    /// environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let database_url = require(&lookup, "DATABASE_URL")?;
        let external_api_url = require(&lookup, "EXTERNAL_API_URL")?;

        let external_api_user_agent = lookup("EXTERNAL_API_USER_AGENT")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

        let database_max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw.trim().parse().map_err(|_| {
                Error::Config(format!(
                    "DATABASE_MAX_CONNECTIONS must be a positive integer, got '{raw}'"
                ))
            })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };
        if database_max_connections == 0 {
            return Err(Error::Config(
                "DATABASE_MAX_CONNECTIONS must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            database_url,
            external_api_url,
            external_api_user_agent,
            database_max_connections,
        })
    }
}

fn require(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| Error::Config(format!("missing required configuration field: {key}")))
}
