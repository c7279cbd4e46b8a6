//! # Runtime Module
//!
//! Process-level concerns shared by every deployment of the song library:
//! environment-driven configuration with fail-fast validation, and logging
//! setup over `tracing`.
//!
//! Configuration and the resulting handles (database pool, HTTP provider)
//! are constructed once at startup and passed explicitly to the layers that
//! need them; nothing here is held as an ambient singleton.

pub mod config;
pub mod error;
pub mod logging;

pub use config::AppConfig;
pub use error::{Error, Result};
pub use logging::{init_logging, LogFormat, LoggingConfig};
