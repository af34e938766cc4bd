//! Error types for configuration loading.

use std::path::PathBuf;

use codeprompt_engine::EngineError;
use thiserror::Error;

/// Errors emitted while loading configuration or building an engine from it.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config `{}`: {source}", .path.display())]
    Io {
        /// Path that was read.
        path: PathBuf,
        /// Source [`std::io::Error`].
        source: std::io::Error,
    },
    /// The configuration could not be parsed.
    #[error("invalid config: {source}")]
    Parse {
        /// Source [`serde_json::Error`].
        #[from]
        source: serde_json::Error,
    },
    /// An environment override held an unusable value.
    #[error("invalid value `{value}` for {name}: {reason}")]
    InvalidEnv {
        /// Variable name.
        name: &'static str,
        /// Offending value.
        value: String,
        /// Human-readable reason for rejection.
        reason: &'static str,
    },
    /// The configured engine failed validation.
    #[error("invalid engine: {source}")]
    Engine {
        /// Source engine error.
        #[from]
        source: EngineError,
    },
}

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
