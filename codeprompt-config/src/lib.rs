//! Configuration management for prompt engines.
//!
//! Engines are described in JSON and may be adjusted through environment
//! variables before being built.

#![warn(missing_docs, clippy::pedantic)]

mod error;
pub mod loader;
pub mod schema;

pub use error::{ConfigError, ConfigResult};
pub use loader::{MAX_TOKENS_ENV, TRUNCATION_ENV};
pub use schema::{EngineConfig, LanguageConfig};
