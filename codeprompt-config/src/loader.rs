//! Configuration loaders.

use std::path::Path;

use codeprompt_engine::TruncationPolicy;
use tracing::{debug, info};

use crate::error::{ConfigError, ConfigResult};
use crate::schema::EngineConfig;

/// Overrides `budget.max_tokens`.
pub const MAX_TOKENS_ENV: &str = "CODEPROMPT_MAX_TOKENS";
/// Overrides `budget.truncation` (`transient` or `commit`).
pub const TRUNCATION_ENV: &str = "CODEPROMPT_TRUNCATION";

impl EngineConfig {
    /// Parses a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the JSON is malformed, has unknown
    /// fields, or contains an interaction with an empty input.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Parse`] if its contents are invalid.
    pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        info!(path = %path.display(), examples = config.examples.len(), "loaded engine config");
        Ok(config)
    }

    /// Applies overrides from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnv`] if a variable holds an unusable value.
    pub fn with_env_overrides(self) -> ConfigResult<Self> {
        self.with_overrides_from(|name| std::env::var(name).ok())
    }

    /// Applies overrides read through `lookup`. Unset and blank values are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnv`] if a variable holds an unusable value.
    pub fn with_overrides_from(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> ConfigResult<Self> {
        if let Some(value) = lookup(MAX_TOKENS_ENV).filter(|v| !v.trim().is_empty()) {
            let max_tokens = value
                .trim()
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidEnv {
                    name: MAX_TOKENS_ENV,
                    value: value.clone(),
                    reason: "expected a non-negative integer",
                })?;
            debug!(max_tokens, "budget overridden from environment");
            self.budget.max_tokens = Some(max_tokens);
        }

        if let Some(value) = lookup(TRUNCATION_ENV).filter(|v| !v.trim().is_empty()) {
            let truncation = match value.trim().to_ascii_lowercase().as_str() {
                "transient" => TruncationPolicy::Transient,
                "commit" => TruncationPolicy::Commit,
                _ => {
                    return Err(ConfigError::InvalidEnv {
                        name: TRUNCATION_ENV,
                        value,
                        reason: "expected `transient` or `commit`",
                    });
                }
            };
            debug!(?truncation, "truncation policy overridden from environment");
            self.budget.truncation = truncation;
        }

        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "description": "D", "examples": [{{ "input": "Make a cube", "response": "makeCube();" }}] }}"#
        )
        .unwrap();

        let config = EngineConfig::from_path(file.path()).unwrap();
        let mut engine = config.build_engine().unwrap();
        assert_eq!(
            engine.craft_prompt("Make a cylinder").unwrap(),
            "/* D */\n\n/* Make a cube */\nmakeCube();\n\n/* Make a cylinder */\n"
        );
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = EngineConfig::from_path(dir.path().join("missing.json")).expect_err("should fail");
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn env_overrides_budget() {
        let config = EngineConfig::default()
            .with_overrides_from(env(&[(MAX_TOKENS_ENV, " 180 "), (TRUNCATION_ENV, "Commit")]))
            .unwrap();
        assert_eq!(config.budget.max_tokens, Some(180));
        assert_eq!(config.budget.truncation, TruncationPolicy::Commit);
    }

    #[test]
    fn blank_env_values_are_ignored() {
        let config = EngineConfig::default()
            .with_overrides_from(env(&[(MAX_TOKENS_ENV, ""), (TRUNCATION_ENV, "  ")]))
            .unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn invalid_env_values_are_rejected() {
        let err = EngineConfig::default()
            .with_overrides_from(env(&[(MAX_TOKENS_ENV, "lots")]))
            .expect_err("should fail");
        assert!(matches!(err, ConfigError::InvalidEnv { name: MAX_TOKENS_ENV, .. }));

        let err = EngineConfig::default()
            .with_overrides_from(env(&[(TRUNCATION_ENV, "sometimes")]))
            .expect_err("should fail");
        assert!(matches!(err, ConfigError::InvalidEnv { name: TRUNCATION_ENV, .. }));
    }
}
