//! Guardrail limits and their TOML schema.
//!
//! Every limit has a built-in default, so an empty document (or a document
//! with only some keys) is a valid configuration:
//!
//! ```toml
//! [limits]
//! max_input_length = 2000
//! max_message_count = 50
//! max_message_length = 2000
//! max_response_length = 10000
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use folioguard_contracts::error::{FolioGuardError, FolioGuardResult};

pub const DEFAULT_MAX_INPUT_LENGTH: usize = 2000;
pub const DEFAULT_MAX_MESSAGE_COUNT: usize = 50;
pub const DEFAULT_MAX_MESSAGE_LENGTH: usize = 2000;
pub const DEFAULT_MAX_RESPONSE_LENGTH: usize = 10_000;

/// Size limits enforced by the guardrails. All lengths count characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// A user message longer than this is blocked by the pre-filter.
    pub max_input_length: usize,

    /// Only the most recent `max_message_count` messages are kept.
    pub max_message_count: usize,

    /// Each message's content is truncated to this length.
    pub max_message_length: usize,

    /// A model response longer than this is flagged by the post-filter.
    pub max_response_length: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_input_length: DEFAULT_MAX_INPUT_LENGTH,
            max_message_count: DEFAULT_MAX_MESSAGE_COUNT,
            max_message_length: DEFAULT_MAX_MESSAGE_LENGTH,
            max_response_length: DEFAULT_MAX_RESPONSE_LENGTH,
        }
    }
}

/// Top-level guardrail configuration document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardrailConfig {
    pub limits: Limits,
}

impl GuardrailConfig {
    /// Parse `s` as TOML and validate the result.
    ///
    /// Returns `FolioGuardError::ConfigError` if the TOML is malformed, does
    /// not match the schema, or sets any limit to zero.
    pub fn from_toml_str(s: &str) -> FolioGuardResult<Self> {
        let config: GuardrailConfig = toml::from_str(s).map_err(|e| FolioGuardError::ConfigError {
            reason: format!("failed to parse guardrail TOML: {}", e),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read the file at `path` and parse it as guardrail configuration.
    pub fn from_file(path: &Path) -> FolioGuardResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| FolioGuardError::ConfigError {
            reason: format!("failed to read guardrail config '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Reject limits that would make every input invalid.
    pub fn validate(&self) -> FolioGuardResult<()> {
        let limits = [
            ("max_input_length", self.limits.max_input_length),
            ("max_message_count", self.limits.max_message_count),
            ("max_message_length", self.limits.max_message_length),
            ("max_response_length", self.limits.max_response_length),
        ];
        for (name, value) in limits {
            if value == 0 {
                return Err(FolioGuardError::ConfigError {
                    reason: format!("limits.{} must be positive", name),
                });
            }
        }
        Ok(())
    }
}
