//! Runtime error types for the FolioGuard pipeline.
//!
//! Guardrail blocks and failed verification checks are verdicts, not errors.
//! Errors are reserved for broken configuration and failing collaborators.

use thiserror::Error;

/// The unified error type for the FolioGuard workspace.
#[derive(Debug, Error)]
pub enum FolioGuardError {
    /// A configuration value is missing, malformed, or out of range.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// The chat model (LLM + tool loop) failed to produce a reply.
    #[error("model call failed: {reason}")]
    ModelFailed { reason: String },

    /// Tool results could not be collected after the model loop drained.
    #[error("tool result recording failed: {reason}")]
    ToolRecordingFailed { reason: String },

    /// Tool results supplied from outside could not be parsed.
    #[error("invalid tool result: {reason}")]
    InvalidToolResult { reason: String },

    /// A turn response or verdict could not be rendered for output.
    #[error("serialization failed: {reason}")]
    SerializationFailed { reason: String },

    /// The async runtime driving turns could not be started.
    #[error("runtime error: {reason}")]
    RuntimeError { reason: String },
}

/// Convenience alias used throughout the FolioGuard crates.
pub type FolioGuardResult<T> = Result<T, FolioGuardError>;
