//! `GuardrailEngine`: the configured guardrails behind the core traits.

use std::path::Path;

use folioguard_contracts::{
    error::FolioGuardResult,
    filter::{FilterVerdict, PostFilterReport},
    message::{InboundMessage, Message},
};
use folioguard_core::traits::{InputGuard, OutputGuard};

use crate::config::GuardrailConfig;
use crate::{messages, postfilter, prefilter};

/// Pre-filter, post-filter and message validation under one configuration.
///
/// The engine holds only its limits; the pattern tables are shared statics.
/// Cloning is cheap, so the same configuration can back both the input and
/// the output side of a `TurnRunner`.
///
/// ```rust,ignore
/// let engine = GuardrailEngine::from_file(Path::new("config/guardrails.toml"))?;
/// let runner = TurnRunner::new(Box::new(engine.clone()), Box::new(engine), verifier);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GuardrailEngine {
    config: GuardrailConfig,
}

impl GuardrailEngine {
    pub fn new(config: GuardrailConfig) -> Self {
        Self { config }
    }

    pub fn from_toml_str(s: &str) -> FolioGuardResult<Self> {
        GuardrailConfig::from_toml_str(s).map(Self::new)
    }

    pub fn from_file(path: &Path) -> FolioGuardResult<Self> {
        GuardrailConfig::from_file(path).map(Self::new)
    }

    pub fn config(&self) -> &GuardrailConfig {
        &self.config
    }

    pub fn pre_filter(&self, user_message: &str) -> FilterVerdict {
        prefilter::evaluate(user_message, &self.config.limits)
    }

    pub fn post_filter(&self, response_text: &str, user_message: &str) -> PostFilterReport {
        postfilter::evaluate(response_text, user_message, &self.config.limits)
    }

    pub fn validate_message_roles(&self, inbound: Vec<InboundMessage>) -> Vec<Message> {
        messages::validate_message_roles(inbound, &self.config.limits)
    }
}

impl InputGuard for GuardrailEngine {
    fn validate_messages(&self, messages: Vec<InboundMessage>) -> Vec<Message> {
        self.validate_message_roles(messages)
    }

    fn pre_filter(&self, user_message: &str) -> FilterVerdict {
        GuardrailEngine::pre_filter(self, user_message)
    }
}

impl OutputGuard for GuardrailEngine {
    fn post_filter(&self, response_text: &str, user_message: &str) -> PostFilterReport {
        GuardrailEngine::post_filter(self, response_text, user_message)
    }
}
