//! Spending Assistant
//!
//! The chat assistant is a local, deterministic function of the user's text
//! and a [`SpendingAnalysis`]:
//!
//! 1. [`IntentMatcher`] picks an [`Intent`] by ordered keyword match
//! 2. [`Reply::build`] turns the analysis into a structured reply
//! 3. [`Reply::render`] produces the chat text
//!
//! No conversation state is kept between calls.

pub mod intent;
pub mod reply;

use serde::Serialize;

use crate::analytics::SpendingAnalysis;
use crate::config::AssistantConfig;

pub use intent::{Intent, IntentMatcher};
pub use reply::{FlaggedTransaction, Reply, SavingsCandidate};

/// A reply ready for a front end
#[derive(Debug, Clone, Serialize)]
pub struct AssistantResponse {
    pub intent: Intent,
    pub reply: Reply,
    pub text: String,
}

/// Intent matcher plus reply settings
#[derive(Debug, Clone)]
pub struct Assistant {
    matcher: IntentMatcher,
    config: AssistantConfig,
}

impl Default for Assistant {
    fn default() -> Self {
        Self::new(AssistantConfig::default())
    }
}

impl Assistant {
    pub fn new(config: AssistantConfig) -> Self {
        Self {
            matcher: IntentMatcher::new(&config.keywords),
            config,
        }
    }

    pub fn classify(&self, input: &str) -> Intent {
        self.matcher.classify(input)
    }

    /// Answer a user message about the given analysis
    pub fn respond(&self, input: &str, analysis: &SpendingAnalysis) -> AssistantResponse {
        let intent = self.classify(input);
        let reply = Reply::build(intent, analysis, &self.config);
        let text = reply.render();

        AssistantResponse {
            intent,
            reply,
            text,
        }
    }
}
