//! Keyword intent matching

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::IntentKeywords;

/// What the user is asking the assistant for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Tips,
    Prediction,
    Anomaly,
    Optimization,
    Analysis,
    /// Nothing matched
    Default,
}

impl Intent {
    /// Match priority. The first intent with a matching keyword wins.
    pub const PRIORITY: [Intent; 5] = [
        Intent::Tips,
        Intent::Prediction,
        Intent::Anomaly,
        Intent::Optimization,
        Intent::Analysis,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Tips => "tips",
            Intent::Prediction => "prediction",
            Intent::Anomaly => "anomaly",
            Intent::Optimization => "optimization",
            Intent::Analysis => "analysis",
            Intent::Default => "default",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Intent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tips" => Ok(Intent::Tips),
            "prediction" => Ok(Intent::Prediction),
            "anomaly" => Ok(Intent::Anomaly),
            "optimization" => Ok(Intent::Optimization),
            "analysis" => Ok(Intent::Analysis),
            "default" => Ok(Intent::Default),
            _ => Err(format!("Unknown intent: {}", s)),
        }
    }
}

/// Case-insensitive substring matcher over per-intent keyword lists
#[derive(Debug, Clone)]
pub struct IntentMatcher {
    /// Lowercased keywords in priority order
    rules: Vec<(Intent, Vec<String>)>,
}

impl Default for IntentMatcher {
    fn default() -> Self {
        Self::new(&IntentKeywords::default())
    }
}

impl IntentMatcher {
    pub fn new(keywords: &IntentKeywords) -> Self {
        let rules = Intent::PRIORITY
            .iter()
            .map(|&intent| {
                let list: &[String] = match intent {
                    Intent::Tips => &keywords.tips,
                    Intent::Prediction => &keywords.prediction,
                    Intent::Anomaly => &keywords.anomaly,
                    Intent::Optimization => &keywords.optimization,
                    Intent::Analysis => &keywords.analysis,
                    Intent::Default => &[],
                };
                let normalized = list
                    .iter()
                    .map(|k| k.trim().to_lowercase())
                    .filter(|k| !k.is_empty())
                    .collect();
                (intent, normalized)
            })
            .collect();

        Self { rules }
    }

    /// Pick the intent for a user message
    pub fn classify(&self, input: &str) -> Intent {
        let text = input.to_lowercase();
        if text.trim().is_empty() {
            return Intent::Default;
        }

        for (intent, keywords) in &self.rules {
            if let Some(keyword) = keywords.iter().find(|k| text.contains(k.as_str())) {
                tracing::debug!(intent = intent.as_str(), keyword = %keyword, "Matched intent");
                return *intent;
            }
        }

        Intent::Default
    }
}
