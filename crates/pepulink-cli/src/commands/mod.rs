//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `analyze` - Spending analysis report
//! - `insights` - Insight findings
//! - `assistant` - One-shot and interactive assistant
//! - `transactions` - Transaction listing
//! - `config` - Effective configuration
//! - `serve` - Web server command
//! - `session` - Shared session setup (data, config, as-of date)

pub mod analyze;
pub mod assistant;
pub mod config;
pub mod insights;
pub mod serve;
pub mod session;
pub mod transactions;

// Re-export command functions for main.rs
pub use analyze::*;
pub use assistant::*;
pub use config::*;
pub use insights::*;
pub use serve::*;
pub use session::*;
pub use transactions::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
