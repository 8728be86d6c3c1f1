//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod analysis;
pub mod chat;
pub mod health;
pub mod insights;
pub mod transactions;

// Re-export all handlers for use in router
pub use analysis::*;
pub use chat::*;
pub use health::*;
pub use insights::*;
pub use transactions::*;
