//! Configuration module for payoff-cli
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::PayoffPaths;
pub use settings::Settings;
