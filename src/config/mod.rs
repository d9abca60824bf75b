//! Configuration module for fintrack
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::FintrackPaths;
pub use settings::Settings;
