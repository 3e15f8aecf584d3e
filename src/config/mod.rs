//! Configuration module for CloudPocket
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::PocketPaths;
pub use settings::Settings;
