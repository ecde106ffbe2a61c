//! Data module
//!
//! External settings loaded from RON files.

pub mod config;

pub use config::{ConfigError, GameConfig, CONFIG_FILE};
