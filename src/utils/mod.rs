//! Utility modules for configuration

pub mod config;

pub use config::{AppConfig, AppConfigBuilder, ConfigError, ConfigurationManager};
