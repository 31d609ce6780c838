//! Configuration module for ouxml-linkcheck
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every table is optional, so an absent file behaves like `Config::default()`.
//!
//! # Example
//!
//! ```no_run
//! use ouxml_linkcheck::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("linkcheck.toml")).unwrap();
//! println!("Proxy suffix: {}", config.checker.proxy_suffix);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    ArchiveConfig, CheckerConfig, Config, OutputConfig, ScreenshotConfig, ThrottleConfig,
    UserAgentConfig,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
