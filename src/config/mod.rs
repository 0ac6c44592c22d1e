//! Configuration module for the archiver
//!
//! This module handles loading, parsing, and validating the TOML profile file.
//!
//! # Example
//!
//! ```no_run
//! use phpbb_archiver::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("archiver.toml")).unwrap();
//! println!("Archiving into: {}", config.output.archive_dir);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, ForumProfile, NetworkConfig, OutputConfig, RosterConfig, SessionConfig,
    DEFAULT_PROXY, DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
