//! phpbb-archiver: a mirror-to-disk archiver for phpBB forums
//!
//! This crate walks a phpBB board (forum → subforum → topic → paginated
//! listing), saving every rendered page into a directory tree that mirrors
//! the board's hierarchy. It also offers a roster mode that pages through the
//! member list and extracts one text field per member row.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for archiver operations
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Landing page unavailable: {url}")]
    LandingPageUnavailable { url: String },

    #[error("Roster page count unavailable: {url}")]
    RosterUnavailable { url: String },

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Invalid header {name}: {message}")]
    InvalidHeader { name: String, message: String },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Missing query parameter '{param}' in {url}")]
    MissingParam { param: &'static str, url: String },

    #[error("Query parameter '{param}' is not an integer in {url}")]
    InvalidId { param: &'static str, url: String },
}

/// Result type alias for archiver operations
pub type Result<T> = std::result::Result<T, ArchiveError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Archiver, CrawlTarget};
pub use state::VisitedSets;
pub use url::{sanitize_filename, ForumDecision, ForumFilter};
