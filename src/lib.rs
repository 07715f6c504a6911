//! Wiki-Backlinks: a "what links here" crawler
//!
//! This crate crawls the pages that link to a seed article, extracts each
//! referring page's outbound article links and a stop-word-filtered bag of
//! words, and persists both as per-article artifacts.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod storage;
pub mod text;
pub mod url;

use thiserror::Error;

/// Main error type for Wiki-Backlinks operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Unable to load seed index page '{url}': {source}")]
    SeedUnreachable {
        url: String,
        source: crawler::FetchError,
    },

    #[error("Unable to find links on seed index page '{url}'")]
    NoCandidatesFound { url: String },

    #[error("Unable to load article page '{url}': {source}")]
    PageUnreachable {
        url: String,
        source: crawler::FetchError,
    },

    #[error("Failed to store artifacts for '{article}': {source}")]
    StoreFailure {
        article: String,
        source: storage::StorageError,
    },

    #[error("Article page '{url}' has no content region")]
    MalformedPage { url: String },

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Invalid state transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::RunState,
        to: state::RunState,
    },
}

impl ScrapeError {
    /// Returns true if the error concerns a single article page rather than
    /// the whole run
    pub fn is_page_scoped(&self) -> bool {
        matches!(
            self,
            Self::PageUnreachable { .. } | Self::StoreFailure { .. } | Self::MalformedPage { .. }
        )
    }
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

    #[error("Invalid CSS selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Link '{0}' is not a site-relative path")]
    NotSitePath(String),
}

/// Result type alias for Wiki-Backlinks operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use crate::config::{Config, SeedSpec};
pub use crate::crawler::Coordinator;
pub use crate::output::{PageResult, ProgressSink, RunSummary};
pub use crate::state::RunState;
pub use crate::text::{tokenize, StopWordSet};
pub use crate::url::{ArticleId, LinkHandle};
