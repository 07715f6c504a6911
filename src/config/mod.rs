//! Configuration module for Wiki-Backlinks
//!
//! This module handles the run inputs (`SeedSpec`) and the optional TOML file
//! with crawler, user agent and site layout settings.
//!
//! # Example
//!
//! ```no_run
//! use wiki_backlinks::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("backlinks.toml")).unwrap();
//! println!("Fetching up to {} pages at once", config.crawler.max_concurrent_pages);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, PageErrorPolicy, SeedSpec, SiteConfig, UserAgentConfig,
};

// Re-export parser and validation functions
pub use parser::{load_config, load_config_or_default, parse_config};
pub use validation::{validate, validate_seed};
pub(crate) use validation::validate_selector;
