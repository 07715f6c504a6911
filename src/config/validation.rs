use crate::config::types::{Config, CrawlerConfig, SeedSpec, SiteConfig, UserAgentConfig};
use crate::ConfigError;
use scraper::Selector;
use url::Url;

/// Upper bound on concurrent article fetches
const MAX_CONCURRENT_PAGES: u32 = 32;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_site_config(&config.site)?;
    Ok(())
}

/// Validates the run inputs
pub fn validate_seed(seed: &SeedSpec) -> Result<(), ConfigError> {
    if seed.article.trim().is_empty() {
        return Err(ConfigError::Validation(
            "article cannot be empty".to_string(),
        ));
    }

    // The article names the artifact folder of every page in the run
    if seed.article == "."
        || seed.article == ".."
        || seed.article.contains('/')
        || seed.article.contains('\\')
    {
        return Err(ConfigError::Validation(format!(
            "article '{}' cannot be used as a folder name",
            seed.article
        )));
    }

    if seed.language.is_empty()
        || !seed
            .language
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "language must be a non-empty code of letters, digits and hyphens, got '{}'",
            seed.language
        )));
    }

    if seed.limit < 1 {
        return Err(ConfigError::Validation(
            "limit must be >= 1, got 0".to_string(),
        ));
    }

    if seed.output_root.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "output path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_concurrent_pages < 1 || config.max_concurrent_pages > MAX_CONCURRENT_PAGES {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_pages must be between 1 and {}, got {}",
            MAX_CONCURRENT_PAGES, config.max_concurrent_pages
        )));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "request_timeout_secs must be >= 1".to_string(),
        ));
    }

    if config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "connect_timeout_secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    validate_email(&config.contact_email)?;

    Ok(())
}

/// Validates the site layout
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    if !config.base_url.contains("{language}") {
        tracing::debug!(
            "base_url '{}' has no {{language}} placeholder, every language uses the same site",
            config.base_url
        );
    }

    // Check the template with a representative language code
    let sample = config.base_url.replace("{language}", "en");
    let url = Url::parse(&sample)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base_url '{}': {}", sample, e)))?;

    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url '{}' must use http or https",
            config.base_url
        )));
    }

    for (name, path) in [
        ("index_path", &config.index_path),
        ("article_prefix", &config.article_prefix),
    ] {
        if !path.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "{} must start with '/', got '{}'",
                name, path
            )));
        }
    }

    for selector in [
        &config.index_list_selector,
        &config.content_selector,
        &config.heading_selector,
    ] {
        validate_selector(selector)?;
    }

    if config.disambiguation_class.is_empty()
        || config.disambiguation_class.contains(char::is_whitespace)
    {
        return Err(ConfigError::Validation(format!(
            "disambiguation_class must be a single class name, got '{}'",
            config.disambiguation_class
        )));
    }

    Ok(())
}

/// Checks that a CSS selector compiles
pub(crate) fn validate_selector(selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector).map_err(|e| ConfigError::InvalidSelector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    if email.is_empty() {
        return Err(ConfigError::Validation(
            "contact_email cannot be empty".to_string(),
        ));
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    if !parts[1].contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}
