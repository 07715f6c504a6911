use serde::Deserialize;
use std::path::PathBuf;

/// Main configuration structure for Wiki-Backlinks
///
/// Every table and key is optional; a missing file is the same as an empty one.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub site: SiteConfig,
}

/// What to do when a single article page cannot be processed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageErrorPolicy {
    /// Record the failure and continue with the next article
    #[default]
    Skip,
    /// Stop the whole run on the first failing article
    ///
    /// Articles are then processed one at a time and `max-concurrent-pages`
    /// is ignored.
    Abort,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum number of article pages fetched at the same time
    #[serde(rename = "max-concurrent-pages")]
    pub max_concurrent_pages: u32,

    /// Whole-request timeout (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// Connection establishment timeout (seconds)
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,

    #[serde(rename = "on-page-error")]
    pub on_page_error: PageErrorPolicy,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_pages: 4,
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
            on_page_error: PageErrorPolicy::Skip,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "WikiBacklinks".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://github.com/wiki-backlinks/wiki-backlinks".to_string(),
            contact_email: "wiki-backlinks@users.noreply.github.com".to_string(),
        }
    }
}

impl UserAgentConfig {
    /// Formats the user agent header: `Name/Version (+ContactURL; ContactEmail)`
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{}; {})",
            self.crawler_name, self.crawler_version, self.contact_url, self.contact_email
        )
    }
}

/// Layout of the wiki being crawled
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site root template; `{language}` is replaced by the seed language code
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Path of the script serving the "what links here" index
    #[serde(rename = "index-path")]
    pub index_path: String,

    /// Path prefix shared by all article links
    #[serde(rename = "article-prefix")]
    pub article_prefix: String,

    /// Container of the index listing
    #[serde(rename = "index-list-selector")]
    pub index_list_selector: String,

    /// Content region of an article page
    #[serde(rename = "content-selector")]
    pub content_selector: String,

    /// Article heading
    #[serde(rename = "heading-selector")]
    pub heading_selector: String,

    /// Class marking links to disambiguation pages
    #[serde(rename = "disambiguation-class")]
    pub disambiguation_class: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://{language}.wikipedia.org".to_string(),
            index_path: "/w/index.php".to_string(),
            article_prefix: "/wiki/".to_string(),
            index_list_selector: "ul#mw-whatlinkshere-list".to_string(),
            content_selector: "div#mw-content-text".to_string(),
            heading_selector: "h1#firstHeading".to_string(),
            disambiguation_class: "mw-disambig".to_string(),
        }
    }
}

/// The inputs of one crawl run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedSpec {
    /// Seed article whose inbound links drive the crawl
    pub article: String,

    /// Language code, selects the wiki and the stop words
    pub language: String,

    /// Maximum number of entries requested from the index page
    pub limit: u32,

    /// Root folder for the Links/ and Words/ artifacts
    pub output_root: PathBuf,
}

impl SeedSpec {
    pub fn new(
        article: impl Into<String>,
        language: impl Into<String>,
        limit: u32,
        output_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            article: article.into(),
            language: language.into(),
            limit,
            output_root: output_root.into(),
        }
    }
}
