//! HTML parser for extracting article links and text
//!
//! This module handles parsing wiki pages to extract:
//! - Candidate articles from the "what links here" index listing
//! - Outbound article links from an article's content region
//! - The heading and body text an article's bag of words is built from

use crate::config::{validate_selector, SiteConfig};
use crate::url::LinkHandle;
use crate::ConfigError;
use scraper::{CaseSensitivity, Html, Selector};
use std::collections::HashSet;

/// Rules deciding which anchors count as article links
#[derive(Debug, Clone)]
pub struct LinkRules {
    /// Site-internal prefix every article link starts with
    pub article_prefix: String,

    /// Class marking links to disambiguation pages
    pub disambiguation_class: String,
}

impl LinkRules {
    pub fn from_site(site: &SiteConfig) -> Self {
        Self {
            article_prefix: site.article_prefix.clone(),
            disambiguation_class: site.disambiguation_class.clone(),
        }
    }
}

/// Text and links extracted from an article page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleContent {
    /// Heading text, empty if the page has none
    pub heading: String,

    /// Outbound article links of the content region
    pub links: Vec<LinkHandle>,

    /// Heading followed by every text node of the content region
    pub text: String,
}

/// Parser with the site's selectors compiled once
#[derive(Debug, Clone)]
pub struct PageParser {
    index_list: Selector,
    content: Selector,
    heading: Selector,
    rules: LinkRules,
}

impl PageParser {
    /// Compiles the selectors of `site`
    pub fn from_site(site: &SiteConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            index_list: validate_selector(&site.index_list_selector)?,
            content: validate_selector(&site.content_selector)?,
            heading: validate_selector(&site.heading_selector)?,
            rules: LinkRules::from_site(site),
        })
    }

    /// Extracts the candidate articles listed on a "what links here" page
    pub fn index_candidates(&self, html: &str) -> Vec<LinkHandle> {
        let document = Html::parse_document(html);
        extract_links(&document, &self.index_list, &self.rules)
    }

    /// Extracts heading, links and text of an article page
    ///
    /// Returns `None` if the page has no content region.
    pub fn parse_article(&self, html: &str) -> Option<ArticleContent> {
        let document = Html::parse_document(html);
        let region = document.select(&self.content).next()?;

        let heading = document
            .select(&self.heading)
            .next()
            .map(|element| element.text().collect::<String>().trim().to_string())
            .unwrap_or_default();

        let body = region.text().collect::<Vec<_>>().join(" ");
        let text = format!("{} {}", heading, body);

        let links = extract_links(&document, &self.content, &self.rules);

        Some(ArticleContent {
            heading,
            links,
            text,
        })
    }
}

/// Extracts the article links found inside the regions matched by `region`
///
/// # Link Extraction Rules
///
/// **Include:**
/// - `<a href="...">` whose target starts with the article prefix
///
/// **Exclude:**
/// - Anchors carrying the disambiguation class
/// - Namespaced targets (`Category:`, `File:`, `Talk:`, ...)
/// - The bare prefix with no article name
///
/// Duplicates are dropped, keeping the first occurrence in document order.
///
/// # Example
///
/// ```
/// use scraper::{Html, Selector};
/// use wiki_backlinks::config::SiteConfig;
/// use wiki_backlinks::crawler::{extract_links, LinkRules};
///
/// let html = r#"<div id="c"><a href="/wiki/Dog">Dog</a><a href="/wiki/Dog">again</a></div>"#;
/// let document = Html::parse_document(html);
/// let region = Selector::parse("div#c").unwrap();
/// let links = extract_links(&document, &region, &LinkRules::from_site(&SiteConfig::default()));
/// assert_eq!(links.len(), 1);
/// assert_eq!(links[0].as_str(), "/wiki/Dog");
/// ```
pub fn extract_links(document: &Html, region: &Selector, rules: &LinkRules) -> Vec<LinkHandle> {
    let mut links = Vec::new();
    let mut seen = HashSet::new();

    let anchor_selector = match Selector::parse("a[href]") {
        Ok(selector) => selector,
        Err(_) => return links,
    };

    for container in document.select(region) {
        for anchor in container.select(&anchor_selector) {
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };

            if !href.starts_with(&rules.article_prefix) || href.len() == rules.article_prefix.len() {
                continue;
            }

            if anchor
                .value()
                .has_class(&rules.disambiguation_class, CaseSensitivity::CaseSensitive)
            {
                continue;
            }

            let handle = LinkHandle::new(href);
            if handle.is_namespaced() {
                continue;
            }

            if seen.insert(href.to_string()) {
                links.push(handle);
            }
        }
    }

    links
}
