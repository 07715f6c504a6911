//! Site URLs and article link handles
//!
//! This module provides:
//! - `LinkHandle`: a site-relative article path such as `/wiki/Dog`
//! - `ArticleId`: the final path segment of a handle, used as artifact name
//! - `SiteLocator`: builds the index and article URLs for one language wiki

use crate::config::{SeedSpec, SiteConfig};
use crate::{UrlError, UrlResult};
use std::fmt;
use url::Url;

/// Separator marking namespaced (non-article) pages such as `Category:Mammals`
pub const NAMESPACE_SEPARATOR: char = ':';

/// A site-relative path identifying one page
///
/// Equality is exact string equality on the path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LinkHandle(String);

impl LinkHandle {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the article identifier: everything after the final `/`
    pub fn article_id(&self) -> ArticleId {
        let segment = match self.0.rfind('/') {
            Some(pos) => &self.0[pos + 1..],
            None => self.0.as_str(),
        };
        ArticleId(segment.to_string())
    }

    /// Returns true if the path names a non-article page (category, file, talk, ...)
    pub fn is_namespaced(&self) -> bool {
        self.0.contains(NAMESPACE_SEPARATOR)
    }
}

impl fmt::Display for LinkHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Artifact name derived from a `LinkHandle`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArticleId(String);

impl ArticleId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Builds URLs for a language-scoped wiki
#[derive(Debug, Clone)]
pub struct SiteLocator {
    root: Url,
    index_path: String,
}

impl SiteLocator {
    /// Resolves the site root for `language` from the configured template
    ///
    /// # Example
    ///
    /// ```
    /// use wiki_backlinks::config::SiteConfig;
    /// use wiki_backlinks::url::SiteLocator;
    ///
    /// let site = SiteLocator::new(&SiteConfig::default(), "sv").unwrap();
    /// assert_eq!(site.root().as_str(), "https://sv.wikipedia.org/");
    /// ```
    pub fn new(site: &SiteConfig, language: &str) -> UrlResult<Self> {
        let base = site.base_url.replace("{language}", language);
        let root = Url::parse(&base).map_err(|e| UrlError::Parse(format!("{}: {}", base, e)))?;

        if root.scheme() != "http" && root.scheme() != "https" {
            return Err(UrlError::InvalidScheme(root.scheme().to_string()));
        }

        Ok(Self {
            root,
            index_path: site.index_path.clone(),
        })
    }

    pub fn root(&self) -> &Url {
        &self.root
    }

    /// Builds the "what links here" index URL for the seed article
    ///
    /// Redirects and transclusions are hidden so only real links are listed.
    pub fn index_url(&self, seed: &SeedSpec) -> UrlResult<Url> {
        let mut url = self
            .root
            .join(&self.index_path)
            .map_err(|e| UrlError::Parse(format!("{}: {}", self.index_path, e)))?;

        url.query_pairs_mut()
            .append_pair("title", &format!("Special:WhatLinksHere/{}", seed.article))
            .append_pair("limit", &seed.limit.to_string())
            .append_pair("hideredirs", "1")
            .append_pair("hidetrans", "1");

        Ok(url)
    }

    /// Builds the absolute URL of an article page
    pub fn page_url(&self, handle: &LinkHandle) -> UrlResult<Url> {
        if !handle.as_str().starts_with('/') {
            return Err(UrlError::NotSitePath(handle.to_string()));
        }

        self.root
            .join(handle.as_str())
            .map_err(|e| UrlError::Parse(format!("{}: {}", handle, e)))
    }
}
