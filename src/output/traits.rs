//! Progress reporting traits and types
//!
//! The crawler reports one `PageResult` per processed article through a
//! `ProgressSink`. Sinks are for observation only; the crawl never depends
//! on whether one is attached.

use crate::url::ArticleId;

/// Per-article outcome reported to the progress sink
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResult {
    /// Article the artifacts were written for
    pub article: ArticleId,

    /// Number of unique outbound article links
    pub link_count: usize,

    /// Number of unique non-stop words
    pub word_count: usize,
}

/// Trait for progress observers
///
/// Implementations must be thread-safe; results arrive in processing order.
pub trait ProgressSink: Send + Sync {
    /// Called once for every successfully processed article
    fn on_page(&self, result: &PageResult);
}

impl<F> ProgressSink for F
where
    F: Fn(&PageResult) + Send + Sync,
{
    fn on_page(&self, result: &PageResult) {
        self(result)
    }
}

/// Sink that forwards results into a tokio channel
///
/// Results are dropped silently once the receiver is gone.
#[derive(Debug, Clone)]
pub struct ChannelProgress {
    sender: tokio::sync::mpsc::UnboundedSender<PageResult>,
}

impl ChannelProgress {
    pub fn new() -> (Self, tokio::sync::mpsc::UnboundedReceiver<PageResult>) {
        let (sender, receiver) = tokio::sync::mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl ProgressSink for ChannelProgress {
    fn on_page(&self, result: &PageResult) {
        if self.sender.send(result.clone()).is_err() {
            tracing::trace!("Progress receiver dropped, discarding {}", result.article);
        }
    }
}
