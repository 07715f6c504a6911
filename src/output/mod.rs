//! Output module for progress reporting and run summaries
//!
//! This module handles:
//! - The `ProgressSink` trait and its closure and channel implementations
//! - Console rendering of per-article progress
//! - The `RunSummary` returned by a crawl

pub mod stats;
mod traits;

pub use stats::{format_duration, print_summary, PageFailure, RunSummary};
pub use traits::{ChannelProgress, PageResult, ProgressSink};

/// Prints each processed article with its link and word counts
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleProgress;

impl ProgressSink for ConsoleProgress {
    fn on_page(&self, result: &PageResult) {
        println!("{}", result.article);
        println!("\tNumber of links: {}", result.link_count);
        println!("\tNumber of words: {}", result.word_count);
    }
}
