//! Run summary and its console rendering

use crate::state::RunState;
use crate::url::LinkHandle;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// An article that was skipped because it could not be processed
#[derive(Debug, Clone)]
pub struct PageFailure {
    /// The candidate that failed
    pub handle: LinkHandle,

    /// Error description
    pub message: String,
}

/// Outcome of one crawl run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Seed article of the run
    pub seed_article: String,

    /// Number of candidates found on the index page
    pub candidates: usize,

    /// Number of articles whose artifacts were written
    pub processed: usize,

    /// Articles skipped under the skip policy
    pub failures: Vec<PageFailure>,

    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,

    /// Final state of the run
    pub state: RunState,
}

impl RunSummary {
    /// Creates an empty summary for a run starting now
    pub fn new(seed_article: impl Into<String>) -> Self {
        Self {
            seed_article: seed_article.into(),
            candidates: 0,
            processed: 0,
            failures: Vec::new(),
            started_at: Utc::now(),
            finished_at: None,
            state: RunState::Idle,
        }
    }

    pub fn record_processed(&mut self) {
        self.processed += 1;
    }

    pub fn record_failure(&mut self, handle: LinkHandle, message: impl Into<String>) {
        self.failures.push(PageFailure {
            handle,
            message: message.into(),
        });
    }

    /// Stamps the finish time and final state
    pub fn finish(&mut self, state: RunState) {
        self.finished_at = Some(Utc::now());
        self.state = state;
    }

    /// Wall-clock duration, if the run has finished
    pub fn duration(&self) -> Option<Duration> {
        self.finished_at
            .and_then(|finished| (finished - self.started_at).to_std().ok())
    }
}

/// Formats a duration as "M minutes and S seconds"
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!("{} minutes and {} seconds", secs / 60, secs % 60)
}

/// Prints the run summary to stdout
pub fn print_summary(summary: &RunSummary) {
    println!("Number of processed articles: {}", summary.processed);

    if let Some(duration) = summary.duration() {
        println!("Execution time: {}", format_duration(duration));
    }

    if !summary.failures.is_empty() {
        println!("Skipped articles ({}):", summary.failures.len());
        for failure in &summary.failures {
            println!("  - {}: {}", failure.handle, failure.message);
        }
    }
}
