/// Run state definitions for tracking crawl progress
///
/// A run is a linear pipeline: the index page is fetched, candidates are
/// extracted, article pages are processed, and the run ends in `Done` or
/// `Failed`.
use std::fmt;

/// Represents the current stage of a crawl run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RunState {
    /// Run has been created but not started
    #[default]
    Idle,

    /// The "what links here" index page is being fetched
    FetchingIndex,

    /// Candidate article links are being extracted from the index page
    ExtractingCandidates,

    /// Candidate article pages are being fetched and processed
    ProcessingPages,

    // ===== Terminal States =====
    /// All candidates were visited
    Done,

    /// The run stopped on an unrecovered error
    Failed,
}

impl RunState {
    /// Returns true if no further transitions are possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }

    /// Returns true if the pipeline may move from `self` to `next`
    pub fn can_transition_to(&self, next: RunState) -> bool {
        use RunState::*;

        matches!(
            (self, next),
            (Idle, FetchingIndex)
                | (FetchingIndex, ExtractingCandidates)
                | (FetchingIndex, Failed)
                | (ExtractingCandidates, ProcessingPages)
                | (ExtractingCandidates, Failed)
                | (ProcessingPages, Done)
                | (ProcessingPages, Failed)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::FetchingIndex => "fetching_index",
            Self::ExtractingCandidates => "extracting_candidates",
            Self::ProcessingPages => "processing_pages",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
