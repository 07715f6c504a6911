//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl pipeline:
//! - Loading the seed's "what links here" index page
//! - Extracting the candidate articles
//! - Fetching each candidate, extracting its links and bag of words
//! - Persisting the artifacts and reporting per-article progress

use crate::config::{validate, validate_seed, Config, PageErrorPolicy, SeedSpec};
use crate::crawler::fetcher::{HttpPageFetcher, PageFetcher};
use crate::crawler::parser::PageParser;
use crate::output::{PageResult, ProgressSink, RunSummary};
use crate::state::{RunState, RunTracker};
use crate::storage::{open_store, ArtifactContent, ArtifactKey, ArtifactStore, Category};
use crate::text::{tokenize, StopWordSet};
use crate::url::{ArticleId, LinkHandle, SiteLocator};
use crate::ScrapeError;
use futures::stream::{self, StreamExt};

/// Main crawler coordinator structure
pub struct Coordinator<F, S> {
    seed: SeedSpec,
    config: Config,
    site: SiteLocator,
    parser: PageParser,
    stop_words: StopWordSet,
    fetcher: F,
    store: S,
    progress: Option<Box<dyn ProgressSink>>,
}

impl<F: PageFetcher, S: ArtifactStore> Coordinator<F, S> {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `seed` - The run inputs
    /// * `config` - The crawler configuration
    /// * `fetcher` - Loads index and article pages
    /// * `store` - Receives the Links and Words artifacts
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(ScrapeError)` - Invalid seed or configuration
    pub fn new(seed: SeedSpec, config: Config, fetcher: F, store: S) -> Result<Self, ScrapeError> {
        validate_seed(&seed)?;
        validate(&config)?;

        let site = SiteLocator::new(&config.site, &seed.language)?;
        let parser = PageParser::from_site(&config.site)?;

        let stop_words = StopWordSet::resolve(&seed.language);
        if stop_words.is_empty() {
            tracing::info!(
                "No stop words for language '{}', words will not be filtered",
                seed.language
            );
        }

        Ok(Self {
            seed,
            config,
            site,
            parser,
            stop_words,
            fetcher,
            store,
            progress: None,
        })
    }

    /// Attaches a progress sink receiving one result per processed article
    pub fn with_progress(mut self, sink: impl ProgressSink + 'static) -> Self {
        self.progress = Some(Box::new(sink));
        self
    }

    pub fn seed(&self) -> &SeedSpec {
        &self.seed
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Runs the crawl
    ///
    /// Seed failures (`SeedUnreachable`, `NoCandidatesFound`) end the run
    /// immediately. Per-article failures are skipped or abort the run
    /// depending on `crawler.on-page-error`.
    ///
    /// # Returns
    ///
    /// * `Ok(RunSummary)` - All candidates were visited; `processed` is the
    ///   number of articles whose artifacts were written
    /// * `Err(ScrapeError)` - The run failed
    pub async fn run(&self) -> Result<RunSummary, ScrapeError> {
        let mut tracker = RunTracker::new();
        let mut summary = RunSummary::new(&self.seed.article);

        match self.run_pipeline(&mut tracker, &mut summary).await {
            Ok(()) => {
                summary.finish(tracker.state());
                tracing::info!(
                    "Crawl completed: {} of {} articles processed, {} skipped",
                    summary.processed,
                    summary.candidates,
                    summary.failures.len()
                );
                Ok(summary)
            }
            Err(e) => {
                let failed_in = tracker.fail();
                tracing::error!(
                    "Crawl for '{}' failed while {}: {}",
                    self.seed.article,
                    failed_in,
                    e
                );
                Err(e)
            }
        }
    }

    async fn run_pipeline(
        &self,
        tracker: &mut RunTracker,
        summary: &mut RunSummary,
    ) -> Result<(), ScrapeError> {
        let candidates = self.discover_candidates(tracker).await?;
        summary.candidates = candidates.len();

        tracker.transition(RunState::ProcessingPages)?;

        let concurrency = self.concurrency();
        tracing::debug!("Processing up to {} articles at once", concurrency);
        let mut pages = stream::iter(candidates)
            .map(|handle| async move {
                let outcome = self.process_page(&handle).await;
                (handle, outcome)
            })
            .buffered(concurrency);

        while let Some((handle, outcome)) = pages.next().await {
            match outcome {
                Ok(result) => {
                    summary.record_processed();
                    self.report(&result);
                }
                Err(e) if e.is_page_scoped() && self.skips_failed_pages() => {
                    tracing::warn!("Skipping {}: {}", handle, e);
                    summary.record_failure(handle, e.to_string());
                }
                Err(e) => return Err(e),
            }
        }

        tracker.transition(RunState::Done)?;
        Ok(())
    }

    /// Loads the index page and extracts the candidate articles
    async fn discover_candidates(
        &self,
        tracker: &mut RunTracker,
    ) -> Result<Vec<LinkHandle>, ScrapeError> {
        tracker.transition(RunState::FetchingIndex)?;

        let index_url = self.site.index_url(&self.seed)?;
        tracing::info!("Loading index page: {}", index_url);

        let body = self
            .fetcher
            .load(&index_url)
            .await
            .map_err(|source| ScrapeError::SeedUnreachable {
                url: index_url.to_string(),
                source,
            })?;

        tracker.transition(RunState::ExtractingCandidates)?;

        let candidates = self.parser.index_candidates(&body);
        if candidates.is_empty() {
            return Err(ScrapeError::NoCandidatesFound {
                url: index_url.to_string(),
            });
        }

        tracing::info!(
            "Found {} articles linking to '{}'",
            candidates.len(),
            self.seed.article
        );
        Ok(candidates)
    }

    /// Fetches one article, writes its artifacts and returns its counts
    async fn process_page(&self, handle: &LinkHandle) -> Result<PageResult, ScrapeError> {
        let url = self.site.page_url(handle)?;
        tracing::debug!("Processing article: {}", url);

        let body = self
            .fetcher
            .load(&url)
            .await
            .map_err(|source| ScrapeError::PageUnreachable {
                url: url.to_string(),
                source,
            })?;

        // The parsed document is not Send, keep it out of the awaits below
        let content = self
            .parser
            .parse_article(&body)
            .ok_or_else(|| ScrapeError::MalformedPage {
                url: url.to_string(),
            })?;

        let article = handle.article_id();
        let words = tokenize(&content.text, &self.stop_words);
        let links: Vec<String> = content.links.iter().map(|l| l.to_string()).collect();

        let result = PageResult {
            article: article.clone(),
            link_count: links.len(),
            word_count: words.len(),
        };

        self.persist(Category::Links, &article, ArtifactContent::Lines(links))
            .await?;
        if let Err(e) = self
            .persist(Category::Words, &article, ArtifactContent::Text(words.join(" ")))
            .await
        {
            // A skipped article leaves no artifacts behind
            self.discard(Category::Links, &article).await;
            return Err(e);
        }

        tracing::debug!(
            "{}: {} links, {} words",
            article,
            result.link_count,
            result.word_count
        );
        Ok(result)
    }

    async fn persist(
        &self,
        category: Category,
        article: &ArticleId,
        content: ArtifactContent,
    ) -> Result<(), ScrapeError> {
        let key = ArtifactKey::new(category, self.seed.article.as_str(), article.as_str());
        self.store
            .put(&key, &content)
            .await
            .map_err(|source| ScrapeError::StoreFailure {
                article: article.to_string(),
                source,
            })
    }

    async fn discard(&self, category: Category, article: &ArticleId) {
        let key = ArtifactKey::new(category, self.seed.article.as_str(), article.as_str());
        if let Err(e) = self.store.remove(&key).await {
            tracing::warn!("Failed to remove partial artifact {}: {}", key, e);
        }
    }

    /// Number of articles processed at the same time
    ///
    /// Aborting runs process one article at a time, so no article after the
    /// failing one is fetched or written.
    fn concurrency(&self) -> usize {
        match self.config.crawler.on_page_error {
            PageErrorPolicy::Skip => self.config.crawler.max_concurrent_pages as usize,
            PageErrorPolicy::Abort => 1,
        }
    }

    fn skips_failed_pages(&self) -> bool {
        self.config.crawler.on_page_error == PageErrorPolicy::Skip
    }

    fn report(&self, result: &PageResult) {
        if let Some(sink) = &self.progress {
            sink.on_page(result);
        }
    }
}

/// Runs a crawl over HTTP, writing artifacts below `seed.output_root`
///
/// # Example
///
/// ```no_run
/// use wiki_backlinks::config::{Config, SeedSpec};
/// use wiki_backlinks::crawler::run_crawl;
/// use wiki_backlinks::output::ConsoleProgress;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let seed = SeedSpec::new("Dog", "en", 50, "./out");
/// let summary = run_crawl(seed, Config::default(), Some(ConsoleProgress)).await?;
/// println!("{} articles", summary.processed);
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(
    seed: SeedSpec,
    config: Config,
    progress: Option<impl ProgressSink + 'static>,
) -> Result<RunSummary, ScrapeError> {
    let fetcher = HttpPageFetcher::new(&config.user_agent, &config.crawler)?;
    let store = open_store(&seed.output_root);

    let mut coordinator = Coordinator::new(seed, config, fetcher, store)?;
    if let Some(sink) = progress {
        coordinator = coordinator.with_progress(sink);
    }

    coordinator.run().await
}
