//! Wiki-Backlinks main entry point
//!
//! This is the command-line interface for the "what links here" crawler.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use wiki_backlinks::config::{load_config_or_default, validate, PageErrorPolicy, SeedSpec};
use wiki_backlinks::crawler::run_crawl;
use wiki_backlinks::output::{print_summary, ConsoleProgress};

/// Wiki-Backlinks: crawls the articles linking to a seed article
///
/// For every article listed on the seed's "what links here" page, the
/// outbound article links are written to `<OUTPUT>/Links/<ARTICLE>/` and the
/// bag of words to `<OUTPUT>/Words/<ARTICLE>/`.
#[derive(Parser, Debug)]
#[command(name = "wiki-backlinks")]
#[command(version)]
#[command(about = "Crawls the articles linking to a wiki article", long_about = None)]
struct Cli {
    /// Seed article, e.g. "Dog"
    #[arg(value_name = "ARTICLE")]
    article: String,

    /// Wiki language code, e.g. "en" or "sv"
    #[arg(value_name = "LANGUAGE")]
    language: String,

    /// Maximum number of linking articles to request
    #[arg(value_name = "LIMIT", value_parser = clap::value_parser!(u32).range(1..))]
    limit: u32,

    /// Folder receiving the Links/ and Words/ artifacts
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Number of articles fetched at the same time (overrides the config file)
    #[arg(short = 'j', long)]
    concurrency: Option<u32>,

    /// Stop at the first article that cannot be processed
    #[arg(long)]
    abort_on_error: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    if !cli.quiet {
        println!("wiki-backlinks v.{}", env!("CARGO_PKG_VERSION"));
    }

    let mut config = load_config_or_default(cli.config.as_deref()).with_context(|| {
        match &cli.config {
            Some(path) => format!("Failed to load configuration from {}", path.display()),
            None => "Invalid default configuration".to_string(),
        }
    })?;

    if let Some(concurrency) = cli.concurrency {
        config.crawler.max_concurrent_pages = concurrency;
    }
    if cli.abort_on_error {
        config.crawler.on_page_error = PageErrorPolicy::Abort;
    }
    validate(&config).context("Invalid command line overrides")?;

    let seed = SeedSpec::new(cli.article, cli.language, cli.limit, cli.output);
    tracing::info!(
        "Crawling articles linking to '{}' ({}), limit {}, output {}",
        seed.article,
        seed.language,
        seed.limit,
        seed.output_root.display()
    );

    let progress = (!cli.quiet).then_some(ConsoleProgress);
    let summary = run_crawl(seed, config, progress)
        .await
        .context("Oops! Something went wrong")?;

    if !cli.quiet {
        print_summary(&summary);
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("wiki_backlinks=info,warn"),
            1 => EnvFilter::new("wiki_backlinks=debug,info"),
            2 => EnvFilter::new("wiki_backlinks=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}
