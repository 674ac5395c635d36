use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Registry};

use crawldex::json::{to_pretty_json, write_json_file};
use crawldex::{
    build_index, build_index_parallel, BuildStats, ConcurrentInvertedIndex,
    ConcurrentQueryProcessor, Config, CrawlConfig, HttpFetcher, IndexRead, InvertedIndex,
    QueryProcessor, QueryResults, SearchMode, SequentialQueryProcessor, WebCrawler, WorkQueue,
};

mod cli;
use cli::Cli;

/// The index and the machinery around it, chosen once per run.
enum Pipeline {
    Sequential(InvertedIndex),
    Concurrent {
        index: Arc<ConcurrentInvertedIndex>,
        queue: Arc<WorkQueue>,
    },
}

impl Pipeline {
    fn new(config: &Config, crawling: bool) -> Result<Self> {
        if config.is_concurrent(crawling) {
            info!(threads = config.threads, "using concurrent pipeline");
            Ok(Pipeline::Concurrent {
                index: Arc::new(ConcurrentInvertedIndex::new()),
                queue: Arc::new(WorkQueue::new(config.threads)?),
            })
        } else {
            Ok(Pipeline::Sequential(InvertedIndex::new()))
        }
    }

    fn build(&mut self, root: &Path) -> Result<BuildStats> {
        let stats = match self {
            Pipeline::Sequential(index) => build_index(root, index),
            Pipeline::Concurrent { index, queue } => build_index_parallel(root, index, queue),
        };
        stats.with_context(|| format!("building index from {}", root.display()))
    }

    fn crawl(&self, seed: &str, config: &Config) -> Result<()> {
        let Pipeline::Concurrent { index, queue } = self else {
            bail!("crawling needs the concurrent pipeline");
        };
        let fetcher = HttpFetcher::new(Duration::from_secs(config.fetch_timeout_secs))?;
        let crawler = WebCrawler::new(
            Arc::clone(index),
            Arc::clone(queue),
            fetcher,
            CrawlConfig::from(config),
        );
        crawler
            .crawl(seed)
            .with_context(|| format!("crawling from {}", seed))
    }

    fn index_json(&self) -> Result<String> {
        Ok(match self {
            Pipeline::Sequential(index) => index.index_json()?,
            Pipeline::Concurrent { index, .. } => index.index_json()?,
        })
    }

    fn counts_json(&self) -> Result<String> {
        Ok(match self {
            Pipeline::Sequential(index) => index.counts_json()?,
            Pipeline::Concurrent { index, .. } => index.counts_json()?,
        })
    }

    fn query(&self, path: &Path, mode: SearchMode) -> Result<QueryResults> {
        let context = || format!("processing queries from {}", path.display());
        match self {
            Pipeline::Sequential(index) => {
                let mut processor = SequentialQueryProcessor::new(index, mode);
                processor.process_file(path).with_context(context)?;
                Ok(processor.results())
            }
            Pipeline::Concurrent { index, queue } => {
                let mut processor = ConcurrentQueryProcessor::new(Arc::clone(index), mode, queue);
                processor.process_file(path).with_context(context)?;
                Ok(processor.results())
            }
        }
    }

    fn summary(&self) -> (usize, usize) {
        match self {
            Pipeline::Sequential(index) => (index.word_count(), index.location_count()),
            Pipeline::Concurrent { index, .. } => (index.word_count(), index.location_count()),
        }
    }

    fn shutdown(self) {
        if let Pipeline::Concurrent { queue, .. } = self {
            queue.shutdown();
        }
    }
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref(), &cli.overrides()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut pipeline = match Pipeline::new(&config, cli.html.is_some()) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            report(&e);
            return ExitCode::FAILURE;
        }
    };
    let mut failures = 0;

    if let Some(root) = &cli.text {
        match with_spinner("Indexing", || pipeline.build(root)) {
            Ok(stats) => eprintln!("indexed {} files ({} skipped)", stats.indexed, stats.failed),
            Err(e) => failures += report(&e),
        }
    }

    if let Some(seed) = &cli.html {
        if let Err(e) = with_spinner("Crawling", || pipeline.crawl(seed, &config)) {
            failures += report(&e);
        }
    }

    let (words, locations) = pipeline.summary();
    eprintln!("{} words across {} locations", words, locations);

    if let Some(path) = &cli.index {
        if let Err(e) = pipeline.index_json().and_then(|json| write(path, &json)) {
            failures += report(&e);
        }
    }

    if let Some(path) = &cli.counts {
        if let Err(e) = pipeline.counts_json().and_then(|json| write(path, &json)) {
            failures += report(&e);
        }
    }

    let mut results = QueryResults::new();
    if let Some(path) = &cli.query {
        match pipeline.query(path, SearchMode::from_exact(config.exact)) {
            Ok(answered) => results = answered,
            Err(e) => failures += report(&e),
        }
    }

    if let Some(path) = &cli.results {
        let written = to_pretty_json(&results)
            .map_err(anyhow::Error::from)
            .and_then(|json| write(path, &json));
        if let Err(e) = written {
            failures += report(&e);
        }
    }

    pipeline.shutdown();

    if failures > 0 {
        eprintln!("⚠️  {} phase(s) failed; see log above", failures);
    }
    ExitCode::SUCCESS
}

/// Log to stderr; `RUST_LOG` overrides the default `warn` level.
fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_names(true);

    Registry::default().with(env_filter).with(fmt_layer).init();
}

fn report(e: &anyhow::Error) -> usize {
    error!("{:#}", e);
    1
}

fn write(path: &Path, json: &str) -> Result<()> {
    write_json_file(path, json)?;
    info!(path = %path.display(), "wrote");
    Ok(())
}

#[cfg(feature = "progress")]
fn with_spinner<T>(prefix: &'static str, work: impl FnOnce() -> T) -> T {
    use indicatif::{ProgressBar, ProgressStyle};

    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.cyan} {prefix:<12} {elapsed:.dim}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner.set_prefix(prefix);
    spinner.enable_steady_tick(Duration::from_millis(100));

    let outcome = work();
    spinner.finish_and_clear();
    outcome
}

#[cfg(not(feature = "progress"))]
fn with_spinner<T>(_prefix: &'static str, work: impl FnOnce() -> T) -> T {
    work()
}
