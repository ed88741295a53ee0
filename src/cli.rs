// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// There is one subcommand, `crawl`. It builds a crawler from a seed URL,
// runs crawl steps until the requested number of pages has been indexed,
// then reports how often a term occurs on each indexed page.
//
// Choosing --replay swaps the live fetcher for one that serves a cached
// HTML file, which makes runs repeatable (and skips the "already indexed"
// check, so the same page can be indexed again).
// =============================================================================

use crate::fetch::DEFAULT_CONTENT_SELECTOR;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub const DEFAULT_SEED: &str = "https://en.wikipedia.org/wiki/Java_(programming_language)";

#[derive(Parser, Debug)]
#[command(
    name = "wiki-crawler",
    version,
    about = "A breadth-first crawler that indexes wiki articles one page at a time",
    long_about = "wiki-crawler starts from a seed article, indexes the text of each page it visits \
                  and follows the article's internal /wiki/ links. Pages already in the index are \
                  never fetched twice."
)]
pub struct Cli {
    /// Log debug output (same as RUST_LOG=wiki_crawler=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crawl from a seed article and report term counts
    ///
    /// Example: wiki-crawler crawl --pages 5 --term java
    Crawl(CrawlArgs),
}

#[derive(Args, Debug)]
pub struct CrawlArgs {
    /// Article to start from
    #[arg(default_value = DEFAULT_SEED)]
    pub seed: String,

    /// Serve every page from this cached HTML file instead of the network
    #[arg(long, value_name = "FILE")]
    pub replay: Option<PathBuf>,

    /// Location the cached page was downloaded from (defaults to the seed)
    #[arg(long, value_name = "URL", requires = "replay")]
    pub replay_base: Option<String>,

    /// Start from the seed page's links instead of the seed itself
    #[arg(long)]
    pub preseed: bool,

    /// Number of pages to index before stopping
    #[arg(long, default_value_t = 1)]
    pub pages: usize,

    /// Term to report counts for once crawling is done
    #[arg(long, default_value = "the")]
    pub term: String,

    /// Keep the index in this JSON file between runs
    #[arg(long, value_name = "PATH", env = "WIKI_CRAWLER_INDEX")]
    pub index_file: Option<PathBuf>,

    /// Timeout for a single page download
    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,

    /// CSS selector for the content blocks of a page
    #[arg(long, default_value = DEFAULT_CONTENT_SELECTOR)]
    pub content_selector: String,

    /// Output results in JSON format instead of a table
    #[arg(long)]
    pub json: bool,
}
