// src/main.rs
// =============================================================================
// This is the entry point of the crawler CLI.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (tracing, to stderr)
// 3. Build the index, the fetch strategy and the crawler
// 4. Run crawl steps until enough pages are indexed
// 5. Print what was indexed and the counts for the requested term
// 6. Exit with proper code (0 = done, 1 = ran out of pages, 2 = error)
// =============================================================================

mod cli;
mod crawl;
mod error;
mod fetch;
mod index;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, CrawlArgs, Commands};
use crawl::{run_until_indexed, CrawlReport, WikiCrawler};
use fetch::{FetchMode, FetchStrategy, LiveFetcher, PageParser, ReplayFetcher};
use index::MemoryIndex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;
use url::Url;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            // Printed directly so it shows up whatever RUST_LOG says
            eprintln!("{}", fatal_message(&e));
            2
        }
    };

    std::process::exit(exit_code);
}

fn fatal_message(e: &anyhow::Error) -> String {
    // {:#} includes the whole context chain on one line
    format!("Error: {:#}", e)
}

// RUST_LOG wins over --verbose when both are given
fn init_logging(verbose: bool) {
    let default = if verbose {
        "wiki_crawler=debug"
    } else {
        "wiki_crawler=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Crawl(args) => handle_crawl(args).await,
    }
}

async fn handle_crawl(args: CrawlArgs) -> Result<i32> {
    let seed = Url::parse(&args.seed).with_context(|| format!("invalid seed URL '{}'", args.seed))?;

    let index = Arc::new(match &args.index_file {
        Some(path) => MemoryIndex::open(path).await?,
        None => MemoryIndex::new(),
    });

    let fetcher = build_fetcher(&args, &seed).await?;
    let mode = fetcher.mode();
    info!(%seed, ?mode, pages = args.pages, "starting crawl");

    let mut crawler = if args.preseed {
        WikiCrawler::preseeded(seed, index.clone(), fetcher)
            .await
            .context("cannot pre-seed the frontier from the seed page")?
    } else {
        WikiCrawler::new(seed, index.clone(), fetcher)
    };

    let report = run_until_indexed(&mut crawler, args.pages).await?;
    let counts = index.counts(&args.term).await;
    let index_size = index.page_count().await;

    let output = RunOutput {
        seed: crawler.source().as_str(),
        mode,
        report: &report,
        frontier: crawler.queue_size(),
        index_size,
        term: &args.term,
        counts: &counts,
    };
    print_results(&output, args.json)?;

    if report.exhausted {
        Ok(1) // frontier ran dry before enough pages were indexed
    } else {
        Ok(0)
    }
}

async fn build_fetcher(args: &CrawlArgs, seed: &Url) -> Result<Box<dyn FetchStrategy>> {
    let parser = PageParser::new(&args.content_selector)?;

    let fetcher: Box<dyn FetchStrategy> = match &args.replay {
        Some(path) => {
            let base = match &args.replay_base {
                Some(base) => Url::parse(base)
                    .with_context(|| format!("invalid replay base URL '{}'", base))?,
                None => seed.clone(),
            };
            Box::new(ReplayFetcher::from_file(path, base, parser).await?)
        }
        None => Box::new(LiveFetcher::new(parser, Duration::from_secs(args.timeout_secs))?),
    };

    Ok(fetcher)
}

#[derive(Serialize)]
struct RunOutput<'a> {
    seed: &'a str,
    mode: FetchMode,
    #[serde(flatten)]
    report: &'a CrawlReport,
    frontier: usize,
    index_size: usize,
    term: &'a str,
    counts: &'a BTreeMap<String, u32>,
}

fn print_results(output: &RunOutput<'_>, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(output)?);
    } else {
        print_table(output);
    }
    Ok(())
}

fn print_table(output: &RunOutput<'_>) {
    println!("Seed: {}", output.seed);
    println!();
    println!("Indexed {} page(s):", output.report.indexed.len());
    for url in &output.report.indexed {
        println!("   {}", url);
    }
    println!();

    println!("{:<80} {:>8}", format!("URL (term: \"{}\")", output.term), "COUNT");
    println!("{}", "=".repeat(89));
    for (url, count) in output.counts {
        // Truncate URL if too long for display
        let url_display = if url.len() > 77 {
            format!("{}...", &url[..77])
        } else {
            url.clone()
        };
        println!("{:<80} {:>8}", url_display, count);
    }
    println!();

    println!("Summary:");
    println!("   Indexed: {}", output.report.indexed.len());
    println!("   Skipped (already indexed): {}", output.report.skipped);
    println!("   Left in frontier: {}", output.frontier);
    println!("   Pages in index: {}", output.index_size);
    if output.report.exhausted {
        println!("   Frontier exhausted before reaching the page target");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_fatal_message_includes_context() {
        let err = anyhow!("HTTP 503 for https://en.wikipedia.org/wiki/Java")
            .context("cannot pre-seed the frontier from the seed page");

        assert_eq!(
            fatal_message(&err),
            "Error: cannot pre-seed the frontier from the seed page: \
             HTTP 503 for https://en.wikipedia.org/wiki/Java"
        );
    }
}
