//! Listing-Harvester main entry point
//!
//! This is the command-line interface for the Listing-Harvester catalog crawler.

use anyhow::{bail, Context};
use clap::Parser;
use listing_harvester::config::{load_config_with_hash, Config};
use listing_harvester::crawler::{crawl, CancelFlag};
use listing_harvester::output::{load_records, print_summary, write_records, Summary};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Listing-Harvester: a paginated catalog crawler
///
/// Listing-Harvester walks the numbered pages of a product catalog, extracts
/// one record per listing and writes them as CSV or XLSX.
#[derive(Parser, Debug)]
#[command(name = "listing-harvester")]
#[command(version)]
#[command(about = "A paginated catalog crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Summarize the previously written output file and exit
    #[arg(long, conflicts_with = "dry_run")]
    stats: bool,

    /// Print the catalog summary after a crawl
    #[arg(long)]
    summary: bool,

    /// Write the records collected so far if the crawl is interrupted
    #[arg(long)]
    keep_partial: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config, &config_hash);
    } else if cli.stats {
        handle_stats(&config)?;
    } else {
        handle_crawl(&config, cli.summary, cli.keep_partial).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("listing_harvester=info,warn"),
            1 => EnvFilter::new("listing_harvester=debug,info"),
            2 => EnvFilter::new("listing_harvester=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &Config, config_hash: &str) {
    println!("=== Listing-Harvester Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Base URL: {}", config.crawler.base_url);
    match config.crawler.max_pages {
        Some(limit) => println!("  Page ceiling: {}", limit),
        None => println!("  Page ceiling: none"),
    }
    println!("  Request timeout: {}s", config.crawler.request_timeout_secs);
    println!("  Extraction policy: {:?}", config.crawler.extraction_policy);

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.crawler_name);
    println!("  Version: {}", config.user_agent.crawler_version);
    println!("  Contact URL: {}", config.user_agent.contact_url);
    println!("  Contact Email: {}", config.user_agent.contact_email);

    println!("\nSelectors:");
    println!("  Listing: {}", config.selectors.listing);
    println!("  Image: {}", config.selectors.image);
    println!("  Title: {}", config.selectors.title);
    println!("  Description: {}", config.selectors.description);
    println!("  Price: {}", config.selectors.price);
    println!("  Review count: {}", config.selectors.review_count);

    println!("\nOutput:");
    println!("  Path: {}", config.output.path);

    println!("\n✓ Configuration is valid (hash: {})", config_hash);
    println!(
        "✓ Would start crawling at {}?page=1",
        config.crawler.base_url
    );
}

/// Handles the --stats mode: summarizes the existing output file
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    let path = Path::new(&config.output.path);
    println!("Data: {}\n", path.display());

    let records = load_records(path)?;
    print_summary(&Summary::from_records(&records, config.output.summary_top_n));

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config, summary: bool, keep_partial: bool) -> anyhow::Result<()> {
    let cancel = CancelFlag::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, stopping after the current page");
            on_signal.cancel();
        }
    });

    let report = match crawl(config, cancel).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    if !report.is_complete() && !keep_partial {
        bail!(
            "crawl interrupted after {} pages; {} records discarded (use --keep-partial to write them)",
            report.pages_fetched,
            report.records.len()
        );
    }

    write_records(&report.records, Path::new(&config.output.path))?;

    if !report.skipped.is_empty() {
        tracing::warn!("{} listings were skipped", report.skipped.len());
    }
    tracing::info!(
        "Crawl completed: {} records in {}s",
        report.records.len(),
        report.duration().num_seconds()
    );

    if summary {
        print_summary(&Summary::from_records(
            &report.records,
            config.output.summary_top_n,
        ));
    }

    Ok(())
}
