//! Bookscout main entry point
//!
//! This is the command-line interface for the bookscout catalog search
//! engine.

use anyhow::Result;
use bookscout::config::load_config_with_hash;
use bookscout::engine::SearchEngine;
use bookscout::output::print_matches;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Bookscout: a hybrid catalog search engine
///
/// Bookscout crawls an online catalog category by category, scores item
/// names against a query lexically or in embedding space, and returns
/// ranked matches from a TTL-cached snapshot.
#[derive(Parser, Debug)]
#[command(name = "bookscout")]
#[command(version = "1.0.0")]
#[command(about = "A hybrid catalog search engine", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Query to search for; omit with --serve to run the HTTP API
    #[arg(value_name = "QUERY")]
    query: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Stop after each category's first listing page
    #[arg(long)]
    first_page_only: bool,

    /// Skip availability and rating extraction
    #[arg(long)]
    plain: bool,

    /// Run the HTTP search API instead of a one-shot query
    #[arg(long, conflicts_with = "query")]
    serve: bool,

    /// Validate config and show the effective search setup without crawling
    #[arg(long, conflicts_with_all = ["serve", "query"])]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, _config_hash) = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    let engine = SearchEngine::new(config)?;

    if cli.serve {
        handle_serve(engine).await?;
    } else if let Some(query) = cli.query.as_deref() {
        handle_search(&engine, query, !cli.plain, !cli.first_page_only).await?;
    } else {
        anyhow::bail!("Provide a query, or pass --serve to run the HTTP API");
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("bookscout=info,warn"),
            1 => EnvFilter::new("bookscout=debug,info"),
            2 => EnvFilter::new("bookscout=trace,debug"),
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

/// Handles the --dry-run mode: validates config and shows the effective setup
fn handle_dry_run(config: &bookscout::config::Config) {
    println!("=== Bookscout Dry Run ===\n");

    println!("Catalog:");
    println!("  Root URL: {}", config.catalog.root_url);

    println!("\nSearch:");
    println!("  Mode: {:?}", config.search.mode);
    println!("  Top K: {}", config.search.top_k);
    println!("  Similarity threshold: {}", config.search.threshold());
    println!(
        "  Match absolute similarity: {}",
        config.search.match_absolute_similarity
    );

    println!("\nCache:");
    println!("  Snapshot TTL: {}s", config.cache.ttl_seconds);

    println!("\nEmbedding:");
    println!(
        "  Model: {}",
        config.embedding.model_path.as_deref().unwrap_or("(none)")
    );
    println!(
        "  Name vectors: {}",
        config
            .embedding
            .name_vectors_path
            .as_deref()
            .unwrap_or("(none)")
    );
    println!(
        "  Remove stop words: {}",
        config.embedding.remove_stop_words
    );

    println!("\nServer:");
    println!("  Bind address: {}", config.server.bind_addr);

    println!("\n✓ Configuration is valid");
}

/// Handles a one-shot query: search and print the match table
async fn handle_search(
    engine: &SearchEngine,
    query: &str,
    extended_info: bool,
    search_all_pages: bool,
) -> Result<()> {
    match engine.search(query, extended_info, search_all_pages).await {
        Ok(matches) => {
            print_matches(query, &matches);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Search failed: {}", e);
            Err(e.into())
        }
    }
}

/// Handles --serve: runs the HTTP search API until stopped
async fn handle_serve(engine: SearchEngine) -> Result<()> {
    let bind_addr = engine.config().server.bind_addr.clone();
    bookscout::server::serve(Arc::new(engine), &bind_addr).await?;
    Ok(())
}
