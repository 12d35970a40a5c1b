//! Site-Intel main entry point
//!
//! This is the command-line interface for the Site-Intel website intelligence engine.

use clap::{Parser, Subcommand};
use serde::Serialize;
use site_intel::config::{load_config_with_hash, validate, Config};
use site_intel::output::write_markdown_report;
use site_intel::storage::{open_store, SiteModelStore};
use site_intel::{
    analyze_intent, crawl_website, get_navigation_suggestions, IntentResult, NavigationSuggestion,
};
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Site-Intel: a website intelligence engine
///
/// Site-Intel crawls a website, analyzes every page it reaches, stores the
/// resulting site model and answers visitor questions against it.
#[derive(Parser, Debug)]
#[command(name = "site-intel")]
#[command(version = "1.0.0")]
#[command(about = "Crawl a website and answer visitor questions about it", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults are used when omitted)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl a site and store its model
    Crawl {
        /// Domain or origin URL to crawl
        domain: String,

        /// Id to store the model under (defaults to the domain)
        #[arg(long)]
        site_id: Option<String>,

        /// Override the configured page cap
        #[arg(long)]
        max_pages: Option<u32>,

        /// Override the configured depth limit
        #[arg(long)]
        max_depth: Option<u32>,
    },

    /// Analyze a visitor query against a stored site
    Query {
        site_id: String,
        query: String,

        /// Page the visitor is currently on
        #[arg(long, default_value = "")]
        current_url: String,
    },

    /// Write the markdown ROI report for a stored site
    Report {
        site_id: String,

        /// Report path (defaults to the configured report path)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List stored sites
    Sites,
}

/// JSON answer printed by `query`
#[derive(Serialize)]
struct QueryAnswer {
    intent: IntentResult,
    suggestions: Vec<NavigationSuggestion>,
}

#[tokio::main]
async fn main() -> CliResult<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = load(cli.config.as_deref())?;

    match cli.command {
        Command::Crawl {
            domain,
            site_id,
            max_pages,
            max_depth,
        } => handle_crawl(config, &domain, site_id, max_pages, max_depth).await,
        Command::Query {
            site_id,
            query,
            current_url,
        } => handle_query(&config, &site_id, &query, &current_url),
        Command::Report { site_id, output } => handle_report(&config, &site_id, output),
        Command::Sites => handle_sites(&config),
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("site_intel=info,warn"),
            1 => EnvFilter::new("site_intel=debug,info"),
            2 => EnvFilter::new("site_intel=trace,debug"),
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

/// Loads the configuration file, or the defaults when none is given
fn load(path: Option<&Path>) -> CliResult<Config> {
    let Some(path) = path else {
        tracing::debug!("No configuration file given, using defaults");
        return Ok(Config::default());
    };

    tracing::info!("Loading configuration from: {}", path.display());
    match load_config_with_hash(path) {
        Ok((config, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            Ok(config)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            Err(e.into())
        }
    }
}

/// Handles `crawl`: runs the crawl and stores the model
async fn handle_crawl(
    mut config: Config,
    domain: &str,
    site_id: Option<String>,
    max_pages: Option<u32>,
    max_depth: Option<u32>,
) -> CliResult<()> {
    if let Some(max_pages) = max_pages {
        config.crawler.max_pages = max_pages;
    }
    if let Some(max_depth) = max_depth {
        config.crawler.max_depth = max_depth;
    }
    validate(&config)?;

    let mut store = open_store(Path::new(&config.output.database_path))?;

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, stopping crawl");
            on_signal.cancel();
        }
    });

    let model = match crawl_website(&config, domain, cancel).await {
        Ok(model) => model,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    let site_id = site_id.unwrap_or_else(|| model.domain.clone());
    if let Err(e) = store.store(&site_id, &model) {
        tracing::error!("Failed to store site model {}: {}", site_id, e);
        return Err(e.into());
    }

    let roi = &model.roi_metrics;
    println!("=== Crawl of {} ===\n", model.domain);
    println!("  Site id: {}", site_id);
    println!("  Pages analyzed: {}", model.total_pages);
    println!("  Average SEO score: {:.1}", roi.avg_seo_score);
    println!(
        "  Average accessibility score: {:.1}",
        roi.avg_accessibility_score
    );
    println!("  Conversion funnels: {}", model.conversion_funnels.len());
    println!("  Intent coverage: {} / 6", roi.intent_coverage_score);

    Ok(())
}

/// Handles `query`: prints the intent analysis and suggestions as JSON
fn handle_query(config: &Config, site_id: &str, query: &str, current_url: &str) -> CliResult<()> {
    let store = open_store(Path::new(&config.output.database_path))?;
    let model = store
        .load(site_id)?
        .ok_or_else(|| format!("no stored site model for '{}'", site_id))?;

    let answer = QueryAnswer {
        intent: analyze_intent(query, current_url, &model),
        suggestions: get_navigation_suggestions(query, current_url, &model),
    };

    println!("{}", serde_json::to_string_pretty(&answer)?);
    Ok(())
}

/// Handles `report`: writes the markdown ROI report
fn handle_report(config: &Config, site_id: &str, output: Option<PathBuf>) -> CliResult<()> {
    let store = open_store(Path::new(&config.output.database_path))?;
    let model = store
        .load(site_id)?
        .ok_or_else(|| format!("no stored site model for '{}'", site_id))?;

    let path = output.unwrap_or_else(|| PathBuf::from(&config.output.report_path));
    tracing::info!("Generating markdown report...");
    write_markdown_report(&model, &path)?;

    println!("✓ Report written to: {}", path.display());
    Ok(())
}

/// Handles `sites`: lists stored site models
fn handle_sites(config: &Config) -> CliResult<()> {
    let store = open_store(Path::new(&config.output.database_path))?;
    let sites = store.list_sites()?;

    if sites.is_empty() {
        println!("No stored sites in {}", config.output.database_path);
        return Ok(());
    }

    println!("{:<30} {:<30} {:>6}  LAST CRAWL", "SITE ID", "DOMAIN", "PAGES");
    for site in sites {
        println!(
            "{:<30} {:<30} {:>6}  {}",
            site.site_id,
            site.domain,
            site.total_pages,
            site.last_crawl.to_rfc3339()
        );
    }

    Ok(())
}
