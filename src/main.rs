//! phpbb-archiver main entry point
//!
//! This is the command-line interface for the phpBB forum archiver.

use anyhow::Context;
use clap::Parser;
use phpbb_archiver::config::{load_config_with_hash, Config, ForumProfile, SessionConfig};
use phpbb_archiver::crawler::{extract_roster, http_fetcher, Archiver, RosterOptions};
use phpbb_archiver::output::{print_statistics, ArchiveStats};
use phpbb_archiver::storage::FsStorage;
use phpbb_archiver::url::{parse_base, ForumFilter};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// phpbb-archiver: mirror a phpBB forum to disk
///
/// Walks the board's forums, subforums and topics through a fixed proxy and
/// saves every page into a directory tree mirroring the board, or pages
/// through the member roster extracting one field per member.
#[derive(Parser, Debug)]
#[command(name = "phpbb-archiver")]
#[command(version = "1.0.0")]
#[command(about = "Mirror a phpBB forum to disk", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Forum profile to archive (required when the config holds several)
    #[arg(long, value_name = "NAME")]
    forum: Option<String>,

    /// IDs of top-level forums to skip
    #[arg(long, value_name = "ID", num_args = 1..)]
    ignore: Vec<u32>,

    /// Archive only this top-level forum (overrides --ignore)
    #[arg(long, value_name = "ID")]
    only: Option<u32>,

    /// Do not descend into nested subforums
    #[arg(long)]
    single_forum: bool,

    /// Enter the --only forum directly instead of via the landing page
    #[arg(long, requires = "only", conflicts_with_all = ["roster", "dry_run"])]
    direct: bool,

    /// Extract member roster text instead of archiving forums
    #[arg(long, conflicts_with_all = ["direct", "dry_run"])]
    roster: bool,

    /// Append extracted roster text to the configured roster file
    #[arg(long, requires = "roster")]
    store_roster: bool,

    /// Roster page to start from
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    start_page: u32,

    /// Session ID cookie value (overrides the config)
    #[arg(long, value_name = "SESSION_ID")]
    session_id: Option<String>,

    /// User ID cookie value (overrides the config)
    #[arg(long, value_name = "UID")]
    user_id: Option<String>,

    /// Auto-login key cookie value (overrides the config)
    #[arg(long, value_name = "KID")]
    k_id: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be archived without fetching anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (mut config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    apply_session_overrides(&mut config.session, &cli);
    let forum = config.forum(cli.forum.as_deref())?.clone();

    if cli.dry_run {
        handle_dry_run(&config, &forum, &cli);
    } else if cli.roster {
        handle_roster(&config, &forum, &cli).await?;
    } else {
        handle_archive(&config, &forum, &cli).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("phpbb_archiver=info,warn"),
            1 => EnvFilter::new("phpbb_archiver=debug,info"),
            2 => EnvFilter::new("phpbb_archiver=trace,debug"),
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

fn apply_session_overrides(session: &mut SessionConfig, cli: &Cli) {
    if let Some(session_id) = &cli.session_id {
        session.session_id = session_id.clone();
    }
    if let Some(user_id) = &cli.user_id {
        session.user_id = user_id.clone();
    }
    if let Some(k_id) = &cli.k_id {
        session.k_id = k_id.clone();
    }
}

/// Handles the --dry-run mode: shows the effective settings
fn handle_dry_run(config: &Config, forum: &ForumProfile, cli: &Cli) {
    println!("=== phpbb-archiver Dry Run ===\n");

    println!("Forum:");
    println!("  Profile: {}", forum.name);
    println!("  Base URL: {}", forum.base_url);
    println!("  Profile ignores ({}): {:?}", forum.ignore.len(), forum.ignore);
    println!("  Operator ignores: {:?}", cli.ignore);
    match cli.only {
        Some(only) => println!("  Only forum: {}", only),
        None => println!("  Only forum: (all)"),
    }
    println!("  Nested subforums: {}", if cli.single_forum { "skipped" } else { "followed" });

    println!("\nNetwork:");
    println!(
        "  Proxy: {}",
        config.network.proxy.as_deref().unwrap_or("(direct)")
    );
    println!("  Timeout: {}s", config.network.timeout_secs);
    println!("  Retry wait: {}s", config.network.retry_wait_secs);
    match config.network.max_attempts {
        Some(max) => println!("  Max attempts: {}", max),
        None => println!("  Max attempts: unlimited"),
    }

    println!("\nOutput:");
    println!("  Archive directory: {}", config.output.archive_dir);
    println!("  Roster file: {}", config.output.roster_path);

    println!("\n✓ Configuration is valid");
}

/// Handles the roster mode
async fn handle_roster(config: &Config, forum: &ForumProfile, cli: &Cli) -> anyhow::Result<()> {
    let base = parse_base(&forum.base_url)?;
    let fetcher = http_fetcher(config, forum)?;

    let options = RosterOptions {
        start_page: cli.start_page,
        per_page: config.roster.per_page,
        store_path: cli
            .store_roster
            .then(|| PathBuf::from(&config.output.roster_path)),
    };

    tracing::info!("Extracting roster of {} from page {}", forum.name, options.start_page);

    let mut stats = ArchiveStats::new();
    let result = extract_roster(&fetcher, &mut FsStorage::new(), &base, &options, &mut stats).await;

    stats.finish();
    print_statistics(&stats);

    result.context("roster extraction failed")
}

/// Handles the main archive operation
async fn handle_archive(config: &Config, forum: &ForumProfile, cli: &Cli) -> anyhow::Result<()> {
    let base = parse_base(&forum.base_url)?;
    let fetcher = http_fetcher(config, forum)?;

    let filter = ForumFilter::new(
        forum.ignore.iter().copied(),
        cli.ignore.iter().copied(),
        cli.only,
    );

    tracing::info!(
        "Archiving {} into {} (profile ignores: {}, operator ignores: {})",
        forum.name,
        config.output.archive_dir,
        filter.profile_ignores.len(),
        filter.ignores.len()
    );

    let mut archiver = Archiver::new(fetcher, FsStorage::new(), &config.output.archive_dir)
        .with_filter(filter)
        .with_single_forum(cli.single_forum);

    let result = match (cli.direct, cli.only) {
        (true, Some(id)) => {
            archiver
                .archive_direct(&base, id, &config.session.session_id)
                .await
        }
        _ => archiver.archive_forum(&base).await,
    };

    let stats = archiver.finish();
    print_statistics(&stats);

    match result {
        Ok(()) => {
            tracing::info!("Archive completed successfully");
            Ok(())
        }
        Err(e) => {
            tracing::error!("Archive failed: {}", e);
            Err(e).context("archive run failed")
        }
    }
}
