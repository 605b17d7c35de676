//! Email-Harvest main entry point
//!
//! This is the command-line interface for the Email-Harvest crawler.

use anyhow::Context;
use clap::{CommandFactory, Parser};
use email_harvest::config::{load_config_with_hash, validate, Config};
use email_harvest::crawler::crawl;
use email_harvest::output::ConsolePresenter;
use email_harvest::url::Domain;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Email-Harvest: find the email addresses published under a domain
///
/// Crawls every page reachable from DOMAIN through links that stay on
/// DOMAIN and prints each email address the first time it is found.
#[derive(Parser, Debug)]
#[command(name = "email-harvest")]
#[command(version)]
#[command(about = "Find email addresses published under a domain", long_about = None)]
struct Cli {
    /// Domain to crawl (e.g. example.com)
    #[arg(value_name = "DOMAIN")]
    domain: String,

    /// Also follow links to subdomains of DOMAIN
    #[arg(short = 's', long = "subdomains")]
    subdomains: bool,

    /// Path to an optional TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum number of fetches in flight (overrides the config file)
    #[arg(short = 'c', long, value_name = "N")]
    concurrency: Option<u32>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error log output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Extra positional arguments, accepted and ignored
    #[arg(hide = true)]
    ignored: Vec<String>,
}

impl Cli {
    /// Parses arguments, dropping flags the CLI does not recognize
    ///
    /// Known flags keep working wherever they appear on the command line.
    /// Returns the parsed CLI together with the dropped flags.
    fn parse_lenient<I, T>(args: I) -> Result<(Self, Vec<String>), clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let (known, dropped) = split_unknown_flags(args.into_iter().map(Into::into));
        Ok((Self::try_parse_from(known)?, dropped))
    }
}

/// Separates flags unknown to [`Cli`] from everything else
///
/// The first argument (the program name), positionals, values of known
/// options and everything after `--` are always kept.
fn split_unknown_flags(mut args: impl Iterator<Item = String>) -> (Vec<String>, Vec<String>) {
    let command = Cli::command();
    let long_takes_value = |name: &str| -> Option<bool> {
        if name == "help" || name == "version" {
            return Some(false);
        }
        command
            .get_arguments()
            .find(|a| a.get_long() == Some(name))
            .map(|a| a.get_action().takes_values())
    };
    let short_takes_value = |c: char| -> Option<bool> {
        if c == 'h' || c == 'V' {
            return Some(false);
        }
        command
            .get_arguments()
            .find(|a| a.get_short() == Some(c))
            .map(|a| a.get_action().takes_values())
    };

    let mut known = Vec::new();
    let mut dropped = Vec::new();
    let mut value_expected = false;
    let mut passthrough = false;

    if let Some(program) = args.next() {
        known.push(program);
    }

    for arg in args {
        if passthrough || value_expected || arg == "-" || !arg.starts_with('-') {
            value_expected = false;
            known.push(arg);
            continue;
        }
        if arg == "--" {
            passthrough = true;
            known.push(arg);
            continue;
        }

        let recognized = if let Some(long) = arg.strip_prefix("--") {
            let (name, inline_value) = match long.split_once('=') {
                Some((name, _)) => (name, true),
                None => (long, false),
            };
            long_takes_value(name).map(|takes| takes && !inline_value)
        } else {
            // Short cluster such as -vv, -sv or -c4
            let mut expects = Some(false);
            for (i, c) in arg.char_indices().skip(1) {
                match short_takes_value(c) {
                    Some(true) => {
                        expects = Some(i + c.len_utf8() == arg.len());
                        break;
                    }
                    Some(false) => {}
                    None => {
                        expects = None;
                        break;
                    }
                }
            }
            expects
        };

        match recognized {
            Some(takes_value) => {
                value_expected = takes_value;
                known.push(arg);
            }
            None => dropped.push(arg),
        }
    }

    (known, dropped)
}

#[tokio::main]
async fn main() -> ExitCode {
    let (cli, dropped) = match Cli::parse_lenient(std::env::args()) {
        Ok(parsed) => parsed,
        Err(e) => e.exit(),
    };

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    if !dropped.is_empty() {
        tracing::debug!("Ignoring unrecognized flags: {:?}", dropped);
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr; stdout carries only the crawl results.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("email_harvest=warn,warn"),
            1 => EnvFilter::new("email_harvest=info,warn"),
            2 => EnvFilter::new("email_harvest=debug,info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads configuration, applies CLI overrides and validates the result
fn resolve_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(concurrency) = cli.concurrency {
        config.crawler.concurrency = concurrency;
    }
    validate(&config).context("Invalid configuration")?;

    Ok(config)
}

/// Handles the crawl operation
///
/// Finding no emails is a normal outcome and exits successfully.
async fn run(cli: Cli) -> anyhow::Result<()> {
    if !cli.ignored.is_empty() {
        tracing::debug!("Ignoring extra arguments: {:?}", cli.ignored);
    }

    let domain = Domain::parse(&cli.domain).context("Invalid domain argument")?;
    let config = resolve_config(&cli)?;

    let mut presenter = ConsolePresenter::stdout();
    presenter.announce(&cli.domain)?;

    let report = crawl(domain, cli.subdomains, &config, &mut presenter)
        .await
        .context("Crawl could not start")?;

    tracing::info!(
        "Crawl completed: {} emails from {} pages",
        report.emails.len(),
        report.stats.pages_visited
    );

    Ok(())
}
