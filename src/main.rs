//! Sports-betting arbitrage finder entry point.

use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use rust_decimal::Decimal;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use betarbit::arbitrage::scan_matches;
use betarbit::config::Config;
use betarbit::error::{AppError, ConfigurationError};
use betarbit::metrics;
use betarbit::odds::{OddsApiClient, OddsSource, Region};
use betarbit::report::{Reporter, RunArguments};

/// Sports-betting arbitrage finder.
#[derive(Parser, Debug)]
#[command(name = "betarbit")]
#[command(about = "Find guaranteed-profit bets across bookmakers' head-to-head odds")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Read odds from a local fixture instead of the API.
    #[arg(long, global = true)]
    demo: bool,

    /// Fixture path used with --demo.
    #[arg(long, global = true)]
    demo_file: Option<PathBuf>,

    /// Total stake to split across a match's outcomes.
    #[arg(long, global = true)]
    bet: Option<Decimal>,

    /// Sport key ("upcoming" for every sport).
    #[arg(long, global = true)]
    sport: Option<String>,

    /// Bookmaker region: uk, us, eu or au.
    #[arg(long, global = true)]
    region: Option<Region>,

    /// Enable verbose output and debug logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit one JSON object per match instead of text.
    #[arg(long, global = true)]
    json: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,

    /// Print a Prometheus metrics snapshot after the scan.
    #[arg(long, global = true)]
    print_metrics: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scan matches for arbitrage (default).
    Scan,

    /// Check configuration validity.
    CheckConfig,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize logging; stdout is reserved for the report
    let filter = if args.verbose {
        EnvFilter::new("betarbit=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();

    let color = !args.no_color && io::stdout().is_terminal();

    let result = match args.command {
        Some(Command::CheckConfig) => cmd_check_config(&args),
        Some(Command::Scan) | None => cmd_scan(&args, color).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let message = format!("!! {:#}", e);
            if color {
                eprintln!("{}", message.bold().red());
            } else {
                eprintln!("{}", message);
            }
            ExitCode::FAILURE
        }
    }
}

/// Load environment config and apply CLI overrides.
fn load_config(args: &Args) -> anyhow::Result<Config> {
    let mut config = Config::load()?;

    if args.demo {
        config.demo = true;
    }
    if let Some(path) = &args.demo_file {
        config.demo_file = path.clone();
    }
    if let Some(bet) = args.bet {
        config.bet = bet;
    }
    if let Some(sport) = &args.sport {
        config.sport = sport.clone();
    }
    if let Some(region) = args.region {
        config.region = region;
    }

    config.validate()?;
    Ok(config)
}

/// Check configuration validity.
fn cmd_check_config(args: &Args) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("BETARBIT - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Loading configuration... ");
    let config = match load_config(args) {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {:#}", e);
            return Err(anyhow::anyhow!("Configuration check failed"));
        }
    };

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Mode: {}", if config.demo { "DEMO" } else { "LIVE" });
    if config.demo {
        println!("  Demo File: {}", config.demo_file.display());
    } else {
        println!("  API URL: {}", config.odds_api_url);
        println!("  API Key: present");
        println!("  Timeout: {}ms", config.http_timeout_ms);
    }
    println!("  Bet: ${}", config.bet);
    println!("  Sport: {}", config.sport);
    println!("  Region: {}", config.region);
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Fetch odds, scan every match and print the results.
async fn cmd_scan(args: &Args, color: bool) -> anyhow::Result<()> {
    let prometheus = if args.print_metrics {
        Some(metrics::install_prometheus()?)
    } else {
        None
    };
    metrics::init_metrics();

    let mut reporter = Reporter::new(io::stdout().lock(), color, args.json, args.verbose);
    reporter.header(env!("CARGO_PKG_VERSION"))?;

    let config = load_config(args)?;

    reporter.arguments(&RunArguments {
        demo: config.demo,
        demo_file: &config.demo_file,
        bet: config.bet,
        sport: &config.sport,
        region: config.region,
    })?;

    let source = if config.demo {
        OddsSource::Demo(config.demo_file.clone())
    } else {
        let api_key = config.api_key().ok_or(ConfigurationError::MissingApiKey)?;
        OddsSource::Live {
            client: OddsApiClient::new(&config, api_key)?,
            sport: config.sport.clone(),
            region: config.region,
        }
    };

    info!(source = %source.describe(), bet = %config.bet, "Collecting odds");
    let matches = source.fetch().await.map_err(AppError::from)?;
    info!(matches = matches.len(), "Odds collected");

    let summary = scan_matches(&matches, config.bet)?;
    reporter.scan(&summary)?;

    if let Some(handle) = prometheus {
        eprintln!("{}", handle.render());
    }

    Ok(())
}
