//! # tsforecast
//!
//! Command-line interface for the forecasting service.

mod analyze;
mod forecast;
mod generate;
mod input;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{ensure, Result};
use clap::{ArgAction, Parser, Subcommand};
use server::{logging, ServerConfig};

use generate::Shape;

#[derive(Parser)]
#[command(name = "tsforecast")]
#[command(version, about = "Time series forecasting with automatic model selection", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Address to bind, overrides FORECAST_BIND
        #[arg(long)]
        bind: Option<SocketAddr>,

        /// Concurrent forecast computations, overrides FORECAST_WORKERS
        #[arg(long)]
        workers: Option<usize>,

        /// Request timeout in seconds, overrides FORECAST_TIMEOUT_SECS
        #[arg(long)]
        timeout: Option<u64>,

        /// Access log file, overrides FORECAST_ACCESS_LOG
        #[arg(long)]
        access_log: Option<PathBuf>,
    },

    /// Forecast a series from a file
    Forecast {
        /// Input file (CSV, JSON series, or JSON request payload)
        #[arg(short, long)]
        input: PathBuf,

        /// Number of steps to forecast
        #[arg(long)]
        horizon: Option<usize>,

        /// Model name, or cv / fast
        #[arg(short, long)]
        model: Option<String>,

        /// Column name or index for CSV input
        #[arg(short, long)]
        column: Option<String>,

        /// Score backtest candidates in parallel
        #[arg(long)]
        parallel: bool,

        /// Output file (optional)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Summarise an access log
    AnalyzeLogs {
        /// Access log to read
        #[arg(short, long, default_value = "./logs/access.log")]
        log: PathBuf,

        /// Also write the records as CSV
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Print a synthetic forecast request payload
    Generate {
        #[arg(long, value_enum, default_value = "sin")]
        shape: Shape,

        /// Series length
        #[arg(short, long, default_value = "100")]
        n: usize,

        /// Level offset
        #[arg(short, long, default_value = "1.0")]
        a: f64,

        /// Noise standard deviation
        #[arg(long, default_value = "0.1")]
        std: f64,

        #[arg(long, default_value = "10")]
        horizon: usize,

        #[arg(short, long, default_value = "cv")]
        model: String,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn default_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "tsforecast=warn,forecast_core=warn",
        1 => "tsforecast=info,forecast_core=info",
        _ => "tsforecast=debug,forecast_core=debug",
    }
}

fn serve(
    bind: Option<SocketAddr>,
    workers: Option<usize>,
    timeout: Option<u64>,
    access_log: Option<PathBuf>,
) -> Result<()> {
    let mut config = ServerConfig::from_env()?;
    if let Some(bind) = bind {
        config.bind = bind;
    }
    if let Some(workers) = workers {
        ensure!(workers > 0, "--workers must be at least 1");
        config.workers = workers;
    }
    if let Some(secs) = timeout {
        config.timeout = Duration::from_secs(secs);
    }
    if access_log.is_some() {
        config.access_log = access_log;
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server::run(config))?;
    Ok(())
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            bind,
            workers,
            timeout,
            access_log,
        } => {
            if cli.verbose == 0 {
                logging::init();
            } else {
                logging::init_with(default_filter(cli.verbose));
            }
            serve(bind, workers, timeout, access_log)
        }

        Commands::Forecast {
            input,
            horizon,
            model,
            column,
            parallel,
            output,
        } => {
            logging::init_with(default_filter(cli.verbose));
            let request =
                input::load_request(&input, column.as_deref(), model.as_deref(), horizon)?;
            forecast::run(request, parallel, output.as_deref())
        }

        Commands::AnalyzeLogs { log, csv } => analyze::run(&log, csv.as_deref()),

        Commands::Generate {
            shape,
            n,
            a,
            std,
            horizon,
            model,
            seed,
        } => {
            ensure!(horizon > 0, "--horizon must be at least 1");
            let series = generate::series(shape, n, a, std, &mut generate::rng(seed))?;
            let payload = generate::payload(&model, horizon, &series);
            println!("{}", serde_json::to_string(&payload)?);
            Ok(())
        }
    }
}
