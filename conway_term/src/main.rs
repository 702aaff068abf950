// main.rs - Command line entry point

use std::io::{self, stdout};
use std::process::ExitCode;

use clap::Parser;
use conway_term::{
    config::{DEFAULT_INTERVAL, DEFAULT_LENGTH, DEFAULT_RULE, DEFAULT_WIDTH},
    ConfigError, Driver, EdgePolicy, Renderer, Settings,
};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Life-like cellular automaton in the terminal
#[derive(Parser, Debug)]
#[command(name = "conway_term")]
#[command(version)]
struct Args {
    /// Grid column count (1 to 1000)
    #[arg(short, long, default_value_t = DEFAULT_LENGTH, allow_negative_numbers = true)]
    length: i64,

    /// Grid row count (1 to 1000)
    #[arg(short, long, default_value_t = DEFAULT_WIDTH, allow_negative_numbers = true)]
    width: i64,

    /// Milliseconds between generations
    #[arg(short, long, default_value_t = DEFAULT_INTERVAL, allow_negative_numbers = true)]
    interval: i64,

    /// Rule in the form b<nums>/s<nums>, e.g. b3678/s34678 for Day & Night
    #[arg(long, default_value = DEFAULT_RULE)]
    rule: String,

    /// Edge handling: toroidal (wrap around) or bounded (frozen border)
    #[arg(long, default_value_t = EdgePolicy::Toroidal)]
    edges: EdgePolicy,

    /// Seed for the initial random fill
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many generations instead of running forever
    #[arg(long)]
    generations: Option<u64>,

    /// Log level (trace, debug, info, warn, error); logs go to stderr
    #[arg(long, default_value = "warn")]
    log_level: String,
}

impl From<Args> for Settings {
    fn from(args: Args) -> Self {
        Self {
            length:      args.length,
            width:       args.width,
            interval_ms: args.interval,
            rule:        args.rule,
            edges:       args.edges,
            seed:        args.seed,
            generations: args.generations,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();

    let config = match Settings::from(args).validate() {
        Ok(config) => config,
        Err(ConfigError::Rule(err)) => {
            println!("error: {err}");
            return ExitCode::FAILURE;
        },
        Err(err) => {
            println!("{err}");
            return ExitCode::FAILURE;
        },
    };

    let driver = Driver::with_renderer(config, Renderer::new(stdout()));

    // Ctrl-C ends the loop; the driver finishes the in-flight frame and
    // restores the terminal before returning.
    let shutdown = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!(%err, "cannot listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    match driver.run_until(shutdown).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "simulation aborted");
            ExitCode::FAILURE
        },
    }
}
