//! Calculator client: issues exactly one calculation and prints the result.
//!
//! Arguments are validated before any connection attempt. Logs go to stderr so
//! stdout carries only the result.

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use calculator_sdk::{
    CalculationArgs, CalculatorError, CalculatorGrpcClient, ErrorKind, GrpcClientConfig, issue,
};

/// Calculator client
#[derive(Parser)]
#[command(name = "calculator-client")]
#[command(about = "Issue one calculation against the calculator gRPC service")]
#[command(version)]
struct Cli {
    /// Method to execute (add, subtract, multiply, divide)
    #[arg(short, long)]
    method: Option<String>,

    /// First operand
    #[arg(short = 'a', allow_negative_numbers = true)]
    a: Option<i32>,

    /// Second operand
    #[arg(short = 'b', allow_negative_numbers = true)]
    b: Option<i32>,

    /// Calculator service endpoint
    #[arg(long, default_value = "http://localhost:50051")]
    endpoint: String,

    /// Per-call deadline in milliseconds
    #[arg(long, default_value_t = 30_000)]
    timeout_ms: u64,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
}

fn calculation_failed(err: CalculatorError) -> anyhow::Error {
    let context = match err.kind() {
        ErrorKind::InvalidInput => "error parsing arguments",
        ErrorKind::InvalidArgument | ErrorKind::RemoteFailure => "error calculating",
    };
    anyhow::Error::new(err).context(context)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let args = CalculationArgs::new(cli.method, cli.a, cli.b);
    args.clone().into_request().map_err(calculation_failed)?;

    let cfg = GrpcClientConfig::new("calculator")
        .with_rpc_timeout(Duration::from_millis(cli.timeout_ms));
    tracing::debug!(endpoint = %cli.endpoint, "using calculator endpoint");
    let client = CalculatorGrpcClient::connect_lazy(cli.endpoint, &cfg)
        .map_err(calculation_failed)?;

    let result = issue(&client, args).await.map_err(calculation_failed)?;
    println!("{result}");
    Ok(())
}
