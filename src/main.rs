use anyhow::Result;
use clap::Parser;
use proxy_sieve::checker::{CheckerConfig, CheckerPool, EndpointParser, Reporter, RunStats};
use std::path::PathBuf;
use std::time::Duration;

/// A concurrent proxy liveness checker
#[derive(Parser)]
#[command(name = "proxy-sieve")]
#[command(about = "Check which proxies in a candidate list can reach a reference URL")]
struct Cli {
    /// Input file containing candidate proxies, one host:port per line
    input: PathBuf,

    /// Output file for working proxies
    #[arg(short, long, default_value = "proxy_valid.txt")]
    output: PathBuf,

    /// URL to test proxies against
    #[arg(long, default_value = "https://www.google.com")]
    test_url: String,

    /// Timeout per probe in seconds
    #[arg(long, default_value = "10")]
    timeout: u64,

    /// Maximum number of concurrent probes
    #[arg(short = 'n', long, default_value = "50")]
    max_concurrency: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let parse_report = EndpointParser::load_file(&cli.input)?;
    let parsed = parse_report.endpoints.len();
    println!(
        "Loaded {} candidates from {:?} ({} rejected)",
        parsed, cli.input, parse_report.rejected
    );

    let config = CheckerConfig::new()
        .with_reference_url(cli.test_url)
        .with_timeout(Duration::from_secs(cli.timeout))
        .with_max_concurrency(cli.max_concurrency);

    let pool = CheckerPool::with_config(config);
    let outcome = pool.run(parse_report.endpoints).await;

    Reporter::report(&cli.output, &outcome.results)?;

    if !outcome.results.is_empty() {
        println!("\nWorking proxies:");
        for result in &outcome.results {
            println!(
                "  {} ({}ms)",
                result.endpoint,
                result.latency.unwrap_or_default().as_millis()
            );
        }
        println!();
    }

    let stats = RunStats {
        submitted: parsed + parse_report.rejected,
        parsed,
        parse_failures: parse_report.rejected,
        probed: outcome.tally.probed,
        succeeded: outcome.tally.succeeded,
        timeouts: outcome.tally.timeouts,
        connect_errors: outcome.tally.connect_errors,
        bad_status: outcome.tally.bad_status,
        elapsed: outcome.elapsed,
    };
    log::info!("{}", stats);
    println!("{}", stats);
    println!(
        "Saved {} working proxies to {:?}",
        outcome.results.len(),
        cli.output
    );

    Ok(())
}
