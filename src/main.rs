//! Ruster Guard CLI
//!
//! Scan one token and print the traffic-light verdict.
//!
//! Usage:
//!   ruster_guard <tokenAddress> [eth|bsc] [beginner|pro]
//!
//! Environment: see `ScanConfig::from_env` (RPC URLs, honeypot API, timeouts,
//! trusted owners). RUST_LOG controls log verbosity (default: warn).

use eyre::Result;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use ruster_guard::utils::constants::{APP_NAME, APP_VERSION};
use ruster_guard::{explain, AudienceMode, Chain, ScanConfig, TokenScanner};

/// Exit code for bad input
const EXIT_INPUT_ERROR: u8 = 2;

fn usage() {
    eprintln!("{} v{}", APP_NAME, APP_VERSION);
    eprintln!("Usage: ruster_guard <tokenAddress> [eth|bsc] [beginner|pro]");
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(token) = args.first() else {
        usage();
        return Ok(ExitCode::from(EXIT_INPUT_ERROR));
    };

    let chain = match args.get(1).map(|s| s.parse::<Chain>()).transpose() {
        Ok(chain) => chain.unwrap_or(Chain::Eth),
        Err(e) => {
            eprintln!("❌ {}", e);
            return Ok(ExitCode::from(EXIT_INPUT_ERROR));
        }
    };

    let mode = match args.get(2).map(|s| s.parse::<AudienceMode>()).transpose() {
        Ok(mode) => mode.unwrap_or(AudienceMode::Beginner),
        Err(e) => {
            eprintln!("❌ {}", e);
            return Ok(ExitCode::from(EXIT_INPUT_ERROR));
        }
    };

    let scanner = TokenScanner::from_config(ScanConfig::from_env())?;

    let result = match scanner.scan_on(token, chain).await {
        Ok(result) => result,
        Err(e) if e.is_input_error() => {
            eprintln!("❌ {}", e);
            return Ok(ExitCode::from(EXIT_INPUT_ERROR));
        }
        Err(e) => return Err(e.into()),
    };

    if mode == AudienceMode::Pro {
        println!("{}", result.summary());
        return Ok(ExitCode::SUCCESS);
    }

    println!(
        "\n{} {} on {}: {}\n",
        result.overall.emoji(),
        token.trim(),
        chain,
        result.overall.as_str().to_uppercase()
    );
    for check in &result.checks {
        println!("{} {}", check.level.emoji(), check.label);
        for line in explain(check, mode).lines() {
            println!("   {}", line);
        }
        println!();
    }

    Ok(ExitCode::SUCCESS)
}
