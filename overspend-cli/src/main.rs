use anyhow::{Context, Result, bail};
use clap::Parser;
use overspend_core::{Analysis, TransactionAnalyzer};
use overspend_http::HttpPageFetcher;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod config;
mod input;

use input::{Request, parse_user_id, read_request, render_ids};

/// Reads userId, txnType and month-year (one per line) from stdin unless all
/// three are given as flags, and prints the ids of transactions above the
/// user's average monthly debit.
#[derive(Parser, Debug)]
#[command(name = "overspend", version, about = "Find transactions above the monthly debit average")]
struct Cli {
    /// User whose transactions are searched
    #[arg(long)]
    user: Option<String>,

    /// "credit" or "debit" (any case)
    #[arg(long)]
    txn_type: Option<String>,

    /// Month and year as M-YYYY, e.g. 3-2018
    #[arg(long)]
    month: Option<String>,

    /// TOML config file with [http] and [labels] sections
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the transaction-search endpoint
    #[arg(long)]
    endpoint: Option<String>,

    /// Print debit statistics to stderr
    #[arg(long)]
    explain: bool,

    /// Log filter (overrides RUST_LOG), e.g. "debug"
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    let mut cfg = config::load_config(cli.config.as_deref())?;
    if let Some(endpoint) = &cli.endpoint {
        cfg.http.endpoint = endpoint.clone();
    }
    tracing::debug!(endpoint = %cfg.http.endpoint, timeout_secs = ?cfg.http.timeout_secs, "configuration loaded");

    let request = match (&cli.user, &cli.txn_type, &cli.month) {
        (Some(user), Some(txn_type), Some(month)) => Request {
            user_id: parse_user_id(user)?,
            txn_type: txn_type.clone(),
            month_year: month.clone(),
        },
        (None, None, None) => read_request(&mut io::stdin().lock())?,
        _ => bail!("--user, --txn-type and --month must be given together (or none, to read stdin)"),
    };

    let fetcher = HttpPageFetcher::new(cfg.http_config()).context("set up http client")?;
    let analyzer = TransactionAnalyzer::new(fetcher, cfg.analyzer_config());

    let analysis = analyzer
        .analyze_detailed(request.user_id, &request.txn_type, &request.month_year)
        .map_err(|e| analysis_failure(e, request.user_id))?;

    if cli.explain {
        print_explanation(&analysis);
    }

    println!("{}", render_ids(&analysis.ids));
    Ok(())
}

/// Tag the error with its kind code so scripts can tell bad input from an
/// unreachable service.
fn analysis_failure(err: overspend_core::Error, user_id: i64) -> anyhow::Error {
    let kind = err.kind();
    tracing::error!(%kind, user_id, "analysis failed");
    anyhow::Error::new(err).context(format!("[{kind}] analyzing transactions for user {user_id}"))
}

fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(l) => EnvFilter::new(l),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn print_explanation(a: &Analysis) {
    eprintln!("period:        {}", a.period);
    eprintln!("type:          {:?}", a.txn_type);
    eprintln!("pages fetched: {}", a.pages_fetched);
    eprintln!("debits:        {} (total ${:.2})", a.debit_count, a.debit_sum);
    if a.average.is_finite() {
        eprintln!("average debit: ${:.2}", a.average);
    } else {
        eprintln!("average debit: n/a (no debits this month)");
    }
    eprintln!("candidates:    {}", a.candidates);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_failure_carries_kind_code() {
        let err = analysis_failure(overspend_core::Error::validation("invalid txnType: wire"), 3);
        assert_eq!(err.to_string(), "[VALIDATION_ERROR] analyzing transactions for user 3");
        assert_eq!(err.root_cause().to_string(), "validation error: invalid txnType: wire");

        let err = analysis_failure(overspend_core::Error::network("GET http://x: 503"), 3);
        assert!(err.to_string().starts_with("[NETWORK_ERROR]"));
    }
}
