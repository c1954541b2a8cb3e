//! tessdata-discovery CLI
//!
//! Prints where Tesseract language data lives on this machine.
//!
//! # Exit codes
//!
//! - 0: at least one verified or likely data directory was found
//! - 1: nothing usable was found
//! - 2: invalid options

use anyhow::Context;
use clap::Parser;
use std::process::ExitCode;
use std::time::Duration;
use tessdata_discovery::{
    render_text, DiscoverOptions, DiscoveryEngine, DiscoveryError, DiscoveryReport, OsFamily,
};
use tracing_subscriber::{fmt, EnvFilter};

/// Locate Tesseract OCR language-data directories
#[derive(Parser)]
#[command(name = "tessdata-discovery")]
#[command(version)]
#[command(about = "Locate Tesseract OCR language-data (tessdata) directories")]
struct Cli {
    /// Search as if on this OS family (windows, linux, macos)
    #[arg(long, value_name = "FAMILY")]
    os: Option<String>,

    /// Per-strategy timeout in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 5000)]
    timeout: u64,

    /// Run only these strategies (comma separated)
    #[arg(long, value_name = "ID,...", value_delimiter = ',')]
    only: Option<Vec<String>>,

    /// Print the report as JSON
    #[arg(long, conflicts_with = "primary")]
    json: bool,

    /// Print only the best candidate path
    #[arg(long)]
    primary: bool,

    /// List registered strategies and exit
    #[arg(long)]
    list_strategies: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn options(&self) -> DiscoverOptions {
        DiscoverOptions {
            os_override: self.os.as_deref().map(OsFamily::parse),
            strategy_allowlist: self.only.clone(),
            timeout_per_strategy: Duration::from_millis(self.timeout),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli).await {
        Ok(code) => code,
        Err(e) => {
            if let Some(config) = e.downcast_ref::<DiscoveryError>() {
                eprintln!("error: {config}");
                eprintln!("fix: {}", config.fix_suggestion());
                return ExitCode::from(2);
            }
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    let engine = DiscoveryEngine::system();

    if cli.list_strategies {
        for spec in engine.strategies() {
            let families: Vec<String> = spec.families.iter().map(|f| f.to_string()).collect();
            println!(
                "{:<18} priority {:>3}  {}",
                spec.id,
                spec.priority,
                families.join(", ")
            );
        }
        return Ok(ExitCode::SUCCESS);
    }

    let report = engine.discover(&cli.options()).await?;

    if cli.json {
        let json = serde_json::to_string_pretty(&report).context("failed to serialize report")?;
        println!("{json}");
    } else if cli.primary {
        match primary_line(&report) {
            Ok(path) => println!("{path}"),
            Err(summary) => eprintln!("{summary}"),
        }
    } else {
        print!("{}", render_text(&report));
    }

    Ok(if report.has_usable() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// The `--primary` output: the best path, or a summary for stderr.
fn primary_line(report: &DiscoveryReport) -> Result<String, String> {
    match report.primary_path() {
        Some(path) => Ok(path.display().to_string()),
        None => Err(format!(
            "no tessdata directory found (os family: {}, strategies run: {})",
            report.os_family(),
            report.strategies_run().len()
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["tessdata-discovery"]);
        let opts = cli.options();
        assert_eq!(opts.timeout_per_strategy, Duration::from_millis(5000));
        assert!(opts.os_override.is_none());
        assert!(opts.strategy_allowlist.is_none());
    }

    #[test]
    fn test_cli_only_is_comma_separated() {
        let cli = Cli::parse_from(["tessdata-discovery", "--only", "environment,well-known"]);
        assert_eq!(
            cli.options().strategy_allowlist,
            Some(vec!["environment".to_string(), "well-known".to_string()])
        );
    }

    #[test]
    fn test_cli_os_override() {
        let cli = Cli::parse_from(["tessdata-discovery", "--os", "Darwin", "--timeout", "250"]);
        let opts = cli.options();
        assert_eq!(opts.os_override, Some(OsFamily::MacOs));
        assert_eq!(opts.timeout_per_strategy, Duration::from_millis(250));

        let cli = Cli::parse_from(["tessdata-discovery", "--os", "haiku"]);
        assert_eq!(cli.options().os_override, Some(OsFamily::Other));
    }

    #[test]
    fn test_cli_verbosity_counts() {
        let cli = Cli::parse_from(["tessdata-discovery", "-vv"]);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_cli_json_conflicts_with_primary() {
        assert!(Cli::try_parse_from(["tessdata-discovery", "--json", "--primary"]).is_err());
    }

    #[test]
    fn test_primary_line_reports_empty_result() {
        let summary = primary_line(&DiscoveryReport::empty(OsFamily::Other)).unwrap_err();
        assert_eq!(
            summary,
            "no tessdata directory found (os family: other, strategies run: 0)"
        );
    }
}
