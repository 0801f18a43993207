//! pkgupdate CLI
//!
//! Checks whether requested installed packages have newer versions in the
//! configured repositories and prints the result as JSON

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use color_eyre::Result;
use pkgupdate_exec::LocalRunner;
use pkgupdate_pkg::{CheckReport, PackageError, check_update};
use serde::Serialize;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod config;

use config::Config;

/// Check installed packages for available updates
#[derive(Parser, Debug)]
#[command(name = "pkgupdate", version, about)]
struct Args {
    /// Names of the packages to check
    packages: Vec<String>,

    /// Package manager to use (dnf or yum); probed when omitted
    #[arg(long, value_name = "MANAGER")]
    pkg_mgr: Option<String>,

    /// Give up on any single package manager command after this many seconds
    #[arg(long, value_name = "SECS")]
    timeout_secs: Option<u64>,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

/// What gets printed on stdout
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Outcome {
    Report(CheckReport),
    Failed { failed: bool, msg: String },
}

impl From<Result<CheckReport, PackageError>> for Outcome {
    fn from(result: Result<CheckReport, PackageError>) -> Self {
        match result {
            Ok(report) => Outcome::Report(report),
            Err(e) => Outcome::Failed {
                failed: true,
                msg: e.to_string(),
            },
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    let args = Args::parse();
    let config = Config::load_default(args.config.as_deref())?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log.level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let options = config.check_options(args.pkg_mgr, args.timeout_secs);
    let runner = LocalRunner::new();

    let result = check_update(&runner, args.packages.as_slice(), &options).await;
    if let Err(e) = &result {
        tracing::warn!(error = %e, "update check failed");
    }

    let outcome = Outcome::from(result);
    let json = if args.pretty {
        serde_json::to_string_pretty(&outcome)?
    } else {
        serde_json::to_string(&outcome)?
    };
    println!("{json}");

    Ok(match outcome {
        Outcome::Report(_) => ExitCode::SUCCESS,
        Outcome::Failed { .. } => ExitCode::FAILURE,
    })
}
