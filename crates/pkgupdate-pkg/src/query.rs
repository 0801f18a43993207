//! Installed and available queries against a package manager

use std::time::Duration;

use pkgupdate_exec::{CommandResult, CommandRunner};
use tracing::{debug, instrument, warn};

use crate::available::parse_available;
use crate::error::PackageError;
use crate::installed::parse_installed;
use crate::registry::ManagerSpec;
use crate::types::{AvailablePackages, InstalledPackages, OutstandingSet};

/// Run `argv`, bounded by `timeout` when one is given
pub(crate) async fn run_command(
    runner: &dyn CommandRunner,
    argv: &[&str],
    timeout: Option<Duration>,
) -> Result<CommandResult, PackageError> {
    let result = match timeout {
        Some(limit) => runner.run_with_timeout(argv, limit).await?,
        None => runner.run(argv).await?,
    };
    Ok(result)
}

/// List installed packages and keep the requested ones.
///
/// # Errors
/// - `QueryError` if the query wrote anything to stderr
/// - `EmptyQueryResult` if it printed nothing
/// - any parse error from [`parse_installed`]
#[instrument(skip(runner, spec, requested), fields(manager = spec.id))]
pub async fn query_installed(
    runner: &dyn CommandRunner,
    spec: &ManagerSpec,
    requested: OutstandingSet,
    timeout: Option<Duration>,
) -> Result<InstalledPackages, PackageError> {
    let result = run_command(runner, spec.query_installed, timeout).await?;

    if result.has_stderr() {
        warn!(stderr = %result.stderr, "installed query failed");
        return Err(PackageError::QueryError(result.stderr));
    }
    if result.stdout.is_empty() {
        return Err(PackageError::EmptyQueryResult {
            command: spec.query_installed.join(" "),
        });
    }

    let installed = parse_installed(&result.stdout, requested)?;
    debug!(count = installed.len(), "matched installed packages");
    Ok(installed)
}

/// List versions the repositories offer for the installed packages.
///
/// Stderr must be one of the manager's allowed texts. Empty stdout means
/// nothing is available.
///
/// # Errors
/// - `QueryError` carrying the stderr text if it is not allowed
/// - any parse error from [`parse_available`]
#[instrument(skip(runner, spec, installed), fields(manager = spec.id))]
pub async fn query_available(
    runner: &dyn CommandRunner,
    spec: &ManagerSpec,
    installed: &InstalledPackages,
    timeout: Option<Duration>,
) -> Result<AvailablePackages, PackageError> {
    let keys = installed.keys().collect::<Vec<_>>().join(" ");
    let argv = spec.available_argv(&keys);
    let result = run_command(runner, &argv, timeout).await?;

    if !spec.is_allowed_stderr(&result.stderr) {
        warn!(stderr = %result.stderr, "available query failed");
        return Err(PackageError::QueryError(result.stderr));
    }
    if result.stdout.is_empty() {
        debug!("no available packages listed");
        return Ok(AvailablePackages::new());
    }

    let available = parse_available(&result.stdout)?;
    debug!(count = available.len(), "parsed available packages");
    Ok(available)
}
