//! Package manager detection

use std::time::Duration;

use pkgupdate_exec::{CommandRunner, ExecError};
use tracing::{debug, info, instrument};

use crate::error::PackageError;
use crate::query::run_command;
use crate::registry::{self, ManagerSpec};

/// Pick the manager to use.
///
/// An explicit id is looked up in the registry. Otherwise the host is
/// probed with [`detect`].
///
/// # Errors
/// `UnsupportedManager` for an unknown id, or any error from [`detect`]
pub async fn resolve(
    runner: &dyn CommandRunner,
    pkg_mgr: Option<&str>,
    timeout: Option<Duration>,
) -> Result<&'static ManagerSpec, PackageError> {
    match pkg_mgr {
        Some(id) => registry::spec_for(id),
        None => detect(runner, timeout).await,
    }
}

/// Probe the host for each registered manager in registry order.
///
/// The first probe that prints a path and nothing on stderr wins. A probe
/// that cannot be spawned counts as absent.
///
/// # Errors
/// `NoPackageManagerFound` naming every manager tried
#[instrument(skip(runner))]
pub async fn detect(
    runner: &dyn CommandRunner,
    timeout: Option<Duration>,
) -> Result<&'static ManagerSpec, PackageError> {
    for spec in registry::managers() {
        let script = spec.probe_script();
        let result = match run_command(runner, &["sh", "-c", script.as_str()], timeout).await {
            Ok(result) => result,
            Err(PackageError::Exec(ExecError::SpawnError(e))) => {
                debug!(manager = spec.id, error = %e, "probe could not start");
                continue;
            }
            Err(e) => return Err(e),
        };

        if !result.stdout.is_empty() && result.stderr.is_empty() {
            info!(manager = spec.id, path = %result.stdout.trim(), "detected package manager");
            return Ok(spec);
        }
        debug!(manager = spec.id, "package manager not present");
    }

    Err(PackageError::NoPackageManagerFound {
        tried: registry::manager_ids().map(String::from).collect(),
    })
}
