//! Update check pipeline
//!
//! detection → installed query → available query → diff. Each step blocks on
//! the previous one and the first error ends the check.

use std::time::Duration;

use pkgupdate_exec::CommandRunner;
use tracing::{info, instrument};

use crate::detect::resolve;
use crate::diff::diff;
use crate::error::PackageError;
use crate::query::{query_available, query_installed};
use crate::types::{CheckReport, OutstandingSet};

/// Options for a single check
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckOptions {
    /// Manager id to use instead of probing the host
    pub pkg_mgr: Option<String>,
    /// Deadline applied to each external command; `None` waits forever
    pub timeout: Option<Duration>,
}

impl CheckOptions {
    #[must_use]
    pub fn with_pkg_mgr(mut self, pkg_mgr: impl Into<String>) -> Self {
        self.pkg_mgr = Some(pkg_mgr.into());
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Report current and available versions for `packages`.
///
/// # Errors
/// Any [`PackageError`]; no partial report is returned
#[instrument(skip(runner, packages), fields(count = packages.len()))]
pub async fn check_update<S: AsRef<str>>(
    runner: &dyn CommandRunner,
    packages: &[S],
    options: &CheckOptions,
) -> Result<CheckReport, PackageError> {
    if packages.is_empty() {
        return Err(PackageError::NoPackagesGiven);
    }

    let spec = resolve(runner, options.pkg_mgr.as_deref(), options.timeout).await?;
    let requested = OutstandingSet::new(packages.iter().map(|p| p.as_ref()));

    let installed = query_installed(runner, spec, requested, options.timeout).await?;
    let available = query_available(runner, spec, &installed, options.timeout).await?;
    let report = CheckReport::new(diff(&installed, &available));

    info!(
        manager = spec.id,
        checked = report.outdated_pkgs.len(),
        updates = report.updates().count(),
        "update check completed"
    );

    Ok(report)
}
