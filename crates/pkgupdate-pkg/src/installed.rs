//! Installed-package listing parser

use tracing::debug;

use crate::error::PackageError;
use crate::types::{InstalledPackages, OutstandingSet, PackageRecord};

/// Parse `name|version|release|arch` lines, keeping only requested packages.
///
/// Each line whose name is still outstanding is recorded under its
/// `name.arch` key and crossed off. Scanning stops once nothing is
/// outstanding.
///
/// # Errors
/// - `MalformedEntry` for a scanned line with fewer than four fields
/// - `MissingPackages` with the names never matched, in request order
pub fn parse_installed(
    stdout: &str,
    mut outstanding: OutstandingSet,
) -> Result<InstalledPackages, PackageError> {
    let mut installed = InstalledPackages::default();

    for line in stdout.lines() {
        if outstanding.is_empty() {
            break;
        }
        if line.is_empty() {
            continue;
        }

        let record: PackageRecord = line.parse()?;
        if outstanding.take(&record.name) {
            debug!(key = %record.key(), version = %record.version, "found installed package");
            installed.insert(record);
        }
    }

    if !outstanding.is_empty() {
        return Err(PackageError::MissingPackages(outstanding.into_names()));
    }

    Ok(installed)
}
