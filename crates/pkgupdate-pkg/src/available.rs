//! Available-package listing parser

use tracing::debug;

use crate::error::PackageError;
use crate::types::{AvailablePackages, PackageRecord};

/// Parse the rows of an available-package listing.
///
/// The first line is the manager's header and is skipped. Each row is
/// `name.arch  version-release  repository`. Arch is taken after the last
/// `.` of the first column; version and release are split at the first `-`
/// of the second column.
///
/// # Errors
/// Returns `MalformedEntry` for a row with fewer than two columns
pub fn parse_available(stdout: &str) -> Result<AvailablePackages, PackageError> {
    let mut available = AvailablePackages::new();

    for line in stdout.lines().skip(1) {
        let mut columns = line.split_whitespace();
        let Some(name_arch) = columns.next() else {
            continue;
        };
        let Some(version_release) = columns.next() else {
            return Err(PackageError::MalformedEntry(line.to_string()));
        };

        let (name, arch) = name_arch.rsplit_once('.').unwrap_or((name_arch, ""));
        let (version, release) = version_release
            .split_once('-')
            .unwrap_or((version_release, ""));

        let record = PackageRecord::new(name, version, release, arch);
        debug!(key = %name_arch, version, release, "found available package");
        available.insert(name_arch.to_string(), record);
    }

    Ok(available)
}
