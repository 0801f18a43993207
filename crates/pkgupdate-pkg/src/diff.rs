//! Join installed and available listings into update results

use crate::types::{AvailablePackages, InstalledPackages, UpdateResult};

/// One result per installed package, in installed order.
///
/// New version and release are only set when the same `name.arch` key is
/// available.
#[must_use]
pub fn diff(installed: &InstalledPackages, available: &AvailablePackages) -> Vec<UpdateResult> {
    installed
        .iter()
        .map(|current| {
            let key = current.key();
            let newer = available.get(&key);
            UpdateResult {
                current_version: current.version.clone(),
                current_release: current.release.clone(),
                new_version: newer.map(|r| r.version.clone()),
                new_release: newer.map(|r| r.release.clone()),
                name: key,
            }
        })
        .collect()
}
