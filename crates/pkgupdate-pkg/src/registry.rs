//! Supported package managers
//!
//! A fixed table describing how to query each manager and which stderr
//! output it produces when there is simply nothing to list. The table
//! order is the detection order.

use crate::error::PackageError;

/// rpm query printing `name|version|release|arch` per installed package
const RPM_QUERY_INSTALLED: &[&str] = &[
    "rpm",
    "-qa",
    "--qf",
    "%{NAME}|%{VERSION}|%{RELEASE}|%{ARCH}\n",
];

/// Printed by dnf and yum when no requested package has an available version
pub const NO_MATCHING_PACKAGES: &str = "Error: No matching Packages to list\n";

/// How to query one package manager
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManagerSpec {
    /// Manager id, also the binary probed for during detection
    pub id: &'static str,
    /// Lists installed packages
    pub query_installed: &'static [&'static str],
    /// Lists available packages; the package keys are appended as the last argument
    pub query_available: &'static [&'static str],
    /// Exact stderr texts that do not indicate a failure
    pub allowed_stderr: &'static [&'static str],
}

static REGISTRY: [ManagerSpec; 2] = [
    ManagerSpec {
        id: "dnf",
        query_installed: RPM_QUERY_INSTALLED,
        query_available: &["dnf", "-q", "list", "--available"],
        allowed_stderr: &["", NO_MATCHING_PACKAGES],
    },
    ManagerSpec {
        id: "yum",
        query_installed: RPM_QUERY_INSTALLED,
        query_available: &["yum", "-q", "list", "available"],
        allowed_stderr: &["", NO_MATCHING_PACKAGES],
    },
];

/// All registered managers in detection order
#[must_use]
pub fn managers() -> &'static [ManagerSpec] {
    &REGISTRY
}

/// Registered manager ids in detection order
pub fn manager_ids() -> impl Iterator<Item = &'static str> {
    REGISTRY.iter().map(|spec| spec.id)
}

/// Look up a manager by id
///
/// # Errors
/// Returns `UnsupportedManager` if `id` is not registered
pub fn spec_for(id: &str) -> Result<&'static ManagerSpec, PackageError> {
    REGISTRY
        .iter()
        .find(|spec| spec.id == id)
        .ok_or_else(|| PackageError::UnsupportedManager(id.to_string()))
}

impl ManagerSpec {
    /// Shell snippet printing the binary path when the manager is installed
    ///
    /// `command` is a shell builtin, so this must run under `sh -c`.
    #[must_use]
    pub fn probe_script(&self) -> String {
        format!("command -v {}", self.id)
    }

    /// Available-query argv with `keys` appended
    #[must_use]
    pub fn available_argv<'a>(&self, keys: &'a str) -> Vec<&'a str> {
        self.query_available
            .iter()
            .copied()
            .chain(std::iter::once(keys))
            .collect()
    }

    /// Whether `stderr` is a benign message for this manager
    #[must_use]
    pub fn is_allowed_stderr(&self, stderr: &str) -> bool {
        self.allowed_stderr.contains(&stderr)
    }
}
