//! pkgupdate-pkg: Package update checks
//!
//! Detects the host's package manager, lists installed and available
//! versions of requested packages and reports which ones can be updated.
//! Supports dnf and yum.

pub mod available;
pub mod check;
pub mod detect;
pub mod diff;
pub mod error;
pub mod installed;
pub mod query;
pub mod registry;
pub mod types;

pub use check::{CheckOptions, check_update};
pub use error::PackageError;
pub use registry::{ManagerSpec, spec_for};
pub use types::{
    AvailablePackages, CheckReport, InstalledPackages, OutstandingSet, PackageRecord,
    UpdateResult,
};
