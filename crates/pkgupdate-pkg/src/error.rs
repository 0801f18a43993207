//! Error types for pkgupdate-pkg

use pkgupdate_exec::ExecError;
use thiserror::Error;

/// Errors that end an update check
///
/// Every variant is terminal: the pipeline stops at the first one and no
/// partial report is produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PackageError {
    /// The request contained no package names
    #[error("No packages given to check.")]
    NoPackagesGiven,

    /// Caller named a manager that is not in the registry
    #[error("Package manager \"{0}\" is not supported.")]
    UnsupportedManager(String),

    /// Detection probed every registered manager without a match
    #[error(
        "None of the supported package managers '{}' seems to be available on this system.",
        .tried.join(" ")
    )]
    NoPackageManagerFound {
        /// Manager ids that were probed, in probe order
        tried: Vec<String>,
    },

    /// A query wrote unexpected text to stderr; carries that text verbatim
    #[error("{0}")]
    QueryError(String),

    /// The installed query printed nothing
    #[error("no output returned for the query.{command}")]
    EmptyQueryResult {
        /// The query command line
        command: String,
    },

    /// Requested packages that never appeared in the installed listing
    #[error("Following packages are not installed {0:?}")]
    MissingPackages(Vec<String>),

    /// A listing line did not have the required fields
    #[error("Package description '{0}' doesn't contain fields required for processing.")]
    MalformedEntry(String),

    /// The command runner itself failed
    #[error("execution error: {0}")]
    Exec(#[from] ExecError),
}
