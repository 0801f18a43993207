//! pkgupdate-exec: Command execution abstraction
//!
//! Runs external commands as child processes and captures their output

pub mod error;
pub mod local;
pub mod result;
pub mod traits;

pub use error::ExecError;
pub use local::LocalRunner;
pub use result::CommandResult;
pub use traits::CommandRunner;
