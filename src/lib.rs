/// srcscan
///
/// Finds the source units (packages, modules and projects) of several
/// language ecosystems in a directory tree and reports them as tagged,
/// serializable records.
pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod logging;
pub mod output;

pub use config::{Config, UnitErrorPolicy};
pub use discovery::{scan, sort_units, Unit, UnitKind};
pub use error::{Error, Result};
