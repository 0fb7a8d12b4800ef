use std::path::Path;

use crate::config::Config;
use crate::discovery::unit::{Unit, UnitKind};
use crate::error::Result;

/// What a builder gets to know about a match.
#[derive(Debug, Clone, Copy)]
pub struct UnitContext<'a> {
    /// Absolute path of the matched directory or file.
    pub abs_path: &'a Path,
    /// The same path relative to the configured base, `/`-separated.
    pub rel_path: &'a str,
    pub config: &'a Config,
}

/// Turns a profile match into a populated unit.
pub trait UnitBuilder: Send + Sync {
    fn build(&self, ctx: &UnitContext<'_>) -> Result<Unit>;

    fn kind(&self) -> UnitKind;
}
