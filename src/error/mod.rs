mod config;
mod io;
mod unit;

pub use config::ConfigError;
pub use io::IoError;
pub use unit::UnitError;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] IoError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Unit(#[from] UnitError),

    #[error("malformed manifest '{path}': {message}")]
    Manifest { path: PathBuf, message: String },
}

impl Error {
    pub fn manifest(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Manifest {
            path: path.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
