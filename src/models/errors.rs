use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::pipeline::ConfigError;

#[derive(Debug, Error)]
pub enum Error {
    /// input file could not be opened for reading
    #[error("{}: cannot open for reading: {source}", path.display())]
    FileNotFound { path: PathBuf, source: io::Error },

    /// output file could not be created or truncated
    #[error("{}: cannot open for writing: {source}", path.display())]
    FileNotWritable { path: PathBuf, source: io::Error },

    /// pipeline could not be built, reason owned by the builder
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to read input: {0}")]
    Read(#[source] io::Error),

    #[error("failed to write output: {0}")]
    Write(#[source] io::Error),
}
