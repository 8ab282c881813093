use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Molecule(#[from] molecule::Error),

    #[error(transparent)]
    Solver(#[from] gepol::Error),

    #[error(
        "area and volume must be positive and finite, got area = {area}, \
         volume = {volume}"
    )]
    InvalidInput { area: f64, volume: f64 },

    #[error("invalid configuration in {path:?}: {details}")]
    Config { path: PathBuf, details: String },

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` if the error is [`InvalidInput`].
    ///
    /// [`InvalidInput`]: Error::InvalidInput
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }
}
