use std::path::PathBuf;

use thiserror::Error;

use crate::Format;

#[derive(Debug, Error)]
pub enum Error {
    #[error("coordinate files of type '{extension}' are not supported ({path:?})")]
    UnsupportedFormat { path: PathBuf, extension: String },

    #[error("failed to parse {format} data: {details} (at line {line})")]
    Parse {
        format: Format,
        line: usize,
        details: String,
    },

    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn parse(format: Format, line: usize, details: impl Into<String>) -> Self {
        Self::Parse {
            format,
            line,
            details: details.into(),
        }
    }

    /// Returns `true` if the error is [`Parse`].
    ///
    /// [`Parse`]: Error::Parse
    #[must_use]
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }

    /// Returns `true` if the error is [`UnsupportedFormat`].
    ///
    /// [`UnsupportedFormat`]: Error::UnsupportedFormat
    #[must_use]
    pub fn is_unsupported_format(&self) -> bool {
        matches!(self, Self::UnsupportedFormat { .. })
    }
}
