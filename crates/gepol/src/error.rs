use std::{path::PathBuf, time::Duration};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("no Van der Waals radius known for element '{symbol}' (atom {index})")]
    UnknownElement { symbol: String, index: usize },

    #[error("solver `{command}` {reason}\n{output}")]
    Solver {
        command: String,
        reason: String,
        output: String,
    },

    #[error("solver `{command}` did not finish within {timeout:?}\n{output}")]
    SolverTimeout {
        command: String,
        timeout: Duration,
        output: String,
    },

    #[error("malformed solver log {path:?}: {details}: `{line}`")]
    MalformedLog {
        path: PathBuf,
        line: String,
        details: String,
    },

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

    /// Returns `true` if the error is [`UnknownElement`].
    ///
    /// [`UnknownElement`]: Error::UnknownElement
    #[must_use]
    pub fn is_unknown_element(&self) -> bool {
        matches!(self, Self::UnknownElement { .. })
    }

    /// Returns `true` if the error is [`Solver`].
    ///
    /// [`Solver`]: Error::Solver
    #[must_use]
    pub fn is_solver(&self) -> bool {
        matches!(self, Self::Solver { .. })
    }

    /// Returns `true` if the error is [`SolverTimeout`].
    ///
    /// [`SolverTimeout`]: Error::SolverTimeout
    #[must_use]
    pub fn is_solver_timeout(&self) -> bool {
        matches!(self, Self::SolverTimeout { .. })
    }

    /// Returns `true` if the error is [`MalformedLog`].
    ///
    /// [`MalformedLog`]: Error::MalformedLog
    #[must_use]
    pub fn is_malformed_log(&self) -> bool {
        matches!(self, Self::MalformedLog { .. })
    }
}
