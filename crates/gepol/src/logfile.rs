//! Reading results back out of the GEPOL log.
//!
//! GEPOL writes free-form text, but the end of the file has a fixed shape: the
//! total area and volume are reported on lines at fixed distances from the
//! end, each like
//!
//! ```text
//!  ...  AREA   =    123.45000  *
//! ```
//!
//! with the value between the `=` and the closing `*`. Nothing else in the log
//! identifies these lines, so the distances are tied to the GEPOL version that
//! wrote the log and are kept together in a [LogLayout].

use std::{
    fs::read_to_string,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::Error;

static VALUE: OnceLock<Regex> = OnceLock::new();

/// Surface area and volume reported by the solver
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SolverResult {
    pub area: f64,
    pub volume: f64,
}

/// Where the results sit in the log, counted from the end. An offset of 1 is
/// the last line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogLayout {
    pub area_offset: usize,
    pub volume_offset: usize,
}

impl LogLayout {
    /// the layout of logs from `gepol93_with_args`
    pub const GEPOL93: Self = Self {
        area_offset: 5,
        volume_offset: 4,
    };

    /// offsets count from 1, so a layout with a zero offset points past the
    /// end of every log
    pub fn is_valid(&self) -> bool {
        self.area_offset > 0 && self.volume_offset > 0
    }

    /// read the log at `path` and extract the area and volume
    pub fn read(&self, path: impl AsRef<Path>) -> Result<SolverResult, Error> {
        let path = path.as_ref();
        let contents =
            read_to_string(path).map_err(|e| Error::io(path, e))?;
        self.parse(&contents, path)
    }

    /// extract the area and volume from the full text of a log. `path` is only
    /// used for error messages
    pub fn parse(
        &self,
        contents: &str,
        path: impl AsRef<Path>,
    ) -> Result<SolverResult, Error> {
        let path = path.as_ref();
        if !self.is_valid() {
            return Err(Error::MalformedLog {
                path: path.to_owned(),
                line: String::new(),
                details: format!(
                    "line offsets start at 1, got area_offset = {}, \
                     volume_offset = {}",
                    self.area_offset, self.volume_offset
                ),
            });
        }
        let lines: Vec<&str> = contents.lines().collect();
        let need = self.area_offset.max(self.volume_offset);
        if lines.len() < need {
            return Err(Error::MalformedLog {
                path: path.to_owned(),
                line: lines.last().copied().unwrap_or_default().to_owned(),
                details: format!(
                    "expected at least {need} lines, found {}",
                    lines.len()
                ),
            });
        }
        let area = extract(lines[lines.len() - self.area_offset], "area", path)?;
        let volume =
            extract(lines[lines.len() - self.volume_offset], "volume", path)?;
        debug!("read area = {area}, volume = {volume} from {path:?}");
        Ok(SolverResult { area, volume })
    }
}

impl Default for LogLayout {
    fn default() -> Self {
        Self::GEPOL93
    }
}

/// parse the value between the first `=` and the last `*` in `line`
fn extract(line: &str, what: &str, path: &Path) -> Result<f64, Error> {
    let malformed = |details: String| Error::MalformedLog {
        path: PathBuf::from(path),
        line: line.to_owned(),
        details,
    };
    let re = VALUE.get_or_init(|| Regex::new(r"=(?P<value>.*)\*").unwrap());
    let caps = re.captures(line).ok_or_else(|| {
        malformed(format!("no `= ... *` markers around the {what}"))
    })?;
    let value = caps["value"].trim();
    value
        .parse()
        .map_err(|_| malformed(format!("invalid {what} '{value}'")))
}
