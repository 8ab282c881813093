//! Configuration settings for an ovality calculation

use std::{
    collections::BTreeMap,
    fmt::{Debug, Display},
    path::{Path, PathBuf},
    time::Duration,
};

use gepol::{LogLayout, SolverParameters};
use molecule::RadiusTable;
use serde::Deserialize;

use crate::Error;

#[cfg(test)]
mod tests;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// The location of the GEPOL binary shipped alongside the program under
/// `root`, picking the Windows build when running there.
pub fn default_solver(root: impl AsRef<Path>) -> PathBuf {
    let name = if cfg!(windows) {
        "gepol93_with_args.exe"
    } else {
        "gepol93_with_args.out"
    };
    root.as_ref().join("fortran").join(name)
}

/// Convert a timeout in seconds to a [Duration]. Values that are not positive,
/// or too small to survive the conversion, are rejected.
pub fn timeout_from_secs(secs: f64) -> Result<Duration, String> {
    if secs.is_nan() || secs <= 0.0 {
        return Err(format!("timeout must be positive, got {secs}"));
    }
    match Duration::try_from_secs_f64(secs) {
        Ok(d) if d.is_zero() => {
            Err(format!("timeout {secs} is shorter than one nanosecond"))
        }
        Ok(d) => Ok(d),
        Err(e) => Err(format!("invalid timeout {secs}: {e}")),
    }
}

#[derive(Deserialize, Debug, Default, PartialEq)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    /// Path to the GEPOL binary. A bare name is looked up in PATH.
    solver: Option<PathBuf>,

    /// The directory in which each calculation gets its own work directory.
    output_dir: Option<PathBuf>,

    /// The number of seconds to wait for the solver before killing it.
    timeout: Option<f64>,

    /// The number of milliseconds between checks on the running solver.
    poll_interval: Option<u64>,

    /// Keep the work directory, with the XYZR input, sphere file, log, and
    /// console output, after the calculation.
    keep_files: Option<bool>,

    /// Overrides for any of the solver parameters.
    #[serde(default)]
    params: SolverParameters,

    /// Van der Waals radii to add to or replace in the built-in table.
    #[serde(default)]
    radii: BTreeMap<String, f64>,

    /// The position of the area and volume lines in the solver log, for
    /// solver builds that print a different trailer.
    log_layout: Option<LogLayout>,
}

/// Construct a [Config] with [Config::load] on a TOML file or start from
/// [Config::default] and set the fields directly
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub solver: PathBuf,

    pub output_dir: PathBuf,

    /// how long the solver may run before it is killed
    pub timeout: Duration,

    /// how long to sleep between checks on the running solver
    pub poll_interval: Duration,

    /// keep the per-calculation work directory instead of deleting it
    pub keep_files: bool,

    pub params: SolverParameters,

    pub radii: RadiusTable,

    pub log_layout: LogLayout,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            solver: default_solver("."),
            output_dir: PathBuf::from("output"),
            timeout: DEFAULT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            keep_files: false,
            params: SolverParameters::default(),
            radii: RadiusTable::default(),
            log_layout: LogLayout::GEPOL93,
        }
    }
}

impl TryFrom<RawConfig> for Config {
    type Error = String;

    fn try_from(rc: RawConfig) -> Result<Self, Self::Error> {
        let def = Self::default();

        let timeout = match rc.timeout {
            Some(t) => timeout_from_secs(t)?,
            None => def.timeout,
        };

        let poll_interval = match rc.poll_interval {
            Some(0) => return Err("poll_interval must be positive".to_owned()),
            Some(ms) => Duration::from_millis(ms),
            None => def.poll_interval,
        };

        if let Some((symbol, radius)) =
            rc.radii.iter().find(|(_, r)| !(r.is_finite() && **r > 0.0))
        {
            return Err(format!(
                "radius for {symbol} must be positive, got {radius}"
            ));
        }
        let mut radii = def.radii;
        radii.extend(rc.radii.iter().map(|(s, &r)| (s.as_str(), r)));

        let log_layout = rc.log_layout.unwrap_or(def.log_layout);
        if !log_layout.is_valid() {
            return Err("log_layout offsets start at 1 for the last line".to_owned());
        }

        Ok(Self {
            solver: rc.solver.unwrap_or(def.solver),
            output_dir: rc.output_dir.unwrap_or(def.output_dir),
            timeout,
            poll_interval,
            keep_files: rc.keep_files.unwrap_or(def.keep_files),
            params: rc.params,
            radii,
            log_layout,
        })
    }
}

impl Config {
    /// load a [Config] from the TOML file specified by `filename`. Every key is
    /// optional, and missing keys take their default values
    pub fn load<P>(filename: P) -> Result<Self, Error>
    where
        P: AsRef<Path> + Debug,
    {
        let path = filename.as_ref();
        let contents =
            std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let config_err = |details: String| Error::Config {
            path: path.to_owned(),
            details,
        };
        let raw: RawConfig =
            toml::from_str(&contents).map_err(|e| config_err(e.to_string()))?;
        Self::try_from(raw).map_err(config_err)
    }
}

impl Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Config {
            solver,
            output_dir,
            timeout,
            poll_interval,
            keep_files,
            params,
            radii,
            log_layout,
        } = self;
        write!(
            f,
            "
Configuration Options:
solver = {}
output_dir = {}
timeout = {timeout:?}
poll_interval = {poll_interval:?}
keep_files = {keep_files}
params = {}
radii = {} elements
log_layout = {}, {}
",
            solver.display(),
            output_dir.display(),
            params.args().join(" "),
            radii.len(),
            log_layout.area_offset,
            log_layout.volume_offset,
        )
    }
}
