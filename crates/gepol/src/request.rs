use std::{
    ffi::OsString,
    fs::{File, read_to_string},
    io::ErrorKind,
    path::{Path, PathBuf},
    process::{Child, Command, Stdio},
    thread,
    time::{Duration, Instant},
};

use log::{debug, error, trace, warn};

use crate::{Error, SolverParameters};

/// the name of the result log GEPOL is told to write
pub const LOG_FILE: &str = "output_calc_log.txt";

/// how many times to retry a spawn that failed because the solver binary was
/// still open for writing in another process
const SPAWN_RETRIES: usize = 5;

/// Everything needed to run GEPOL once. All of the paths are derived from the
/// molecule title and a work directory that belongs to this calculation only.
/// GEPOL runs inside that directory, so the unnamed files it writes (like
/// `VECTORS.BIN`) stay there too.
#[derive(Clone, Debug, PartialEq)]
pub struct SolverRequest {
    pub solver: PathBuf,
    pub title: String,
    pub workdir: PathBuf,

    /// the XYZR coordinates file GEPOL reads
    pub input: PathBuf,

    /// the sphere file GEPOL writes
    pub sphere_file: PathBuf,

    /// where GEPOL writes its result summary. it is the last argument on the
    /// command line
    pub log_file: PathBuf,

    /// the solver's combined stdout and stderr
    pub console_file: PathBuf,

    pub params: SolverParameters,
}

impl SolverRequest {
    pub fn new(
        solver: impl Into<PathBuf>,
        title: &str,
        dir: impl AsRef<Path>,
        params: SolverParameters,
    ) -> Self {
        // the solver runs with `dir` as its working directory, so every path
        // it is handed has to survive the change of directory
        let dir = absolute(dir.as_ref());
        let solver = solver.into();
        let solver = if solver.components().count() > 1 {
            absolute(&solver)
        } else {
            // a bare name is looked up in PATH
            solver
        };
        Self {
            solver,
            title: title.to_owned(),
            input: dir.join(format!("{title}.xyzr")),
            sphere_file: dir.join(format!("{title}.SPH")),
            log_file: dir.join(LOG_FILE),
            console_file: dir.join(format!("{title}.console")),
            workdir: dir,
            params,
        }
    }

    /// The arguments following the solver path: title, input file, sphere
    /// file, the parameters, and finally the log file.
    pub fn args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            self.title.clone().into(),
            self.input.clone().into(),
            self.sphere_file.clone().into(),
        ];
        args.extend(self.params.args().into_iter().map(OsString::from));
        args.push(self.log_file.clone().into());
        args
    }

    /// the full command line, for logs and error messages
    pub fn command_line(&self) -> String {
        let mut ret = self.solver.display().to_string();
        for arg in self.args() {
            ret.push(' ');
            ret.push_str(&arg.to_string_lossy());
        }
        ret
    }

    /// Run the solver to completion, checking on it every `poll_interval`. If
    /// it is still running after `timeout`, it is killed and
    /// [Error::SolverTimeout] is returned.
    ///
    /// Any existing log file is deleted first so that a failed run can never
    /// leave an older result to be read in its place.
    pub fn run(
        &self,
        timeout: Duration,
        poll_interval: Duration,
    ) -> Result<(), Error> {
        self.remove_stale_log()?;

        let command = self.command_line();
        debug!("running `{command}`");

        let mut child = self.spawn().map_err(|e| {
            error!("failed to start `{command}`: {e}");
            Error::Solver {
                command: command.clone(),
                reason: format!("could not be started: {e}"),
                output: String::new(),
            }
        })?;

        let start = Instant::now();
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) => {}
                Err(e) => {
                    kill(&mut child);
                    return Err(Error::io(&self.solver, e));
                }
            }
            let elapsed = start.elapsed();
            if elapsed >= timeout {
                kill(&mut child);
                error!("`{command}` timed out after {elapsed:?}");
                return Err(Error::SolverTimeout {
                    command,
                    timeout,
                    output: self.console_output(),
                });
            }
            thread::sleep(poll_interval.min(timeout - elapsed));
        };
        trace!("solver finished in {:?} with {status}", start.elapsed());

        if !status.success() {
            error!("`{command}` failed with {status}");
            return Err(Error::Solver {
                command,
                reason: format!("failed with {status}"),
                output: self.console_output(),
            });
        }

        if !self.log_file.exists() {
            return Err(Error::Solver {
                command,
                reason: format!(
                    "exited successfully but did not write {:?}",
                    self.log_file
                ),
                output: self.console_output(),
            });
        }

        Ok(())
    }

    fn remove_stale_log(&self) -> Result<(), Error> {
        match std::fs::remove_file(&self.log_file) {
            Ok(()) => {
                warn!("removed stale solver log {:?}", self.log_file);
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::io(&self.log_file, e)),
        }
    }

    fn spawn(&self) -> std::io::Result<Child> {
        let console = File::create(&self.console_file)?;
        let mut attempt = 0;
        loop {
            let res = Command::new(&self.solver)
                .args(self.args())
                .current_dir(&self.workdir)
                .stdin(Stdio::null())
                .stdout(console.try_clone()?)
                .stderr(console.try_clone()?)
                .spawn();
            match res {
                Err(e)
                    if e.kind() == ErrorKind::ExecutableFileBusy
                        && attempt < SPAWN_RETRIES =>
                {
                    attempt += 1;
                    thread::sleep(Duration::from_millis(10 * attempt as u64));
                }
                res => return res,
            }
        }
    }

    /// whatever the solver printed, or a note saying why it isn't available
    fn console_output(&self) -> String {
        read_to_string(&self.console_file).unwrap_or_else(|e| {
            format!("(console output unavailable: {e})")
        })
    }
}

/// `path` made absolute against the current directory, or left alone if that
/// fails
fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_owned())
}

fn kill(child: &mut Child) {
    if let Err(e) = child.kill() {
        warn!("failed to kill solver process {}: {e}", child.id());
    }
    let _ = child.wait();
}

#[cfg(test)]
mod tests;
