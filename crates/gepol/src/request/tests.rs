#![cfg(unix)]

use std::{
    fs::{read_to_string, write},
    os::unix::fs::PermissionsExt,
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use tempfile::TempDir;

use super::*;

const POLL: Duration = Duration::from_millis(10);
const TIMEOUT: Duration = Duration::from_secs(30);

/// write an executable `sh` script with `body` into `dir`
fn mock_solver(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("gepol.sh");
    write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
        .unwrap();
    path
}

/// the last argument is the log file
const WRITE_LOG: &str = r#"for last in "$@"; do :; done
echo "writing $last"
cat > "$last" <<EOF
 GEPOL93 mock
 AREA   =   123.45000  *
 VOLUME =    67.89000  *
 done 1
 done 2
 done 3
EOF"#;

#[test]
fn argument_order() {
    let req = SolverRequest::new(
        "/opt/gepol/gepol93",
        "water",
        "/scratch/water.x1",
        SolverParameters::default(),
    );
    assert_eq!(req.args().len(), 18);
    assert_eq!(
        req.command_line(),
        "/opt/gepol/gepol93 water /scratch/water.x1/water.xyzr \
         /scratch/water.x1/water.SPH \
         1.4 0.8 0.5 3 1 VECTORS.BIN DISPLAY.BIN ESURF 0 0 0 0 0 0 \
         /scratch/water.x1/output_calc_log.txt"
    );
}

#[test]
fn relative_paths_made_absolute() {
    let req = SolverRequest::new(
        "./fortran/gepol93_with_args.out",
        "water",
        "output/water.x1",
        SolverParameters::default(),
    );
    assert!(req.solver.is_absolute());
    assert!(req.workdir.is_absolute());
    assert!(req.log_file.starts_with(&req.workdir));

    let bare = SolverRequest::new(
        "gepol93",
        "water",
        "/scratch",
        SolverParameters::default(),
    );
    assert_eq!(bare.solver, PathBuf::from("gepol93"));
}

#[test]
fn runs_inside_workdir() {
    let dir = TempDir::new().unwrap();
    let work = dir.path().join("work");
    std::fs::create_dir(&work).unwrap();
    let solver = mock_solver(
        dir.path(),
        r#"pwd
for last in "$@"; do :; done
touch VECTORS.BIN "$last""#,
    );
    let req =
        SolverRequest::new(solver, "water", &work, SolverParameters::default());
    req.run(TIMEOUT, POLL).unwrap();
    assert!(work.join("VECTORS.BIN").exists());
    assert!(!dir.path().join("VECTORS.BIN").exists());
}

#[test]
fn solver_sees_arguments() {
    let dir = TempDir::new().unwrap();
    let solver = mock_solver(
        dir.path(),
        r#"echo "$# $1 $4 ${11} ${18}"
for last in "$@"; do :; done
touch "$last""#,
    );
    let req = SolverRequest::new(
        solver,
        "water",
        dir.path(),
        SolverParameters::default(),
    );
    req.run(TIMEOUT, POLL).unwrap();
    let got = read_to_string(&req.console_file).unwrap();
    assert_eq!(
        got.trim(),
        format!("18 water 1.4 ESURF {}", req.log_file.display())
    );
}

#[test]
fn success() {
    let dir = TempDir::new().unwrap();
    let solver = mock_solver(dir.path(), WRITE_LOG);
    let req = SolverRequest::new(
        solver,
        "water",
        dir.path(),
        SolverParameters::default(),
    );
    req.run(TIMEOUT, POLL).unwrap();
    assert!(req.log_file.exists());
    assert!(
        read_to_string(&req.console_file)
            .unwrap()
            .starts_with("writing ")
    );
}

#[test]
fn stale_log_removed() {
    let dir = TempDir::new().unwrap();
    let solver = mock_solver(dir.path(), "exit 0");
    let req = SolverRequest::new(
        solver,
        "water",
        dir.path(),
        SolverParameters::default(),
    );
    write(&req.log_file, "AREA = 1.0 *\n").unwrap();
    let err = req.run(TIMEOUT, POLL).unwrap_err();
    assert!(err.is_solver());
    assert!(err.to_string().contains("did not write"));
    assert!(!req.log_file.exists());
}

#[test]
fn nonzero_exit() {
    let dir = TempDir::new().unwrap();
    let solver = mock_solver(
        dir.path(),
        r#"echo "reading coordinates"
echo "ERROR: too many spheres" >&2
exit 3"#,
    );
    let req = SolverRequest::new(
        solver,
        "water",
        dir.path(),
        SolverParameters::default(),
    );
    let err = req.run(TIMEOUT, POLL).unwrap_err();
    let Error::Solver { reason, output, .. } = &err else {
        panic!("expected a solver error, got {err:?}");
    };
    assert_eq!(reason, "failed with exit status: 3");
    assert_eq!(output, "reading coordinates\nERROR: too many spheres\n");
}

#[test]
fn missing_binary() {
    let dir = TempDir::new().unwrap();
    let req = SolverRequest::new(
        dir.path().join("no-such-solver"),
        "water",
        dir.path(),
        SolverParameters::default(),
    );
    let err = req.run(TIMEOUT, POLL).unwrap_err();
    assert!(err.is_solver());
    assert!(err.to_string().contains("could not be started"));
}

#[test]
fn not_executable() {
    let dir = TempDir::new().unwrap();
    let solver = dir.path().join("gepol.txt");
    write(&solver, "not a program").unwrap();
    let req = SolverRequest::new(
        solver,
        "water",
        dir.path(),
        SolverParameters::default(),
    );
    assert!(req.run(TIMEOUT, POLL).unwrap_err().is_solver());
}

#[test]
fn timeout() {
    let dir = TempDir::new().unwrap();
    let solver = mock_solver(dir.path(), "echo started\nexec sleep 10");
    let req = SolverRequest::new(
        solver,
        "water",
        dir.path(),
        SolverParameters::default(),
    );
    let start = Instant::now();
    let err = req.run(Duration::from_millis(300), POLL).unwrap_err();
    assert!(start.elapsed() < Duration::from_secs(5));
    let Error::SolverTimeout {
        timeout, output, ..
    } = &err
    else {
        panic!("expected a timeout, got {err:?}");
    };
    assert_eq!(*timeout, Duration::from_millis(300));
    assert_eq!(output, "started\n");
}
