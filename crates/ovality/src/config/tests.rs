use std::fs::write;

use gepol::SurfaceType;
use tempfile::TempDir;
use test_case::test_case;

use super::*;

#[test]
fn load() {
    let got = Config::load("testfiles/ovality.toml").unwrap();
    let mut radii = RadiusTable::default();
    radii.insert("H", 1.10);
    radii.insert("U", 1.86);
    let want = Config {
        solver: PathBuf::from("/opt/gepol/gepol93_with_args.out"),
        output_dir: PathBuf::from("results"),
        timeout: Duration::from_millis(30_500),
        poll_interval: Duration::from_millis(20),
        keep_files: true,
        params: SolverParameters {
            density_factor: 1.2,
            subdivision_count: 4,
            surface_type: SurfaceType::Wsurf,
            ..SolverParameters::default()
        },
        radii,
        log_layout: LogLayout::GEPOL93,
    };
    assert_eq!(got, want);
}

#[test]
fn empty_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.toml");
    write(&path, "").unwrap();
    assert_eq!(Config::load(&path).unwrap(), Config::default());
}

#[test]
fn log_layout() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("layout.toml");
    write(&path, "[log_layout]\narea_offset = 3\nvolume_offset = 2\n")
        .unwrap();
    let got = Config::load(&path).unwrap();
    assert_eq!(
        got.log_layout,
        LogLayout {
            area_offset: 3,
            volume_offset: 2
        }
    );
}

#[test]
fn missing_file() {
    let err = Config::load("testfiles/nonexistent.toml").unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
}

#[test_case("timeout = 0" ; "zero timeout")]
#[test_case("timeout = -3.0" ; "negative timeout")]
#[test_case("timeout = nan" ; "nan timeout")]
#[test_case("timeout = inf" ; "infinite timeout")]
#[test_case("timeout = 1e-12" ; "timeout rounds to zero")]
#[test_case("poll_interval = 0" ; "zero poll interval")]
#[test_case("[radii]\nC = 0.0" ; "zero radius")]
#[test_case("[radii]\nC = -1.7" ; "negative radius")]
#[test_case("[log_layout]\narea_offset = 0\nvolume_offset = 4" ; "zero offset")]
#[test_case("solvr = \"gepol\"" ; "unknown key")]
#[test_case("[params]\ndensity = 2.0" ; "unknown param")]
#[test_case("[params]\nsurface_type = \"BSURF\"" ; "bad surface type")]
#[test_case("timeout = \"soon\"" ; "wrong type")]
fn invalid(contents: &str) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.toml");
    write(&path, contents).unwrap();
    let err = Config::load(&path).unwrap_err();
    assert!(
        matches!(err, Error::Config { .. }),
        "expected a config error, got {err:?}"
    );
}

#[test_case(1e-12 ; "below a nanosecond")]
#[test_case(0.0 ; "zero")]
#[test_case(-0.5 ; "negative")]
#[test_case(f64::NAN ; "nan")]
#[test_case(f64::INFINITY ; "infinite")]
fn rejected_timeouts(secs: f64) {
    assert!(timeout_from_secs(secs).is_err());
}

#[test]
fn timeouts() {
    assert_eq!(timeout_from_secs(1e-9), Ok(Duration::from_nanos(1)));
    assert_eq!(timeout_from_secs(2.5), Ok(Duration::from_millis(2500)));
}

#[test]
fn default_solver_location() {
    let got = default_solver("/opt/ovality");
    let want = if cfg!(windows) {
        "/opt/ovality/fortran/gepol93_with_args.exe"
    } else {
        "/opt/ovality/fortran/gepol93_with_args.out"
    };
    assert_eq!(got, PathBuf::from(want));
}

#[test]
fn display() {
    let config = Config {
        solver: PathBuf::from("gepol93"),
        ..Config::default()
    };
    insta::assert_snapshot!(config.to_string().trim(), @r"
    Configuration Options:
    solver = gepol93
    output_dir = output
    timeout = 300s
    poll_interval = 50ms
    keep_files = false
    params = 1.4 0.8 0.5 3 1 VECTORS.BIN DISPLAY.BIN ESURF 0 0 0 0 0 0
    radii = 55 elements
    log_layout = 5, 4
    ");
}
