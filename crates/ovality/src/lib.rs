//! Molecular ovality from a coordinate file: the molecule is handed to GEPOL
//! as a set of Van der Waals spheres, and the surface area and volume it
//! reports are compared with those of a perfect sphere.

use std::path::{Path, PathBuf};

use gepol::{SolverRequest, SolverResult, Xyzr};
use log::{debug, info, warn};

pub mod config;
mod error;
pub mod shape;

pub use config::Config;
pub use error::Error;
pub use shape::{OvalityResult, SpheroidType, minimal_sphere_area, ovality};

/// The title GEPOL is given for the molecule in `path`: its file name without
/// the extension.
pub fn molecule_title(path: impl AsRef<Path>) -> String {
    path.as_ref()
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Load the molecule in `coord_file`, run GEPOL on it, and return the surface
/// area and volume it reports.
///
/// Each call gets its own work directory under `config.output_dir`, named
/// after the molecule, so concurrent calculations never share input or log
/// files. The directory is removed afterwards unless `config.keep_files` is
/// set.
pub fn calculate_area_and_volume(
    coord_file: impl AsRef<Path>,
    config: &Config,
) -> Result<SolverResult, Error> {
    let coord_file = coord_file.as_ref();
    let title = molecule_title(coord_file);
    let mol = molecule::load(coord_file)?;
    info!("loaded {} atoms from {coord_file:?}", mol.len());

    // fail on missing radii before touching the file system
    let xyzr = Xyzr::new(&title, &mol, &config.radii)?;

    std::fs::create_dir_all(&config.output_dir)
        .map_err(|e| Error::io(&config.output_dir, e))?;
    let workdir = tempfile::Builder::new()
        .prefix(&format!("{title}."))
        .tempdir_in(&config.output_dir)
        .map_err(|e| Error::io(&config.output_dir, e))?;
    debug!("working in {:?}", workdir.path());

    let res = run_solver(&xyzr, workdir.path(), config);

    if config.keep_files {
        let kept: PathBuf = workdir.keep();
        info!("kept solver files in {kept:?}");
    } else if let Err(e) = workdir.close() {
        warn!("failed to remove work directory: {e}");
    }

    res
}

fn run_solver(
    xyzr: &Xyzr,
    workdir: &Path,
    config: &Config,
) -> Result<SolverResult, Error> {
    let req = SolverRequest::new(
        &config.solver,
        &xyzr.title,
        workdir,
        config.params.clone(),
    );
    xyzr.write(&req.input)?;
    req.run(config.timeout, config.poll_interval)?;
    let res = config.log_layout.read(&req.log_file)?;
    info!("area = {}, volume = {}", res.area, res.volume);
    Ok(res)
}

/// Compute the ovality of the molecule in `coord_file`. See
/// [calculate_area_and_volume] for the steps involved.
pub fn calculate(
    coord_file: impl AsRef<Path>,
    config: &Config,
) -> Result<OvalityResult, Error> {
    let SolverResult { area, volume } =
        calculate_area_and_volume(coord_file, config)?;
    OvalityResult::new(area, volume)
}

#[cfg(all(test, unix))]
mod tests {
    use std::{
        fs::{read_dir, write},
        os::unix::fs::PermissionsExt,
        time::Duration,
    };

    use approx::assert_abs_diff_eq;
    use tempfile::TempDir;

    use super::*;

    /// an `sh` stand-in for GEPOL that writes a log reporting the area of a
    /// sphere with volume 10
    const SPHERE: &str = r#"#!/bin/sh
for last in "$@"; do :; done
cat > "$last" <<EOF
 mock GEPOL
 AREA   =    22.44661156  *
 VOLUME =    10.00000000  *
 1
 2
 3
EOF
"#;

    fn setup(script: &str) -> (TempDir, Config) {
        let dir = TempDir::new().unwrap();
        let solver = dir.path().join("gepol.sh");
        write(&solver, script).unwrap();
        std::fs::set_permissions(
            &solver,
            std::fs::Permissions::from_mode(0o755),
        )
        .unwrap();
        let config = Config {
            solver,
            output_dir: dir.path().join("output"),
            timeout: Duration::from_secs(30),
            poll_interval: Duration::from_millis(10),
            ..Config::default()
        };
        (dir, config)
    }

    fn entries(dir: &Path) -> Vec<PathBuf> {
        read_dir(dir).unwrap().map(|e| e.unwrap().path()).collect()
    }

    #[test]
    fn title() {
        assert_eq!(molecule_title("testfiles/water.xyz"), "water");
        assert_eq!(molecule_title("/tmp/benzene.v2.mol"), "benzene.v2");
    }

    #[test]
    fn sphere() {
        let (dir, config) = setup(SPHERE);
        let got = calculate("testfiles/water.xyz", &config).unwrap();
        assert_abs_diff_eq!(got.area, 22.44661156);
        assert_abs_diff_eq!(got.volume, 10.0);
        assert_abs_diff_eq!(got.ovality, 1.0, epsilon = 1e-8);
        assert!(entries(&dir.path().join("output")).is_empty());
    }

    #[test]
    fn keep_files() {
        let (dir, mut config) = setup(SPHERE);
        config.keep_files = true;
        calculate_area_and_volume("testfiles/water.xyz", &config).unwrap();
        let kept = entries(&dir.path().join("output"));
        assert_eq!(kept.len(), 1);
        let workdir = &kept[0];
        assert!(
            workdir
                .file_name()
                .unwrap()
                .to_string_lossy()
                .starts_with("water.")
        );
        for file in ["water.xyzr", "water.console", gepol::request::LOG_FILE] {
            assert!(workdir.join(file).exists(), "missing {file}");
        }
    }

    #[test]
    fn solver_failure_cleans_up() {
        let (dir, config) = setup("#!/bin/sh\necho oops >&2\nexit 1\n");
        let err = calculate("testfiles/water.xyz", &config).unwrap_err();
        let Error::Solver(e) = &err else {
            panic!("expected a solver error, got {err:?}");
        };
        assert!(e.is_solver());
        assert!(entries(&dir.path().join("output")).is_empty());
    }

    #[test]
    fn unknown_element_writes_nothing() {
        let (dir, mut config) = setup(SPHERE);
        config.radii = molecule::RadiusTable::empty();
        let err = calculate("testfiles/water.xyz", &config).unwrap_err();
        let Error::Solver(e) = &err else {
            panic!("expected an unknown element, got {err:?}");
        };
        assert!(e.is_unknown_element());
        assert!(!dir.path().join("output").exists());
    }

    #[test]
    fn unsupported_format() {
        let (_dir, config) = setup(SPHERE);
        let err = calculate("testfiles/ovality.toml", &config).unwrap_err();
        let Error::Molecule(e) = &err else {
            panic!("expected a molecule error, got {err:?}");
        };
        assert!(e.is_unsupported_format());
    }
}
