//! The XYZR coordinates file GEPOL reads its spheres from.
//!
//! ```text
//! *<title> coordinates file
//!     <atom count>
//! <x:10.5><y:10.5><z:10.5><radius:10.5> <symbol>
//! ```
//!
//! GEPOL reads the atom lines with a fixed-column format, so the widths are
//! not negotiable.

use std::{fmt::Display, io::Write, path::Path};

use log::{debug, trace};
use molecule::{Atom, Molecule, RadiusTable};
use tempfile::NamedTempFile;

use crate::Error;

/// An atom paired with the radius of its sphere.
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    pub atom: Atom,
    pub radius: f64,
}

impl Display for Sphere {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Sphere { atom, radius } = self;
        write!(
            f,
            "{:10.5}{:10.5}{:10.5}{:10.5} {}",
            atom.x, atom.y, atom.z, radius, atom.symbol
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Xyzr {
    pub title: String,
    pub spheres: Vec<Sphere>,
}

impl Xyzr {
    /// Pair every atom in `mol` with its radius from `radii`, keeping the atom
    /// order. Fails on the first atom whose element has no radius.
    pub fn new(
        title: &str,
        mol: &Molecule,
        radii: &RadiusTable,
    ) -> Result<Self, Error> {
        let spheres = mol
            .iter()
            .enumerate()
            .map(|(index, atom)| {
                let radius = radii.get(&atom.symbol).ok_or_else(|| {
                    Error::UnknownElement {
                        symbol: atom.symbol.clone(),
                        index,
                    }
                })?;
                Ok(Sphere {
                    atom: atom.clone(),
                    radius,
                })
            })
            .collect::<Result<Vec<_>, Error>>()?;
        Ok(Self {
            title: title.to_owned(),
            spheres,
        })
    }

    /// Write `self` to `path`. The contents go to a temporary file in the same
    /// directory first and are renamed over `path`, so a failed write never
    /// leaves a partial file behind.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp =
            NamedTempFile::new_in(dir).map_err(|e| Error::io(dir, e))?;
        write!(tmp, "{self}").map_err(|e| Error::io(tmp.path(), e))?;
        tmp.as_file().sync_all().map_err(|e| Error::io(tmp.path(), e))?;
        tmp.persist(path).map_err(|e| Error::io(path, e.error))?;
        debug!("wrote {} spheres to {path:?}", self.spheres.len());
        Ok(())
    }
}

impl Display for Xyzr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "*{} coordinates file", self.title)?;
        writeln!(f, "    {}", self.spheres.len())?;
        for sphere in &self.spheres {
            trace!("{sphere}");
            writeln!(f, "{sphere}")?;
        }
        Ok(())
    }
}
