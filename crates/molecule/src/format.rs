//! Readers for the supported coordinate file formats.

use std::{fmt::Display, fs::read_to_string, path::Path};

use log::debug;

use crate::{Error, Molecule};

pub mod mol;
pub mod pdb;
pub mod xyz;

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Format {
    Xyz,
    Pdb,
    /// MDL V2000 molfile
    Mol,
}

impl Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Format::Xyz => "XYZ",
                Format::Pdb => "PDB",
                Format::Mol => "MOL",
            }
        )
    }
}

impl Format {
    /// Pick the format from the extension of `path`. Only the exact
    /// lowercase extensions `xyz`, `pdb`, and `mol` are accepted.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let ext = path.extension().and_then(|e| e.to_str());
        match ext {
            Some("xyz") => Ok(Self::Xyz),
            Some("pdb") => Ok(Self::Pdb),
            Some("mol") => Ok(Self::Mol),
            _ => Err(Error::UnsupportedFormat {
                path: path.to_owned(),
                extension: ext.map(|e| format!(".{e}")).unwrap_or_default(),
            }),
        }
    }

    /// Parse `contents` as `self`. A file that yields no atoms has no usable
    /// geometry, so that is an error too.
    pub fn parse(&self, contents: &str) -> Result<Molecule, Error> {
        let mol = match self {
            Format::Xyz => xyz::read(contents),
            Format::Pdb => pdb::read(contents),
            Format::Mol => mol::read(contents),
        }?;
        if mol.is_empty() {
            return Err(Error::parse(*self, 0, "no atoms with 3D coordinates found"));
        }
        Ok(mol)
    }
}

/// Load the [Molecule] described by the coordinate file at `path`, choosing
/// the reader from the file extension.
pub fn load(path: impl AsRef<Path>) -> Result<Molecule, Error> {
    let path = path.as_ref();
    let format = Format::from_path(path)?;
    let contents = read_to_string(path).map_err(|source| Error::Io {
        path: path.to_owned(),
        source,
    })?;
    let mol = format.parse(&contents)?;
    debug!("loaded {} atoms from {format} file {path:?}", mol.len());
    Ok(mol)
}
