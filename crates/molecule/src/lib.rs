//! Atoms, molecules, and the coordinate file readers that produce them.

pub mod atom;
mod error;
pub mod format;
pub mod radii;

pub use atom::{Atom, Molecule};
pub use error::Error;
pub use format::{Format, load};
pub use radii::RadiusTable;
