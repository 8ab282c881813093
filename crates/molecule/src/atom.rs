use std::{fmt::Display, str::FromStr};

use approx::AbsDiffEq;

/// A single atom: its element symbol and Cartesian position in Å.
#[derive(Debug, Clone)]
pub struct Atom {
    pub symbol: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl PartialEq for Atom {
    fn eq(&self, other: &Self) -> bool {
        self.abs_diff_eq(other, Self::default_epsilon())
    }
}

impl AbsDiffEq for Atom {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        1e-8
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        let close = |a: f64, b: f64| (a - b).abs() < epsilon;
        self.symbol == other.symbol
            && close(self.x, other.x)
            && close(self.y, other.y)
            && close(self.z, other.z)
    }
}

impl Display for Atom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:2} {:15.10} {:15.10} {:15.10}",
            self.symbol, self.x, self.y, self.z
        )
    }
}

impl FromStr for Atom {
    type Err = String;

    /// parse an Atom from a line like
    ///  C 1.0 1.0 1.0
    /// trailing fields after the z coordinate are ignored
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<_> = s.split_whitespace().collect();
        if fields.len() < 4 {
            return Err(format!(
                "expected a symbol and three coordinates, found {} field(s)",
                fields.len()
            ));
        }
        let symbol = normalize_symbol(fields[0])
            .ok_or_else(|| format!("invalid element symbol '{}'", fields[0]))?;
        let mut coord = [0.0; 3];
        for (c, field) in coord.iter_mut().zip(&fields[1..4]) {
            *c = field.parse().map_err(|_| {
                format!("failed to parse coordinate '{field}' as f64")
            })?;
        }
        let [x, y, z] = coord;
        Ok(Self::new(&symbol, x, y, z))
    }
}

pub const NUMBER_TO_SYMBOL: [&str; 93] = [
    "X", "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne", "Na", "Mg",
    "Al", "Si", "P", "S", "Cl", "Ar", "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn",
    "Fe", "Co", "Ni", "Cu", "Zn", "Ga", "Ge", "As", "Se", "Br", "Kr", "Rb",
    "Sr", "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd", "In",
    "Sn", "Sb", "Te", "I", "Xe", "Cs", "Ba", "La", "Ce", "Pr", "Nd", "Pm",
    "Sm", "Eu", "Gd", "Tb", "Dy", "Ho", "Er", "Tm", "Yb", "Lu", "Hf", "Ta",
    "W", "Re", "Os", "Ir", "Pt", "Au", "Hg", "Tl", "Pb", "Bi", "Po", "At",
    "Rn", "Fr", "Ra", "Ac", "Th", "Pa", "U",
];

fn titlecase(s: &str) -> String {
    let mut cs = s.chars();
    let Some(first) = cs.next() else {
        return String::new();
    };
    let mut ret = first.to_uppercase().to_string();
    for c in cs {
        ret.extend(c.to_lowercase());
    }
    ret
}

/// Normalize an element label to its conventional spelling. `CL` and `cl`
/// both become `Cl`, and bare atomic numbers like `6` are translated to their
/// symbols. Returns `None` for labels that cannot be an element symbol.
///
/// Symbols are not checked against the periodic table here. An unrecognized
/// but well-formed symbol is caught later by the radius lookup.
pub fn normalize_symbol(label: &str) -> Option<String> {
    let label = label.trim();
    if let Ok(n) = label.parse::<usize>() {
        return NUMBER_TO_SYMBOL
            .get(n)
            .filter(|_| n > 0)
            .map(|s| s.to_string());
    }
    if label.is_empty()
        || label.len() > 3
        || !label.chars().all(|c| c.is_ascii_alphabetic())
    {
        return None;
    }
    Some(titlecase(label))
}

impl Atom {
    pub fn new(symbol: &str, x: f64, y: f64, z: f64) -> Self {
        Self {
            symbol: symbol.to_owned(),
            x,
            y,
            z,
        }
    }
}

/// An ordered list of atoms. The order is the declaration order in the
/// source file and is never changed afterward.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Molecule {
    pub atoms: Vec<Atom>,
}

impl Molecule {
    pub fn new(atoms: Vec<Atom>) -> Self {
        Self { atoms }
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Atom> {
        self.atoms.iter()
    }
}
