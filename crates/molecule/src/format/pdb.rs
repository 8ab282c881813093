use log::{trace, warn};

use crate::{Atom, Error, Format, Molecule, atom::normalize_symbol};

/// Read the `ATOM` and `HETATM` records of the first model in a PDB file.
/// Hydrogens are kept.
pub fn read(contents: &str) -> Result<Molecule, Error> {
    let mut atoms = Vec::new();
    for (i, line) in contents.lines().enumerate() {
        let ln = i + 1;
        if line.starts_with("ENDMDL") {
            break;
        }
        if !(line.starts_with("ATOM  ") || line.starts_with("HETATM")) {
            continue;
        }
        let atom = parse_atom(line, ln)?;
        trace!("{ln}: {atom}");
        atoms.push(atom);
    }
    Ok(Molecule::new(atoms))
}

fn column<'a>(line: &'a str, range: std::ops::Range<usize>) -> &'a str {
    line.get(range).map(str::trim).unwrap_or("")
}

fn parse_atom(line: &str, ln: usize) -> Result<Atom, Error> {
    let mut coord = [0.0; 3];
    for (c, (range, axis)) in coord
        .iter_mut()
        .zip([(30..38, 'x'), (38..46, 'y'), (46..54, 'z')])
    {
        let field = column(line, range);
        *c = field.parse().map_err(|_| {
            Error::parse(
                Format::Pdb,
                ln,
                format!("invalid {axis} coordinate '{field}'"),
            )
        })?;
    }

    let symbol = match normalize_symbol(column(line, 76..78)) {
        Some(s) => s,
        None => {
            let name = line.get(12..16).unwrap_or("");
            let s = element_from_name(name).ok_or_else(|| {
                Error::parse(
                    Format::Pdb,
                    ln,
                    format!("unable to infer element from atom name '{name}'"),
                )
            })?;
            warn!("line {ln}: no element column, guessed {s} from '{name}'");
            s
        }
    };

    let [x, y, z] = coord;
    Ok(Atom::new(&symbol, x, y, z))
}

/// Guess the element from a four-character PDB atom name. Element symbols are
/// right-justified in the first two columns of the name, so a leading blank or
/// digit means a one-letter element.
fn element_from_name(name: &str) -> Option<String> {
    let mut chars = name.chars();
    let first = chars.next()?;
    let symbol: String = if first == ' ' || first.is_ascii_digit() {
        chars.find(char::is_ascii_alphabetic)?.to_string()
    } else {
        name.chars()
            .take(2)
            .take_while(char::is_ascii_alphabetic)
            .collect()
    };
    normalize_symbol(&symbol)
}
