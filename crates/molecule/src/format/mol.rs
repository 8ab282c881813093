use log::trace;

use crate::{Atom, Error, Format, Molecule, atom::normalize_symbol};

/// number of header lines before the counts line
const HEADER_LINES: usize = 3;

/// Read the atom block of an MDL V2000 molfile. Only the first record of a
/// multi-record file is considered, and bonds are not needed here.
pub fn read(contents: &str) -> Result<Molecule, Error> {
    let lines: Vec<&str> = contents.lines().collect();
    let Some(counts) = lines.get(HEADER_LINES) else {
        return Err(Error::parse(
            Format::Mol,
            lines.len(),
            "file ended before the counts line",
        ));
    };
    let counts_ln = HEADER_LINES + 1;
    if counts.contains("V3000") {
        return Err(Error::parse(Format::Mol, counts_ln, "V3000 is not supported"));
    }

    // the counts are fixed-width and can run together, as in `100101`
    let field = counts.get(0..3).unwrap_or(counts).trim();
    let count: usize = field.parse().map_err(|_| {
        Error::parse(Format::Mol, counts_ln, format!("invalid atom count '{field}'"))
    })?;

    let start = HEADER_LINES + 1;
    let block = lines.get(start..start + count).ok_or_else(|| {
        Error::parse(
            Format::Mol,
            lines.len(),
            format!("declared {count} atoms but the file ended early"),
        )
    })?;

    let mut atoms = Vec::with_capacity(count);
    for (i, raw) in block.iter().enumerate() {
        let ln = start + i + 1;
        let atom = parse_atom(raw, ln)?;
        trace!("{ln}: {atom}");
        atoms.push(atom);
    }
    Ok(Molecule::new(atoms))
}

fn parse_atom(raw: &str, ln: usize) -> Result<Atom, Error> {
    let padded = format!("{raw:<40}");
    let mut coord = [0.0; 3];
    for (c, (range, axis)) in coord
        .iter_mut()
        .zip([(0..10, 'x'), (10..20, 'y'), (20..30, 'z')])
    {
        let field = padded.get(range).unwrap_or("").trim();
        *c = field.parse().map_err(|_| {
            Error::parse(Format::Mol, ln, format!("invalid {axis} coordinate '{field}'"))
        })?;
    }
    let label = padded.get(31..34).unwrap_or("").trim();
    let symbol = normalize_symbol(label).ok_or_else(|| {
        Error::parse(Format::Mol, ln, format!("invalid element symbol '{label}'"))
    })?;
    let [x, y, z] = coord;
    Ok(Atom::new(&symbol, x, y, z))
}
