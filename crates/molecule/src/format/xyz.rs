use log::trace;

use crate::{Atom, Error, Format, Molecule};

/// Read an XYZ file: an atom count, a comment line, and then exactly that many
/// `symbol x y z` lines. Anything after the declared atoms is ignored.
pub fn read(contents: &str) -> Result<Molecule, Error> {
    let mut lines = contents.lines().enumerate().map(|(i, l)| (i + 1, l));

    let (ln, count_line) = lines
        .next()
        .ok_or_else(|| Error::parse(Format::Xyz, 1, "empty file"))?;
    let count: usize = count_line.trim().parse().map_err(|_| {
        Error::parse(
            Format::Xyz,
            ln,
            format!("invalid atom count '{}'", count_line.trim()),
        )
    })?;

    // comment line, possibly missing when there are no atoms
    if lines.next().is_none() && count > 0 {
        return Err(Error::parse(Format::Xyz, 2, "missing comment line"));
    }

    let mut atoms = Vec::with_capacity(count);
    for (ln, line) in lines.take(count) {
        let atom: Atom = line
            .parse()
            .map_err(|e| Error::parse(Format::Xyz, ln, e))?;
        trace!("{ln}: {atom}");
        atoms.push(atom);
    }

    if atoms.len() != count {
        return Err(Error::parse(
            Format::Xyz,
            atoms.len() + 2,
            format!("declared {count} atoms but found {}", atoms.len()),
        ));
    }

    Ok(Molecule::new(atoms))
}
