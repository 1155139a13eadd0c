use super::traits::{SnapshotFile, SystemSnapshot};
use std::io::{self, Write};

/// Fixed-column coordinate file: one `ATOM` record per atom, `TER` after each
/// molecule and `END` after the last one.
pub struct PdbFile;

impl SnapshotFile for PdbFile {
    type Error = io::Error;

    fn write_to(snapshot: &SystemSnapshot, writer: &mut impl Write) -> Result<(), Self::Error> {
        writeln!(writer, "REMARK Created by MCGPU")?;

        for (molecule_index, molecule) in snapshot.molecules.iter().enumerate() {
            for atom in &molecule.atoms {
                writeln!(
                    writer,
                    "{:<6}{:>5}{:>3}{:>6}{:>6}{:>12.3}{:>8.3}{:>8.3}",
                    "ATOM",
                    atom.id + 1,
                    atom.name,
                    "UNK",
                    molecule_index + 1,
                    atom.position.x,
                    atom.position.y,
                    atom.position.z
                )?;
            }
            writeln!(writer, "TER")?;
        }

        writeln!(writer, "END")?;
        Ok(())
    }
}
