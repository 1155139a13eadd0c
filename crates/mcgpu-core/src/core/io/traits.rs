use crate::core::models::environment::Environment;
use crate::core::models::molecule::Molecule;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// A read-only view of the simulated system at a given step.
#[derive(Debug, Clone, Copy)]
pub struct SystemSnapshot<'a> {
    pub environment: &'a Environment,
    pub molecules: &'a [Molecule],
    pub step: u64,
}

/// Defines the interface for file formats that serialize a [`SystemSnapshot`].
pub trait SnapshotFile {
    /// The error type for write operations.
    type Error: Error + From<io::Error>;

    /// Writes a snapshot to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the underlying writer fails.
    fn write_to(snapshot: &SystemSnapshot, writer: &mut impl Write) -> Result<(), Self::Error>;

    /// Writes a snapshot to a file path, creating or truncating the file.
    ///
    /// The buffered writer is flushed explicitly so that a failing final write is
    /// reported instead of being lost on drop.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    fn write_to_path<P: AsRef<Path>>(
        snapshot: &SystemSnapshot,
        path: P,
    ) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(snapshot, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
