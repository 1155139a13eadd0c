use super::traits::{SnapshotFile, SystemSnapshot};
use crate::core::models::environment::Environment;
use crate::core::models::molecule::Molecule;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StateError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Malformed state file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Failed to serialize state: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Inconsistent state: {0}")]
    Inconsistency(String),
}

#[derive(Serialize)]
struct StateDocumentRef<'a> {
    step: u64,
    environment: &'a Environment,
    molecules: &'a [Molecule],
}

/// A checkpoint read back from disk.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoadedState {
    pub step: u64,
    pub environment: Environment,
    pub molecules: Vec<Molecule>,
}

/// Checkpoint format: a TOML document with the step index, the environment and every
/// molecule. Floating-point values are written with round-trip precision, so a
/// resumed run starts from exactly the checkpointed coordinates.
pub struct StateFile;

impl StateFile {
    pub fn read_from(reader: &mut impl Read) -> Result<LoadedState, StateError> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        let state: LoadedState = toml::from_str(&content)?;

        if state.molecules.is_empty() {
            return Err(StateError::Inconsistency(
                "state file contains no molecules".to_string(),
            ));
        }
        if state.environment.molecule_count != state.molecules.len() {
            return Err(StateError::Inconsistency(format!(
                "environment declares {} molecules but {} were found",
                state.environment.molecule_count,
                state.molecules.len()
            )));
        }
        Ok(state)
    }

    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<LoadedState, StateError> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }
}

impl SnapshotFile for StateFile {
    type Error = StateError;

    fn write_to(snapshot: &SystemSnapshot, writer: &mut impl Write) -> Result<(), Self::Error> {
        let document = StateDocumentRef {
            step: snapshot.step,
            environment: snapshot.environment,
            molecules: snapshot.molecules,
        };
        let content = toml::to_string(&document)?;
        writer.write_all(content.as_bytes())?;
        Ok(())
    }
}
