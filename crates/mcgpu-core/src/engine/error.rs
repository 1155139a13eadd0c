use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Initialization failed: {0}")]
    Initialization(String),
}

/// The kind of file a run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    State,
    Results,
    Coordinates,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ArtifactKind::State => "state",
            ArtifactKind::Results => "results",
            ArtifactKind::Coordinates => "coordinate",
        };
        f.write_str(label)
    }
}

/// A failed artifact write. These never abort a run; they are collected into the
/// final report.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Failed to write {kind} file '{path}': {message}", path = path.display())]
pub struct OutputError {
    pub kind: ArtifactKind,
    pub path: PathBuf,
    pub message: String,
}

impl OutputError {
    pub fn new(kind: ArtifactKind, path: PathBuf, source: &dyn std::error::Error) -> Self {
        Self {
            kind,
            path,
            message: source.to_string(),
        }
    }
}
