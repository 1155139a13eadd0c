//! Provides input/output functionality for simulation files.
//!
//! A run reads its initial system either from a TOML input configuration or from a
//! previously written state checkpoint, and produces three kinds of artifacts: state
//! checkpoints, a PDB coordinate file and a results record.

pub mod input;
pub mod pdb;
pub mod results;
pub mod state;
pub mod traits;
