use crate::core::models::Real;
use crate::core::models::atom::Atom;
use crate::core::models::environment::Environment;
use crate::core::models::molecule::Molecule;
use nalgebra::{Point3, Rotation3, Vector3};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Deserialize;
use std::f64::consts::PI;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid input: {0}")]
    Invalid(String),
}

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct EnvironmentSection {
    #[serde(rename = "box")]
    dimensions: [Real; 3],
    temperature: Real,
    max_translation: Real,
    max_rotation: Real,
    cutoff: Real,
    steps: u64,
    random_seed: Option<u64>,
    #[serde(default)]
    primary_atom_index: usize,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
struct AtomTemplate {
    name: String,
    position: [Real; 3],
    #[serde(default)]
    sigma: Real,
    #[serde(default)]
    epsilon: Real,
    #[serde(default)]
    charge: Real,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
struct SpeciesSection {
    #[serde(default)]
    name: Option<String>,
    count: usize,
    atoms: Vec<AtomTemplate>,
}

/// A fresh system built from an input configuration.
#[derive(Debug, Clone)]
pub struct InitialSystem {
    pub environment: Environment,
    pub molecules: Vec<Molecule>,
}

/// TOML input configuration describing the environment and the molecular species to
/// place in the box.
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct InputConfig {
    environment: EnvironmentSection,
    species: Vec<SpeciesSection>,
}

impl InputConfig {
    pub fn from_toml(content: &str) -> Result<Self, InputError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, InputError> {
        debug!("Loading input configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path).map_err(|e| InputError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::from_toml(&content)
    }

    fn validate(&self) -> Result<(), InputError> {
        let env = &self.environment;
        if env.dimensions.iter().any(|&length| length <= 0.0) {
            return Err(InputError::Invalid(
                "all box dimensions must be positive".to_string(),
            ));
        }
        if env.temperature <= 0.0 {
            return Err(InputError::Invalid(format!(
                "temperature must be positive, got {}",
                env.temperature
            )));
        }
        if env.cutoff <= 0.0 {
            return Err(InputError::Invalid(format!(
                "cutoff must be positive, got {}",
                env.cutoff
            )));
        }
        if env.max_translation < 0.0 || env.max_rotation < 0.0 {
            return Err(InputError::Invalid(
                "move bounds must not be negative".to_string(),
            ));
        }
        if self.species.iter().map(|s| s.count).sum::<usize>() == 0 {
            return Err(InputError::Invalid(
                "at least one molecule must be defined".to_string(),
            ));
        }
        for (index, species) in self.species.iter().enumerate() {
            let label = species.name.clone().unwrap_or_else(|| format!("#{}", index + 1));
            if species.atoms.is_empty() {
                return Err(InputError::Invalid(format!(
                    "species '{}' has no atoms",
                    label
                )));
            }
            if env.primary_atom_index >= species.atoms.len() {
                return Err(InputError::Invalid(format!(
                    "primary atom index {} is out of range for species '{}' ({} atoms)",
                    env.primary_atom_index,
                    label,
                    species.atoms.len()
                )));
            }
        }
        Ok(())
    }

    /// Places every molecule on a cubic lattice spanning the box, each with a random
    /// orientation about its primary atom.
    ///
    /// The orientations come from a stream derived from the resolved seed, so a given
    /// seed always produces the same starting configuration.
    pub fn build(self) -> InitialSystem {
        let env = &self.environment;
        let random_seed = env.random_seed.unwrap_or_else(clock_seed);
        let molecule_count: usize = self.species.iter().map(|s| s.count).sum();

        let mut per_side = (molecule_count as f64).cbrt().round() as usize;
        while per_side.pow(3) < molecule_count {
            per_side += 1;
        }
        let spacing: [Real; 3] =
            std::array::from_fn(|axis| env.dimensions[axis] / per_side as Real);

        let mut rng = ChaCha8Rng::seed_from_u64(random_seed.wrapping_add(1));
        let mut molecules = Vec::with_capacity(molecule_count);
        let mut next_atom_id = 0;

        for species in &self.species {
            let pivot = species.atoms[env.primary_atom_index].position;
            for _ in 0..species.count {
                let site_index = molecules.len();
                let lattice = [
                    site_index % per_side,
                    (site_index / per_side) % per_side,
                    site_index / (per_side * per_side),
                ];
                let site = Point3::from(Vector3::from_fn(|axis, _| {
                    (lattice[axis] as Real + 0.5) * spacing[axis]
                }));

                let rotation = Rotation3::from_euler_angles(
                    rng.gen_range(0.0..2.0 * PI) as Real,
                    rng.gen_range(0.0..2.0 * PI) as Real,
                    rng.gen_range(0.0..2.0 * PI) as Real,
                );

                let atoms = species
                    .atoms
                    .iter()
                    .map(|template| {
                        let offset = Vector3::new(
                            template.position[0] - pivot[0],
                            template.position[1] - pivot[1],
                            template.position[2] - pivot[2],
                        );
                        let atom = Atom::new(next_atom_id, &template.name, site + rotation * offset)
                            .with_params(template.sigma, template.epsilon, template.charge);
                        next_atom_id += 1;
                        atom
                    })
                    .collect();

                molecules.push(Molecule::new(site_index, atoms));
            }
        }

        let environment = Environment {
            dimensions: env.dimensions,
            temperature: env.temperature,
            cutoff: env.cutoff,
            max_translation: env.max_translation,
            max_rotation: env.max_rotation,
            steps: env.steps,
            random_seed,
            molecule_count,
            primary_atom_index: env.primary_atom_index,
        };

        InitialSystem {
            environment,
            molecules,
        }
    }
}

/// Seed drawn from the wall clock, kept within the signed 64-bit range so it can be
/// stored in TOML state files.
fn clock_seed() -> u64 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default();
    nanos & (i64::MAX as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    const WATER_INPUT: &str = r#"
[environment]
box = [20.0, 20.0, 20.0]
temperature = 298.15
max-translation = 0.15
max-rotation = 15.0
cutoff = 9.0
steps = 500
random-seed = 12345

[[species]]
name = "water"
count = 10

[[species.atoms]]
name = "O"
position = [0.0, 0.0, 0.0]
sigma = 3.15061
epsilon = 0.1521
charge = -0.834

[[species.atoms]]
name = "H1"
position = [0.9572, 0.0, 0.0]
charge = 0.417

[[species.atoms]]
name = "H2"
position = [-0.23998, 0.92662, 0.0]
charge = 0.417
"#;

    #[test]
    fn build_creates_requested_number_of_molecules() {
        let system = InputConfig::from_toml(WATER_INPUT).unwrap().build();

        assert_eq!(system.environment.steps, 500);
        assert_eq!(system.molecules.len(), 10);
        assert_eq!(system.environment.molecule_count, 10);
        assert_eq!(system.environment.random_seed, 12345);
        assert!(system.molecules.iter().all(|m| m.atom_count() == 3));
    }

    #[test]
    fn build_assigns_sequential_ids() {
        let system = InputConfig::from_toml(WATER_INPUT).unwrap().build();
        let atom_ids: Vec<usize> = system
            .molecules
            .iter()
            .flat_map(|m| m.atoms.iter().map(|a| a.id))
            .collect();

        assert_eq!(atom_ids, (0..30).collect::<Vec<_>>());
        for (index, molecule) in system.molecules.iter().enumerate() {
            assert_eq!(molecule.id, index);
        }
    }

    #[test]
    fn build_preserves_internal_geometry() {
        let system = InputConfig::from_toml(WATER_INPUT).unwrap().build();
        for molecule in &system.molecules {
            let oxygen = molecule.atoms[0].position;
            let bond = (molecule.atoms[1].position - oxygen).norm();
            assert!((bond - 0.9572).abs() < 1e-9);
        }
    }

    #[test]
    fn build_places_primary_atoms_inside_box() {
        let system = InputConfig::from_toml(WATER_INPUT).unwrap().build();
        for molecule in &system.molecules {
            let oxygen = molecule.atoms[0].position;
            for axis in 0..3 {
                assert!(oxygen[axis] > 0.0 && oxygen[axis] < 20.0);
            }
        }
    }

    #[test]
    fn build_is_reproducible_for_a_fixed_seed() {
        let first = InputConfig::from_toml(WATER_INPUT).unwrap().build();
        let second = InputConfig::from_toml(WATER_INPUT).unwrap().build();
        assert_eq!(first.molecules, second.molecules);
    }

    #[test]
    fn missing_seed_is_resolved_from_clock() {
        let input = WATER_INPUT.replace("random-seed = 12345\n", "");
        let system = InputConfig::from_toml(&input).unwrap().build();
        assert!(system.environment.random_seed <= i64::MAX as u64);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let input = WATER_INPUT.replace("steps = 500", "steps = 500\nbogus = 1");
        assert!(matches!(
            InputConfig::from_toml(&input),
            Err(InputError::Toml(_))
        ));
    }

    #[test]
    fn non_positive_temperature_is_rejected() {
        let input = WATER_INPUT.replace("temperature = 298.15", "temperature = 0.0");
        assert!(matches!(
            InputConfig::from_toml(&input),
            Err(InputError::Invalid(_))
        ));
    }

    #[test]
    fn out_of_range_primary_atom_is_rejected() {
        let input = WATER_INPUT.replace(
            "random-seed = 12345",
            "random-seed = 1\nprimary-atom-index = 3",
        );
        assert!(matches!(
            InputConfig::from_toml(&input),
            Err(InputError::Invalid(_))
        ));
    }

    #[test]
    fn from_file_reports_missing_file() {
        let dir = tempdir().unwrap();
        let result = InputConfig::from_file(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(InputError::Io { .. })));
    }

    #[test]
    fn from_file_reads_valid_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("water.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(WATER_INPUT.as_bytes()).unwrap();

        let system = InputConfig::from_file(&path).unwrap().build();
        assert_eq!(system.molecules.len(), 10);
    }
}
