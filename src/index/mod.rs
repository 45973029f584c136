//! Simulation index: descriptors of every runnable simulation.

use std::{collections::HashSet, fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputType {
    Trajectory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationDescriptor {
    #[serde(alias = "simulation_id")]
    pub id: String,
    pub name: String,
    pub entrypoint: String,
    pub output_type: OutputType,
    pub output_path: String,
    pub dimensions: i64,
    pub description: String,
}

impl SimulationDescriptor {
    fn validate(&self) -> std::result::Result<(), String> {
        let required = [
            ("id", &self.id),
            ("name", &self.name),
            ("entrypoint", &self.entrypoint),
            ("output_path", &self.output_path),
        ];
        for (field, value) in required {
            if value.is_empty() {
                return Err(format!("simulation '{}': field '{field}' must not be empty", self.id));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationIndex {
    simulations: Vec<SimulationDescriptor>,
}

impl SimulationIndex {
    pub fn new(simulations: Vec<SimulationDescriptor>) -> std::result::Result<Self, String> {
        let mut seen = HashSet::new();
        for sim in &simulations {
            sim.validate()?;
            if !seen.insert(sim.id.as_str()) {
                return Err(format!("duplicate simulation id '{}'", sim.id));
            }
        }
        Ok(Self { simulations })
    }

    pub fn get_simulation(&self, simulation_id: &str) -> Option<&SimulationDescriptor> {
        self.simulations.iter().find(|s| s.id == simulation_id)
    }

    pub fn len(&self) -> usize {
        self.simulations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.simulations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SimulationDescriptor> {
        self.simulations.iter()
    }
}

pub fn load_index(path: &Path) -> Result<SimulationIndex> {
    let text = fs::read_to_string(path).map_err(|e| Error::config(path, e))?;
    let raw: SimulationIndex = serde_json::from_str(&text).map_err(|e| Error::config(path, e))?;
    SimulationIndex::new(raw.simulations).map_err(|e| Error::config(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX: &str = r#"{
        "simulations": [
            {
                "id": "orbit1",
                "name": "Circular orbit",
                "entrypoint": "orbit",
                "output_type": "trajectory",
                "output_path": "data/orbit.csv",
                "dimensions": 3,
                "description": "Two-body problem"
            },
            {
                "simulation_id": "projectile",
                "name": "Projectile",
                "entrypoint": "projectile",
                "output_type": "trajectory",
                "output_path": "data/projectile.csv",
                "dimensions": 3,
                "description": ""
            }
        ]
    }"#;

    fn write_index(text: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.json");
        fs::write(&path, text).unwrap();
        (dir, path)
    }

    #[test]
    fn test_load_index_round_trip() {
        let (_dir, path) = write_index(INDEX);
        let index = load_index(&path).unwrap();
        assert_eq!(index.len(), 2);

        let orbit = index.get_simulation("orbit1").unwrap();
        assert_eq!(
            orbit,
            &SimulationDescriptor {
                id: "orbit1".into(),
                name: "Circular orbit".into(),
                entrypoint: "orbit".into(),
                output_type: OutputType::Trajectory,
                output_path: "data/orbit.csv".into(),
                dimensions: 3,
                description: "Two-body problem".into(),
            }
        );
    }

    #[test]
    fn test_simulation_id_alias() {
        let (_dir, path) = write_index(INDEX);
        let index = load_index(&path).unwrap();
        let sim = index.get_simulation("projectile").unwrap();
        assert_eq!(sim.entrypoint, "projectile");
        assert_eq!(sim.description, "");
    }

    #[test]
    fn test_get_simulation_absent() {
        let (_dir, path) = write_index(INDEX);
        let index = load_index(&path).unwrap();
        assert!(index.get_simulation("nope").is_none());
        assert!(index.get_simulation("").is_none());
    }

    #[test]
    fn test_empty_field_rejected() {
        let text = INDEX.replace(r#""entrypoint": "orbit""#, r#""entrypoint": """#);
        let (_dir, path) = write_index(&text);
        let err = load_index(&path).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
        assert!(err.to_string().contains("entrypoint"), "Got: {err}");
    }

    #[test]
    fn test_unknown_output_type_rejected() {
        let text = INDEX.replacen(r#""trajectory""#, r#""heatmap""#, 1);
        let (_dir, path) = write_index(&text);
        assert!(matches!(load_index(&path), Err(Error::Config { .. })));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let text = INDEX.replace(r#""simulation_id": "projectile""#, r#""id": "orbit1""#);
        let (_dir, path) = write_index(&text);
        let err = load_index(&path).unwrap_err();
        assert!(err.to_string().contains("duplicate simulation id 'orbit1'"), "Got: {err}");
    }

    #[test]
    fn test_malformed_and_missing_files() {
        let (_dir, path) = write_index("{ \"simulations\": [ ");
        assert!(matches!(load_index(&path), Err(Error::Config { .. })));

        let missing = Path::new("/nonexistent/index.json");
        assert!(matches!(load_index(missing), Err(Error::Config { .. })));
    }

    #[test]
    fn test_empty_index() {
        let (_dir, path) = write_index(r#"{ "simulations": [] }"#);
        let index = load_index(&path).unwrap();
        assert!(index.is_empty());
        assert_eq!(index.iter().count(), 0);
    }
}
