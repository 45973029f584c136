//! Loading of the data file a simulation leaves behind.

use std::{fs, path::Path};

use crate::error::{Error, Result};
use crate::index::{OutputType, SimulationDescriptor};

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<f64>,
}

/// Named numeric columns of equal length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TabularOutput {
    columns: Vec<Column>,
}

impl TabularOutput {
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn rows(&self) -> usize {
        self.columns.first().map_or(0, |c| c.values.len())
    }

    /// Rename columns pairwise; every `from` must exist.
    fn rename(&mut self, pairs: &[(&str, &str)]) -> std::result::Result<(), String> {
        let width = self.columns.len();
        for (from, to) in pairs {
            let col = self
                .columns
                .iter_mut()
                .find(|c| c.name == *from)
                .ok_or_else(|| format!("missing column '{from}' (table has {width} columns)"))?;
            col.name = (*to).to_string();
        }
        Ok(())
    }
}

/// Loaded output, one arm per [`OutputType`].
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationOutput {
    Trajectory(TabularOutput),
}

impl SimulationOutput {
    pub fn table(&self) -> &TabularOutput {
        match self {
            SimulationOutput::Trajectory(table) => table,
        }
    }
}

pub fn load_output_data(simulation: &SimulationDescriptor) -> Result<SimulationOutput> {
    load_output_file(Path::new(&simulation.output_path), simulation.output_type)
}

pub fn load_output_file(path: &Path, output_type: OutputType) -> Result<SimulationOutput> {
    let mut table = read_table(path)?;
    if table.rows() == 0 {
        return Err(Error::data(path, "no rows"));
    }
    match output_type {
        OutputType::Trajectory => {
            table
                .rename(&[("column_1", "x"), ("column_2", "y"), ("column_3", "z")])
                .map_err(|e| Error::data(path, e))?;
            Ok(SimulationOutput::Trajectory(table))
        }
    }
}

/// Parse a headerless comma-separated numeric file into `column_N` columns.
pub fn read_table(path: &Path) -> Result<TabularOutput> {
    let text = fs::read_to_string(path).map_err(|e| Error::data(path, e))?;
    let mut columns: Vec<Column> = Vec::new();

    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if columns.is_empty() {
            columns = (1..=fields.len())
                .map(|i| Column { name: format!("column_{i}"), values: Vec::new() })
                .collect();
        } else if fields.len() != columns.len() {
            return Err(Error::data(
                path,
                format!("line {}: expected {} fields, found {}", lineno + 1, columns.len(), fields.len()),
            ));
        }
        for (col, field) in columns.iter_mut().zip(&fields) {
            let value = field.parse::<f64>().map_err(|_| {
                Error::data(path, format!("line {}: '{field}' is not a number", lineno + 1))
            })?;
            col.values.push(value);
        }
    }

    Ok(TabularOutput { columns })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_output(text: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trajectory.csv");
        fs::write(&path, text).unwrap();
        (dir, path)
    }

    #[test]
    fn test_read_table_positional_names() {
        let (_dir, path) = write_output("1.0, 2.0\n3.5,-4e2\n");
        let table = read_table(&path).unwrap();
        assert_eq!(table.column_names().collect::<Vec<_>>(), ["column_1", "column_2"]);
        assert_eq!(table.column("column_2").unwrap(), &[2.0, -400.0]);
        assert_eq!(table.rows(), 2);
    }

    #[test]
    fn test_trajectory_columns_renamed() {
        let (_dir, path) = write_output("0,0,0\n1,1,1\n2,0,2\n\n");
        let SimulationOutput::Trajectory(table) =
            load_output_file(&path, OutputType::Trajectory).unwrap();

        assert_eq!(table.column_names().collect::<Vec<_>>(), ["x", "y", "z"]);
        assert_eq!(table.column("x").unwrap(), &[0.0, 1.0, 2.0]);
        assert_eq!(table.column("y").unwrap(), &[0.0, 1.0, 0.0]);
        assert_eq!(table.column("z").unwrap(), &[0.0, 1.0, 2.0]);
        assert!(table.column("column_1").is_none());
    }

    #[test]
    fn test_trajectory_extra_columns_kept() {
        let (_dir, path) = write_output("0,1,2,0.5\n3,4,5,1.0\n");
        let SimulationOutput::Trajectory(table) =
            load_output_file(&path, OutputType::Trajectory).unwrap();
        assert_eq!(table.width(), 4);
        assert_eq!(table.column("column_4").unwrap(), &[0.5, 1.0]);
    }

    #[test]
    fn test_load_output_data_uses_descriptor_path() {
        let (_dir, path) = write_output("1,2,3\n");
        let sim = SimulationDescriptor {
            id: "orbit1".into(),
            name: "Orbit".into(),
            entrypoint: "orbit".into(),
            output_type: OutputType::Trajectory,
            output_path: path.to_string_lossy().into_owned(),
            dimensions: 3,
            description: String::new(),
        };
        let SimulationOutput::Trajectory(table) = load_output_data(&sim).unwrap();
        assert_eq!(table.rows(), 1);
    }

    #[test]
    fn test_zero_rows_rejected() {
        let (_dir, path) = write_output("\n\n");
        let err = load_output_file(&path, OutputType::Trajectory).unwrap_err();
        assert!(err.to_string().contains("no rows"), "Got: {err}");
    }

    #[test]
    fn test_too_few_columns_rejected() {
        let (_dir, path) = write_output("1,2\n3,4\n");
        let err = load_output_file(&path, OutputType::Trajectory).unwrap_err();
        assert!(err.to_string().contains("column_3"), "Got: {err}");
    }

    #[test]
    fn test_non_numeric_rejected() {
        let (_dir, path) = write_output("x,y,z\n1,2,3\n");
        assert!(matches!(read_table(&path), Err(Error::Data { .. })));
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let (_dir, path) = write_output("1,2,3\n4,5\n");
        let err = read_table(&path).unwrap_err();
        assert!(err.to_string().contains("line 2"), "Got: {err}");
    }

    #[test]
    fn test_missing_file_rejected() {
        let err = read_table(Path::new("/nonexistent/trajectory.csv")).unwrap_err();
        assert!(matches!(err, Error::Data { .. }));
    }
}
