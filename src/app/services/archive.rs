//! Archive access seam for restart extraction
//!
//! The collation engine never touches the container format on disk. It reads
//! everything through [`ArchiveIndex`], a read-only snapshot of the archive's
//! dataset map plus the auxiliary lookup tables. [`MemoryArchive`] is the
//! in-memory implementation, used by tests and by callers that populate a
//! snapshot from an external reader.

use crate::app::models::{MasterTimeTable, WellCube};
use std::collections::HashMap;

/// Read-only view of a restart archive snapshot
///
/// The path iteration order of [`list_paths`](ArchiveIndex::list_paths) is
/// unspecified; no extraction logic may depend on it. Absence (`None`) is a
/// normal, expected outcome for every accessor and must be tolerated by the
/// engine.
pub trait ArchiveIndex {
    /// All dataset paths in the archive, order unspecified
    fn list_paths(&self) -> Vec<String>;

    /// Raw numeric vector for a dataset path
    fn get(&self, path: &str) -> Option<&[f64]>;

    /// Ordered component display names (1-based index convention)
    fn component_table(&self) -> Option<&[String]>;

    /// Master time table covering all steps plus the pre-simulation state
    fn master_time_table(&self) -> Option<&MasterTimeTable>;

    /// Ordered well names matching the well cube's first axis
    fn well_origins(&self) -> Option<&[String]>;

    /// Ordered well variable names matching the well cube's second axis
    fn well_variable_names(&self) -> Option<&[String]>;

    /// Dense well data block
    fn well_cube(&self) -> Option<&WellCube>;
}

/// In-memory archive snapshot
///
/// Datasets are held in a hash map, so listed path order is arbitrary,
/// matching the contract the engine is required to tolerate.
#[derive(Debug, Clone, Default)]
pub struct MemoryArchive {
    datasets: HashMap<String, Vec<f64>>,
    components: Option<Vec<String>>,
    time_table: Option<MasterTimeTable>,
    well_names: Option<Vec<String>>,
    well_variables: Option<Vec<String>>,
    well_cube: Option<WellCube>,
}

impl MemoryArchive {
    /// Create an empty archive snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a dataset, replacing any previous values at the same path
    pub fn insert_dataset(&mut self, path: impl Into<String>, values: Vec<f64>) {
        self.datasets.insert(path.into(), values);
    }

    /// Attach the component lookup table
    pub fn set_component_table(&mut self, components: Vec<String>) {
        self.components = Some(components);
    }

    /// Attach the master time table
    pub fn set_master_time_table(&mut self, table: MasterTimeTable) {
        self.time_table = Some(table);
    }

    /// Attach ordered well names
    pub fn set_well_origins(&mut self, names: Vec<String>) {
        self.well_names = Some(names);
    }

    /// Attach ordered well variable names
    pub fn set_well_variable_names(&mut self, names: Vec<String>) {
        self.well_variables = Some(names);
    }

    /// Attach the well data cube
    pub fn set_well_cube(&mut self, cube: WellCube) {
        self.well_cube = Some(cube);
    }

    /// Number of datasets held
    pub fn dataset_count(&self) -> usize {
        self.datasets.len()
    }
}

impl ArchiveIndex for MemoryArchive {
    fn list_paths(&self) -> Vec<String> {
        self.datasets.keys().cloned().collect()
    }

    fn get(&self, path: &str) -> Option<&[f64]> {
        self.datasets.get(path).map(Vec::as_slice)
    }

    fn component_table(&self) -> Option<&[String]> {
        self.components.as_deref()
    }

    fn master_time_table(&self) -> Option<&MasterTimeTable> {
        self.time_table.as_ref()
    }

    fn well_origins(&self) -> Option<&[String]> {
        self.well_names.as_deref()
    }

    fn well_variable_names(&self) -> Option<&[String]> {
        self.well_variables.as_deref()
    }

    fn well_cube(&self) -> Option<&WellCube> {
        self.well_cube.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_archive() {
        let archive = MemoryArchive::new();
        assert!(archive.list_paths().is_empty());
        assert!(archive.get("/RESTART/000000/PRESSURE").is_none());
        assert!(archive.component_table().is_none());
        assert!(archive.master_time_table().is_none());
    }

    #[test]
    fn test_dataset_round_trip() {
        let mut archive = MemoryArchive::new();
        archive.insert_dataset("/RESTART/000000/PRESSURE", vec![1.0, 2.0, 3.0]);

        assert_eq!(archive.dataset_count(), 1);
        assert_eq!(
            archive.get("/RESTART/000000/PRESSURE"),
            Some([1.0, 2.0, 3.0].as_slice())
        );
        assert_eq!(archive.list_paths(), vec!["/RESTART/000000/PRESSURE"]);
    }

    #[test]
    fn test_metadata_accessors() {
        let mut archive = MemoryArchive::new();
        archive.set_component_table(vec!["H2O".to_string(), "CO2".to_string()]);
        archive.set_well_origins(vec!["P1".to_string()]);

        assert_eq!(archive.component_table().unwrap().len(), 2);
        assert_eq!(archive.well_origins().unwrap(), ["P1".to_string()]);
        assert!(archive.well_variable_names().is_none());
        assert!(archive.well_cube().is_none());
    }
}
