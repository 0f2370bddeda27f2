//! Tests for the collation pipeline
//!
//! Shared fixtures build in-memory archive snapshots exercising both the
//! happy paths and every degraded mode the pipeline must survive.


use crate::app::models::{MasterTimeTable, WellCube};
use crate::app::services::archive::MemoryArchive;
use ndarray::Array3;

/// Packed dates for January 2024, day `n + 1` per step `n`
fn packed_date(step: usize) -> f64 {
    20240101.0 + step as f64
}

/// Master time table with `steps` simulation steps plus the pre-simulation row
pub fn time_table(steps: usize) -> MasterTimeTable {
    let rows: Vec<(f64, f64)> = (0..=steps)
        .map(|row| {
            if row == 0 {
                (0.0, 20231231.0)
            } else {
                (row as f64, packed_date(row - 1))
            }
        })
        .collect();
    MasterTimeTable::from_pairs(&rows)
}

/// Well cube whose cell values encode their coordinates as `w*100 + v*10 + s`
pub fn coordinate_cube(wells: usize, variables: usize, steps: usize) -> WellCube {
    WellCube::new(Array3::from_shape_fn(
        (wells, variables, steps),
        |(w, v, s)| (w * 100 + v * 10 + s) as f64,
    ))
}

/// Spatial archive: two variables over three steps, with a time table
///
/// Step tokens are inserted out of numeric order to exercise axis sorting.
pub fn spatial_archive() -> MemoryArchive {
    let mut archive = MemoryArchive::new();
    for (step, scale) in [("000010", 30.0), ("000000", 10.0), ("000002", 20.0)] {
        archive.insert_dataset(
            format!("/RESTART/{step}/PRESSURE"),
            vec![scale + 1.0, scale + 2.0, scale + 3.0],
        );
        archive.insert_dataset(format!("/RESTART/{step}/SWAT"), vec![scale / 100.0]);
    }
    // A non-spatial path that must be ignored by the spatial pipeline
    archive.insert_dataset("/METADATA/GRID", vec![1.0]);
    archive.set_master_time_table(time_table(11));
    archive
}

/// Well archive: two wells, two variables, four steps, full metadata
pub fn well_archive() -> MemoryArchive {
    let mut archive = MemoryArchive::new();
    archive.set_well_cube(coordinate_cube(2, 2, 4));
    archive.set_well_origins(vec!["PROD-1".to_string(), "INJ-1".to_string()]);
    archive.set_well_variable_names(vec!["WBHP".to_string(), "X2".to_string()]);
    archive.set_component_table(vec!["H2O".to_string(), "CO2".to_string()]);
    archive.set_master_time_table(time_table(4));
    archive
}
