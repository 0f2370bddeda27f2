//! Well section pipeline
//!
//! Reconciles the well cube's declared step count with the master time
//! table, computes the stride-decimated step selection, slices the series
//! and resolves component-suffixed variable names.

use crate::app::models::{Diagnostic, DiagnosticKind};
use crate::app::services::archive::ArchiveIndex;
use crate::app::services::component_resolver::ComponentResolver;
use crate::app::services::time_aligner::{self, TimeAxis};
use crate::app::services::well_series::{WellSeriesExtractor, WellSeriesMap};
use crate::constants::sections;
use crate::{Error, Result};
use tracing::{info, warn};

/// Per-well time series tables and their metadata
#[derive(Debug, Clone)]
pub struct WellTables {
    /// Series keyed `well id -> variable id -> values`
    pub series: WellSeriesMap,

    /// Well identifiers in cube order
    pub well_ids: Vec<String>,

    /// Variable identifiers in cube order, after component renaming
    pub variable_ids: Vec<String>,

    /// Wall-clock axis parallel to every series, empty when degraded
    pub time: TimeAxis,

    /// Stride actually applied after clamping
    pub stride_used: usize,

    /// Steps declared by the cube's time axis
    pub steps_available: usize,

    /// Steps usable after reconciling cube and master time table
    pub steps_used: usize,

    /// Recoverable conditions observed during extraction
    pub diagnostics: Vec<Diagnostic>,
}

/// Collate the archive's well section into per-well series
///
/// Fatal only when the archive has no well cube, or a cube without wells;
/// missing names, missing time table and length disagreements all degrade
/// with diagnostics.
pub fn collate<A>(archive: &A, stride: usize) -> Result<WellTables>
where
    A: ArchiveIndex,
{
    let cube = archive
        .well_cube()
        .ok_or_else(|| Error::empty_section(sections::WELLS))?;
    if cube.well_count() == 0 {
        return Err(Error::empty_section(sections::WELLS));
    }

    info!(
        wells = cube.well_count(),
        variables = cube.variable_count(),
        steps = cube.step_count(),
        "collating well section"
    );

    let mut diagnostics = Vec::new();

    let resolver = ComponentResolver::new(archive.component_table().map(<[String]>::to_vec));
    if !resolver.is_available() {
        warn!("component table absent, numeric-suffix renaming disabled");
        diagnostics.push(Diagnostic::new(
            DiagnosticKind::ComponentTableMissing,
            "component table absent, numeric-suffix renaming disabled",
        ));
    }

    let steps_available = cube.step_count();

    // Reconcile the two step-count sources before any selection
    let (steps_used, table) = match archive.master_time_table() {
        Some(table) => {
            let table_steps = table.step_count();
            if table_steps != steps_available {
                warn!(
                    cube = steps_available,
                    table = table_steps,
                    "cube and time table disagree on step count"
                );
                diagnostics.push(Diagnostic::new(
                    DiagnosticKind::SeriesLengthMismatch,
                    format!(
                        "cube declares {steps_available} steps, time table {table_steps}, \
                         clamped to the smaller"
                    ),
                ));
            }
            (steps_available.min(table_steps), Some(table))
        }
        None => {
            warn!("master time table absent, well time axis left empty");
            diagnostics.push(Diagnostic::new(
                DiagnosticKind::TimeTableMissing,
                "master time table absent, time axis left empty",
            ));
            (steps_available, None)
        }
    };

    let (selection, stride_diagnostics) = time_aligner::stride_indices(steps_used, stride);
    diagnostics.extend(stride_diagnostics);

    let time = match table {
        Some(table) => {
            let (time, align_diagnostics) = time_aligner::align_rows(table, &selection.indices);
            diagnostics.extend(align_diagnostics);
            time
        }
        None => TimeAxis::default(),
    };

    let variable_names = archive.well_variable_names().unwrap_or(&[]);

    let extractor = WellSeriesExtractor::new(&resolver);
    let extracted = extractor.extract(
        cube,
        archive.well_origins(),
        variable_names,
        &selection.indices,
        steps_used,
    );
    diagnostics.extend(extracted.diagnostics);

    info!(
        wells = extracted.well_ids.len(),
        variables = extracted.variable_ids.len(),
        steps_used,
        steps_available,
        stride = selection.stride_used,
        "well collation complete"
    );

    Ok(WellTables {
        series: extracted.series,
        well_ids: extracted.well_ids,
        variable_ids: extracted.variable_ids,
        time,
        stride_used: selection.stride_used,
        steps_available,
        steps_used,
        diagnostics,
    })
}
