//! Spatial section pipeline
//!
//! Classifies every archive path, freezes the timestep axis and variable
//! catalog, assembles one dense `cells × steps` matrix per variable, and
//! aligns the step axis to wall-clock time.

use crate::app::models::{ClassifiedPath, Diagnostic, DiagnosticKind, Section};
use crate::app::services::archive::ArchiveIndex;
use crate::app::services::axis_indexer::TimestepAxis;
use crate::app::services::catalog::VariableCatalog;
use crate::app::services::collator::stats::ExtractionStats;
use crate::app::services::matrix_assembler;
use crate::app::services::path_classifier::classify;
use crate::app::services::time_aligner::{self, TimeAxis};
use crate::constants::sections;
use crate::{Error, Result};
use ndarray::Array2;
use std::collections::HashMap;
use tracing::{info, warn};

/// Dense spatial tables and their metadata
#[derive(Debug, Clone)]
pub struct SpatialTables {
    /// Sanitized variable identifier to `cells × steps` matrix
    ///
    /// Cells never written hold the `NAN` missing-value sentinel.
    pub matrices: HashMap<String, Array2<f64>>,

    /// Ordered timestep axis (tokens and numeric values)
    pub axis: TimestepAxis,

    /// Ordered variable catalog (original tokens and identifiers)
    pub catalog: VariableCatalog,

    /// Wall-clock axis aligned to the timestep axis, empty when degraded
    pub time: TimeAxis,

    /// Every path classified into the spatial section, with its parsed
    /// step and variable tokens
    pub classified: Vec<ClassifiedPath>,

    /// Recoverable conditions observed during extraction
    pub diagnostics: Vec<Diagnostic>,

    /// Summary counters
    pub stats: ExtractionStats,
}

/// Collate the archive's spatial section into dense per-variable matrices
///
/// Fatal only when the archive holds no spatial paths at all; every other
/// irregularity degrades with a diagnostic.
pub fn collate<A>(archive: &A) -> Result<SpatialTables>
where
    A: ArchiveIndex + Sync,
{
    let paths = archive.list_paths();
    info!("collating spatial section from {} archive paths", paths.len());

    let mut classified: Vec<ClassifiedPath> = paths
        .iter()
        .filter_map(|path| classify(path))
        .filter(|entry| entry.section == Section::Spatial)
        .collect();

    // The archive's path order is unspecified; sorting here makes catalog
    // discovery deterministic
    classified.sort_by(|a, b| a.path.cmp(&b.path));

    if classified.is_empty() {
        return Err(Error::empty_section(sections::SPATIAL));
    }

    let axis = TimestepAxis::index(classified.iter().filter_map(|entry| entry.step_token.clone()));
    let (catalog, mut diagnostics) =
        VariableCatalog::build(classified.iter().map(|entry| entry.variable_token.as_str()));

    let (matrices, assembly_diagnostics) =
        matrix_assembler::assemble(archive, &classified, &axis, &catalog);
    diagnostics.extend(assembly_diagnostics);

    let time = match archive.master_time_table() {
        Some(table) => {
            let (time, align_diagnostics) = time_aligner::align_steps(&axis, table);
            diagnostics.extend(align_diagnostics);
            time
        }
        None => {
            warn!("master time table absent, spatial time axis left empty");
            diagnostics.push(Diagnostic::new(
                DiagnosticKind::TimeTableMissing,
                "master time table absent, time axis left empty",
            ));
            TimeAxis::default()
        }
    };

    let mut stats = ExtractionStats {
        paths_listed: paths.len(),
        spatial_paths: classified.len(),
        variables: catalog.len(),
        steps: axis.len(),
        ..ExtractionStats::default()
    };
    stats.absorb_diagnostics(&diagnostics);

    info!("spatial collation complete: {}", stats.summary());

    Ok(SpatialTables {
        matrices,
        axis,
        catalog,
        time,
        classified,
        diagnostics,
        stats,
    })
}
