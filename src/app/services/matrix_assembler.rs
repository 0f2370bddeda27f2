//! Dense matrix assembly for spatial variables
//!
//! The central collation algorithm. Each variable's entity count is unknown
//! until its first readable vector is observed, entries arrive in arbitrary
//! order, and individual datasets may be missing or mis-sized. Assembly runs
//! in two phases per variable: a discovery pass walks the variable's entries
//! in column order until one vector fixes the row count, then a fill pass
//! writes every readable vector into its column of a preallocated matrix.
//! Unwritten cells stay at the `NAN` missing-value sentinel.
//!
//! Reconciliation of a mis-sized vector is deliberately lossy: a shorter
//! vector leaves the tail at `NAN`, a longer one is truncated. Both cases are
//! reported through the diagnostics channel.
//!
//! Variables are independent, so assembly fans out across them with rayon
//! once the catalogs are frozen; results merge back in catalog order.

use crate::app::models::{ClassifiedPath, Diagnostic, DiagnosticKind};
use crate::app::services::archive::ArchiveIndex;
use crate::app::services::axis_indexer::TimestepAxis;
use crate::app::services::catalog::VariableCatalog;
use ndarray::Array2;
use rayon::prelude::*;
use std::collections::HashMap;
use tracing::{debug, warn};

/// One variable's entries: `(column, dataset path)` pairs in column order
type ColumnPlan<'a> = Vec<(usize, &'a str)>;

/// Assemble one dense `entities × steps` matrix per catalog variable
///
/// Entries whose step token is not on the axis are skipped; failed archive
/// lookups skip the entry with a diagnostic. A variable with no readable
/// vector at all keeps a `0 × n_columns` matrix for its entire lifetime.
pub fn assemble<A>(
    archive: &A,
    entries: &[ClassifiedPath],
    axis: &TimestepAxis,
    catalog: &VariableCatalog,
) -> (HashMap<String, Array2<f64>>, Vec<Diagnostic>)
where
    A: ArchiveIndex + Sync,
{
    // Freeze each variable's column plan before the parallel region
    let mut plans: HashMap<&str, ColumnPlan> = HashMap::new();
    for entry in entries {
        let Some(step_token) = entry.step_token.as_deref() else {
            continue;
        };
        let Some(column) = axis.column(step_token) else {
            continue;
        };
        if catalog.position(&entry.variable_token).is_none() {
            continue;
        }
        plans
            .entry(entry.variable_token.as_str())
            .or_default()
            .push((column, entry.path.as_str()));
    }
    for plan in plans.values_mut() {
        plan.sort_by_key(|&(column, _)| column);
    }

    let n_columns = axis.len();
    let assembled: Vec<(String, Array2<f64>, Vec<Diagnostic>)> = catalog
        .entries()
        .par_iter()
        .map(|entry| {
            let plan = plans.get(entry.token.as_str()).map(Vec::as_slice).unwrap_or(&[]);
            let (matrix, diagnostics) =
                assemble_variable(archive, &entry.token, plan, n_columns);
            (entry.identifier.clone(), matrix, diagnostics)
        })
        .collect();

    let mut matrices = HashMap::with_capacity(assembled.len());
    let mut diagnostics = Vec::new();
    for (identifier, matrix, variable_diagnostics) in assembled {
        debug!(
            identifier = %identifier,
            rows = matrix.nrows(),
            "variable assembled"
        );
        matrices.insert(identifier, matrix);
        diagnostics.extend(variable_diagnostics);
    }

    (matrices, diagnostics)
}

/// Assemble a single variable's matrix from its column plan
fn assemble_variable<A>(
    archive: &A,
    token: &str,
    plan: &[(usize, &str)],
    n_columns: usize,
) -> (Array2<f64>, Vec<Diagnostic>)
where
    A: ArchiveIndex,
{
    let mut diagnostics = Vec::new();

    // Discovery pass: the first readable vector fixes the row count
    let mut matrix: Option<Array2<f64>> = None;

    for &(column, path) in plan {
        let Some(vector) = archive.get(path) else {
            warn!(path, "dataset missing from archive, entry skipped");
            diagnostics.push(Diagnostic::new(
                DiagnosticKind::EntrySkipped,
                format!("dataset '{path}' could not be read, entry skipped"),
            ));
            continue;
        };

        let matrix = matrix
            .get_or_insert_with(|| Array2::from_elem((vector.len(), n_columns), f64::NAN));

        let rows = matrix.nrows();
        if vector.len() != rows {
            warn!(
                path,
                expected = rows,
                found = vector.len(),
                "vector length mismatch, reconciling"
            );
            diagnostics.push(Diagnostic::new(
                DiagnosticKind::LengthMismatch,
                format!(
                    "dataset '{path}' has {} values, variable '{token}' holds {rows} rows; \
                     extra values dropped or tail left unset",
                    vector.len()
                ),
            ));
        }

        let copy = rows.min(vector.len());
        for (row, &value) in vector.iter().take(copy).enumerate() {
            matrix[[row, column]] = value;
        }
    }

    // No readable vector: the variable stays at zero rows
    let matrix = matrix.unwrap_or_else(|| Array2::from_elem((0, n_columns), f64::NAN));
    (matrix, diagnostics)
}
