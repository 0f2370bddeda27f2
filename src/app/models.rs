//! Data models for restart archive collation
//!
//! This module contains the core data structures shared across the extraction
//! services: classified dataset paths, the master time table, the well data
//! cube, and the typed diagnostics channel for recoverable conditions.

use ndarray::Array3;
use serde::{Deserialize, Serialize};

// =============================================================================
// Path Classification
// =============================================================================

/// Archive section a dataset path belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Section {
    /// Per-cell restart data laid out as `/RESTART/<step>/<variable>`
    Spatial,
    /// Well time-series data laid out as `/WELLS/<variable>`
    WellSeries,
    /// Recognizable path outside the known sections
    Other,
}

/// A dataset path parsed into its addressing parts
///
/// Ephemeral: recomputed on every extraction run and surfaced in the output
/// metadata as the classified-path table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedPath {
    /// Original dataset path as listed by the archive
    pub path: String,

    /// Section the path was classified into
    pub section: Section,

    /// Step token for section layouts that address by timestep
    pub step_token: Option<String>,

    /// Raw variable token (untrimmed of archive naming conventions)
    pub variable_token: String,
}

// =============================================================================
// Diagnostics
// =============================================================================

/// Category of a recoverable extraction condition
///
/// A closed enum so tests can assert on degraded-path behavior without
/// parsing log text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// Component lookup table absent; numeric-suffix renaming disabled
    ComponentTableMissing,
    /// Master time table absent; time axes left empty
    TimeTableMissing,
    /// Step-token alignment against the master time table failed
    TimeAlignmentFailed,
    /// A dataset entry could not be read and was skipped
    EntrySkipped,
    /// Vector length disagreed with the variable's established row count
    LengthMismatch,
    /// Requested stride exceeded the available steps and was clamped
    StrideClamped,
    /// Two time-series sources disagreed on step count; minimum taken
    SeriesLengthMismatch,
    /// Well origin metadata absent; synthetic names substituted
    WellNamesMissing,
    /// Two distinct names collapsed to one identifier
    IdentifierCollision,
    /// A selection had no steps to draw from
    EmptySelection,
}

/// A recoverable condition observed during extraction
///
/// Diagnostics are collected into the extraction outputs (not just logged)
/// and never escalate to fatal errors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    /// Condition category
    pub kind: DiagnosticKind,
    /// Human-readable detail naming the affected unit of work
    pub message: String,
}

impl Diagnostic {
    /// Create a diagnostic with a message
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

// =============================================================================
// Master Time Table
// =============================================================================

/// One row of the master time table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeTableRow {
    /// Elapsed simulation time in days
    pub offset_days: f64,
    /// Calendar date packed as `YYYYMMDD.fraction_of_day`
    pub packed_date: f64,
}

/// Master time table: one row per simulation step, including the
/// pre-simulation state at row 0
///
/// Row index and step number follow a fixed offset convention: the row for
/// step `n` is `n + 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MasterTimeTable {
    rows: Vec<TimeTableRow>,
}

impl MasterTimeTable {
    /// Create a table from its rows
    pub fn new(rows: Vec<TimeTableRow>) -> Self {
        Self { rows }
    }

    /// Create a table from `(offset_days, packed_date)` pairs
    pub fn from_pairs(pairs: &[(f64, f64)]) -> Self {
        Self {
            rows: pairs
                .iter()
                .map(|&(offset_days, packed_date)| TimeTableRow {
                    offset_days,
                    packed_date,
                })
                .collect(),
        }
    }

    /// Number of rows, including the pre-simulation row
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows at all
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of simulation steps (rows minus the pre-simulation state)
    pub fn step_count(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }

    /// Row by raw index
    pub fn row(&self, index: usize) -> Option<&TimeTableRow> {
        self.rows.get(index)
    }

    /// Row for a simulation step number (row 0 is the pre-simulation state)
    pub fn row_for_step(&self, step: i64) -> Option<&TimeTableRow> {
        let index = usize::try_from(step.checked_add(1)?).ok()?;
        self.rows.get(index)
    }
}

// =============================================================================
// Well Cube
// =============================================================================

/// Dense 3-axis well data block, indexed `[well][variable][step]`
///
/// The step axis follows the master time table minus its first row; the well
/// and variable axes follow the archive's fixed-order catalogs.
#[derive(Debug, Clone, PartialEq)]
pub struct WellCube {
    /// Raw values; `NAN` marks unpopulated cells
    pub data: Array3<f64>,
}

impl WellCube {
    /// Wrap a dense array as a well cube
    pub fn new(data: Array3<f64>) -> Self {
        Self { data }
    }

    /// Number of wells (first axis)
    pub fn well_count(&self) -> usize {
        self.data.dim().0
    }

    /// Number of variables (second axis)
    pub fn variable_count(&self) -> usize {
        self.data.dim().1
    }

    /// Declared number of steps (third axis)
    pub fn step_count(&self) -> usize {
        self.data.dim().2
    }
}
