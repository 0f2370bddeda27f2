//! Time axis alignment against the master time table
//!
//! The archive addresses spatial data by step token and well data by row
//! index; the master time table is the single source of wall-clock truth for
//! both. This module maps step tokens to table rows (row = step + 1, row 0
//! being the pre-simulation state), decodes packed `YYYYMMDD.fraction` dates,
//! and produces the stride-decimated index selection for dense well series.

use crate::app::models::{Diagnostic, DiagnosticKind, MasterTimeTable};
use crate::app::services::axis_indexer::TimestepAxis;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use tracing::{debug, warn};

/// Nanoseconds per day, for fractional-day offsets
const NANOS_PER_DAY: f64 = 86_400.0 * 1e9;

/// A resolved wall-clock axis: linear day counts and calendar timestamps
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeAxis {
    /// Elapsed simulation days, one per selected step
    pub days: Vec<f64>,
    /// Decoded calendar timestamps, one per selected step
    pub dates: Vec<NaiveDateTime>,
}

/// Stride-decimated selection over a dense step range
#[derive(Debug, Clone, PartialEq)]
pub struct StrideSelection {
    /// Selected step indices within `[0, n_steps)`
    pub indices: Vec<usize>,
    /// Stride actually applied after clamping
    pub stride_used: usize,
}

/// Decode a packed `YYYYMMDD.fraction` date into a calendar timestamp
///
/// The integer part is the calendar date, the fractional part the fraction
/// of that day, resolved to nanoseconds. Returns `None` for non-finite
/// values and impossible calendar dates.
pub fn decode_packed_date(packed: f64) -> Option<NaiveDateTime> {
    // 101.0 encodes the smallest expressible date, 0000-01-01
    if !packed.is_finite() || packed < 101.0 {
        return None;
    }

    let whole = packed.trunc();
    let fraction = packed - whole;
    let digits = whole as i64;

    let year = i32::try_from(digits / 10_000).ok()?;
    let month = u32::try_from((digits / 100) % 100).ok()?;
    let day = u32::try_from(digits % 100).ok()?;

    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let nanos = (fraction * NANOS_PER_DAY).round() as i64;
    Some(date.and_hms_opt(0, 0, 0)? + Duration::nanoseconds(nanos))
}

/// Align a spatial timestep axis to the master time table
///
/// Each step token is parsed as an integer step number and looked up at table
/// row `step + 1`. Any parse failure, out-of-range row or undecodable date
/// degrades the whole alignment: a diagnostic is recorded and an empty time
/// axis returned, leaving the spatial matrices themselves untouched.
pub fn align_steps(axis: &TimestepAxis, table: &MasterTimeTable) -> (TimeAxis, Vec<Diagnostic>) {
    let mut aligned = TimeAxis::default();

    for step in axis.steps() {
        let parsed = step.token.parse::<i64>();
        let row = parsed.ok().and_then(|number| table.row_for_step(number));

        let Some(row) = row else {
            warn!(token = %step.token, "step token not alignable to time table");
            let diagnostic = Diagnostic::new(
                DiagnosticKind::TimeAlignmentFailed,
                format!(
                    "step token '{}' has no time table row, time axis left empty",
                    step.token
                ),
            );
            return (TimeAxis::default(), vec![diagnostic]);
        };

        let Some(date) = decode_packed_date(row.packed_date) else {
            warn!(packed = row.packed_date, "undecodable packed date");
            let diagnostic = Diagnostic::new(
                DiagnosticKind::TimeAlignmentFailed,
                format!(
                    "packed date {} for step '{}' is not decodable, time axis left empty",
                    row.packed_date, step.token
                ),
            );
            return (TimeAxis::default(), vec![diagnostic]);
        };

        aligned.days.push(row.offset_days);
        aligned.dates.push(date);
    }

    (aligned, Vec::new())
}

/// Compute the stride-decimated index selection for `n_steps` dense steps
///
/// A stride larger than the step count is clamped so the selection is never
/// empty while steps exist; zero available steps yield an empty selection.
/// Both degraded cases emit a diagnostic.
pub fn stride_indices(n_steps: usize, stride: usize) -> (StrideSelection, Vec<Diagnostic>) {
    let mut diagnostics = Vec::new();

    if n_steps == 0 {
        diagnostics.push(Diagnostic::new(
            DiagnosticKind::EmptySelection,
            "no steps available to select from",
        ));
        return (
            StrideSelection {
                indices: Vec::new(),
                stride_used: stride,
            },
            diagnostics,
        );
    }

    let stride_used = if stride > n_steps {
        warn!(stride, n_steps, "stride exceeds available steps, clamping");
        diagnostics.push(Diagnostic::new(
            DiagnosticKind::StrideClamped,
            format!("stride {stride} exceeds {n_steps} available steps, clamped to {n_steps}"),
        ));
        n_steps
    } else {
        stride
    };

    let indices = (0..n_steps).step_by(stride_used).collect();
    (
        StrideSelection {
            indices,
            stride_used,
        },
        diagnostics,
    )
}

/// Resolve selected step indices to their wall-clock rows
///
/// Step index `i` reads table row `i + 1` (row 0 is the pre-simulation
/// state). An out-of-range row or undecodable date degrades the whole axis
/// to empty with a diagnostic; the caller's step selection itself survives.
pub fn align_rows(table: &MasterTimeTable, indices: &[usize]) -> (TimeAxis, Vec<Diagnostic>) {
    let mut aligned = TimeAxis::default();

    for &index in indices {
        let resolved = table
            .row(index + 1)
            .and_then(|row| decode_packed_date(row.packed_date).map(|date| (row, date)));

        let Some((row, date)) = resolved else {
            warn!(index, "step index not alignable to time table");
            let diagnostic = Diagnostic::new(
                DiagnosticKind::TimeAlignmentFailed,
                format!("step index {index} has no decodable time table row, time axis left empty"),
            );
            return (TimeAxis::default(), vec![diagnostic]);
        };

        aligned.days.push(row.offset_days);
        aligned.dates.push(date);
    }

    (aligned, Vec::new())
}

/// Align a dense well series to the master time table with stride decimation
///
/// Row 0 (the pre-simulation state) is dropped, so the series has
/// `table.len() - 1` entries; selected indices map to table rows `index + 1`.
pub fn align_series(
    table: &MasterTimeTable,
    stride: usize,
) -> (StrideSelection, TimeAxis, Vec<Diagnostic>) {
    let n_steps = table.step_count();
    let (selection, mut diagnostics) = stride_indices(n_steps, stride);

    debug!(
        n_steps,
        selected = selection.indices.len(),
        stride = selection.stride_used,
        "series selection computed"
    );

    let (aligned, align_diagnostics) = align_rows(table, &selection.indices);
    diagnostics.extend(align_diagnostics);

    (selection, aligned, diagnostics)
}
