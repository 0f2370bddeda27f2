//! Extraction summary statistics

use crate::app::models::{Diagnostic, DiagnosticKind};
use serde::Serialize;

/// Summary counters for a spatial extraction run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExtractionStats {
    /// Paths listed by the archive
    pub paths_listed: usize,
    /// Paths classified into the spatial section
    pub spatial_paths: usize,
    /// Unique variables discovered
    pub variables: usize,
    /// Unique timesteps discovered
    pub steps: usize,
    /// Entries skipped because their dataset could not be read
    pub entries_skipped: usize,
    /// Vectors reconciled against an established row count
    pub length_mismatches: usize,
}

impl ExtractionStats {
    /// Fold diagnostic counts into the stats
    pub fn absorb_diagnostics(&mut self, diagnostics: &[Diagnostic]) {
        for diagnostic in diagnostics {
            match diagnostic.kind {
                DiagnosticKind::EntrySkipped => self.entries_skipped += 1,
                DiagnosticKind::LengthMismatch => self.length_mismatches += 1,
                _ => {}
            }
        }
    }

    /// One-line summary for logging
    pub fn summary(&self) -> String {
        format!(
            "{} paths, {} spatial, {} variables x {} steps ({} skipped, {} reconciled)",
            self.paths_listed,
            self.spatial_paths,
            self.variables,
            self.steps,
            self.entries_skipped,
            self.length_mismatches
        )
    }
}
