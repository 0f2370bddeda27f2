//! Collation orchestration for restart archives
//!
//! This module coordinates the complete extraction pipeline over an archive
//! snapshot, producing the two analysis-ready outputs: per-variable spatial
//! matrices and per-well time series.
//!
//! # Architecture
//!
//! The module is organized into logical components:
//! - [`processor`] - Main ArchiveCollator struct and entry points
//! - [`spatial`] - Spatial section pipeline: classify, index, assemble, align
//! - [`wells`] - Well section pipeline: cube slicing, stride, renaming
//! - [`stats`] - Extraction summary statistics
//!
//! # Processing Pipeline
//!
//! The spatial pipeline runs in four stages:
//!
//! 1. **Classification**: every archive path is parsed; the classified-path
//!    table is sorted so results never depend on the archive's unspecified
//!    iteration order
//! 2. **Catalog discovery**: the timestep axis and variable catalog are
//!    frozen before any data is read
//! 3. **Assembly**: per-variable dense matrices are filled in parallel
//! 4. **Time alignment**: step tokens are resolved against the master time
//!    table
//!
//! The well pipeline reconciles the cube's declared step count with the
//! master time table, subsamples at the configured stride, and renames
//! component-suffixed variables.
//!
//! # Degraded Modes
//!
//! Every recoverable condition is isolated to its smallest unit of work and
//! recorded as a [`Diagnostic`](crate::app::models::Diagnostic) on the
//! output; only an entirely empty section is fatal.

pub mod processor;
pub mod spatial;
pub mod stats;
pub mod wells;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use processor::ArchiveCollator;
pub use spatial::SpatialTables;
pub use stats::ExtractionStats;
pub use wells::WellTables;
