//! Main collator entry points
//!
//! [`ArchiveCollator`] validates its configuration once and exposes the two
//! extraction operations over any [`ArchiveIndex`] implementation. Both are
//! pure functions of the archive snapshot: all derived tables are built in a
//! single pass and nothing is cached across calls.

use crate::app::services::archive::ArchiveIndex;
use crate::app::services::collator::spatial::{self, SpatialTables};
use crate::app::services::collator::wells::{self, WellTables};
use crate::config::ExtractionConfig;
use crate::Result;

/// Collation engine over a restart archive snapshot
///
/// # Example
///
/// ```rust
/// use restart_processor::{ArchiveCollator, ExtractionConfig, MemoryArchive};
///
/// # fn example() -> restart_processor::Result<()> {
/// let mut archive = MemoryArchive::new();
/// archive.insert_dataset("/RESTART/000000/PRESSURE", vec![210.0, 215.0]);
///
/// let collator = ArchiveCollator::new(ExtractionConfig::default())?;
/// let tables = collator.extract_spatial(&archive)?;
///
/// assert_eq!(tables.matrices["PRESSURE"].dim(), (2, 1));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ArchiveCollator {
    config: ExtractionConfig,
}

impl ArchiveCollator {
    /// Create a collator with a validated configuration
    pub fn new(config: ExtractionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration this collator runs with
    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Extract the spatial section into dense per-variable matrices
    ///
    /// Fails with [`Error::EmptySection`](crate::Error::EmptySection) when
    /// the archive holds no spatial paths; every other irregularity is
    /// reported in the output diagnostics.
    pub fn extract_spatial<A>(&self, archive: &A) -> Result<SpatialTables>
    where
        A: ArchiveIndex + Sync,
    {
        spatial::collate(archive)
    }

    /// Extract the well section into stride-decimated per-well series
    ///
    /// Fails with [`Error::EmptySection`](crate::Error::EmptySection) when
    /// the archive has no well cube or the cube holds no wells.
    pub fn extract_well_series<A>(&self, archive: &A) -> Result<WellTables>
    where
        A: ArchiveIndex,
    {
        wells::collate(archive, self.config.stride)
    }
}
