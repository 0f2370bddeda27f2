//! Configuration for extraction runs.
//!
//! Provides the configuration structure for collation parameters and the
//! validation rules applied before an extraction starts. Configuration is
//! plain data; loading it from files or flags is a caller concern.

use crate::constants::DEFAULT_STRIDE;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Extraction configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Temporal decimation stride for well series (select every Nth step)
    ///
    /// Must be at least 1. Strides larger than the available step count are
    /// clamped at extraction time with a diagnostic, not rejected here.
    pub stride: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            stride: DEFAULT_STRIDE,
        }
    }
}

impl ExtractionConfig {
    /// Create a configuration with the given well-series stride
    pub fn with_stride(stride: usize) -> Self {
        Self { stride }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.stride == 0 {
            return Err(Error::configuration(
                "stride must be at least 1 (1 keeps every step)",
            ));
        }
        Ok(())
    }
}
