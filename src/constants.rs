//! Application constants for the restart processor
//!
//! This module contains the archive layout markers, identifier rules and
//! default values used throughout the extraction pipeline.

// =============================================================================
// Archive Section Layout
// =============================================================================

/// Hierarchy separator in dataset paths
pub const PATH_SEPARATOR: char = '/';

/// Archive section markers, matched against the first path segment after the root
pub mod sections {
    /// Spatial (per-cell) restart data: `/RESTART/<step>/<variable>`
    pub const SPATIAL: &str = "RESTART";

    /// Well time-series data: `/WELLS/<variable>`
    pub const WELLS: &str = "WELLS";
}

// =============================================================================
// Identifier Grammar
// =============================================================================

/// Identifier rules for sanitized table keys
///
/// Emitted identifiers match `[A-Z_][A-Z0-9_]*`: uppercase, no leading digit,
/// no leading/trailing/double underscores.
pub mod identifiers {
    /// Placeholder returned when sanitization consumes the entire label
    pub const FALLBACK: &str = "VAR";

    /// Marker prefixed to identifiers that would otherwise start with a digit
    pub const DIGIT_PREFIX: &str = "V";
}

// =============================================================================
// Well Series Defaults
// =============================================================================

/// Prefix for synthetic well names when origin metadata is absent (1-based)
pub const SYNTHETIC_WELL_PREFIX: &str = "WELL";

/// Default temporal decimation stride (1 = keep every step)
pub const DEFAULT_STRIDE: usize = 1;
