//! Component name resolution for numerically-suffixed variables
//!
//! Restart archives store per-component quantities under names like `X2`,
//! where the suffix is a 1-based index into an ordered component table
//! (e.g. `H2O`, `CO2`). The resolver maps such a suffix back to its display
//! name so output identifiers read `X_CO2` instead of `X2`. The table is
//! optional archive metadata: when it is absent the resolver degrades to
//! pass-through naming and the extraction continues.

use crate::app::services::identifier::sanitize;
use tracing::debug;

/// Maps 1-based component indices to display names
///
/// Built once per extraction from the archive's component table, or from
/// `None` when the table is unavailable.
#[derive(Debug, Clone)]
pub struct ComponentResolver {
    names: Option<Vec<String>>,
}

impl ComponentResolver {
    /// Build a resolver from an optional ordered component table
    pub fn new(names: Option<Vec<String>>) -> Self {
        if let Some(names) = &names {
            debug!("component table loaded with {} entries", names.len());
        } else {
            debug!("no component table available, renaming disabled");
        }
        Self { names }
    }

    /// Whether a component table is available at all
    pub fn is_available(&self) -> bool {
        self.names.is_some()
    }

    /// Component display name for a 1-based index, if resolvable
    pub fn lookup(&self, index: usize) -> Option<&str> {
        let names = self.names.as_ref()?;
        if index == 0 {
            return None;
        }
        names.get(index - 1).map(String::as_str)
    }

    /// Resolve a base name and 1-based component index into an identifier
    ///
    /// In range: `sanitize(base + "_" + name)`. Absent table or out-of-range
    /// index: `sanitize(base + index)`, i.e. the name is left numeric.
    pub fn resolve(&self, base: &str, index: usize) -> String {
        match self.lookup(index) {
            Some(name) => sanitize(&format!("{base}_{name}")),
            None => sanitize(&format!("{base}{index}")),
        }
    }
}
