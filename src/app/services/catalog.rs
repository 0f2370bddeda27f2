//! Variable and well name catalogs
//!
//! A catalog establishes the stable, de-duplicated ordering of original
//! tokens and their 1:1 mapping to sanitized output identifiers. Identifiers
//! stay unique even when two distinct tokens collapse to the same sanitized
//! string: later arrivals are suffix-disambiguated in first-seen order and
//! the collision is reported through the diagnostics channel rather than
//! silently overwriting data.

use crate::app::models::{Diagnostic, DiagnosticKind};
use crate::app::services::identifier::sanitize;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::warn;

/// One catalog entry: original token and its unique output identifier
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogEntry {
    /// Token as it appears in the archive
    pub token: String,
    /// Sanitized, collision-free identifier
    pub identifier: String,
}

/// Ordered, de-duplicated token catalog with unique identifiers
#[derive(Debug, Clone, Default)]
pub struct VariableCatalog {
    entries: Vec<CatalogEntry>,
    positions: HashMap<String, usize>,
}

impl VariableCatalog {
    /// Build a catalog from tokens in first-seen order
    ///
    /// Duplicate tokens are dropped. Distinct tokens whose sanitized forms
    /// collide get `_2`, `_3`, … suffixes in arrival order; each collision
    /// emits an [`DiagnosticKind::IdentifierCollision`] diagnostic.
    pub fn build<I, S>(tokens: I) -> (Self, Vec<Diagnostic>)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut catalog = Self::default();
        let mut diagnostics = Vec::new();
        let mut taken: HashSet<String> = HashSet::new();

        for token in tokens {
            let token = token.as_ref();
            if token.is_empty() || catalog.positions.contains_key(token) {
                continue;
            }

            let base = sanitize(token);
            let mut identifier = base.clone();
            let mut suffix = 2usize;
            while !taken.insert(identifier.clone()) {
                identifier = format!("{base}_{suffix}");
                suffix += 1;
            }

            if identifier != base {
                warn!(
                    token,
                    %identifier, "identifier collision, disambiguated with suffix"
                );
                diagnostics.push(Diagnostic::new(
                    DiagnosticKind::IdentifierCollision,
                    format!("token '{token}' collides on '{base}', renamed to '{identifier}'"),
                ));
            }

            catalog
                .positions
                .insert(token.to_string(), catalog.entries.len());
            catalog.entries.push(CatalogEntry {
                token: token.to_string(),
                identifier,
            });
        }

        (catalog, diagnostics)
    }

    /// Catalog position of an original token
    pub fn position(&self, token: &str) -> Option<usize> {
        self.positions.get(token).copied()
    }

    /// Identifier assigned to an original token
    pub fn identifier(&self, token: &str) -> Option<&str> {
        self.position(token)
            .map(|index| self.entries[index].identifier.as_str())
    }

    /// Ordered entries
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Ordered identifiers
    pub fn identifiers(&self) -> Vec<&str> {
        self.entries
            .iter()
            .map(|entry| entry.identifier.as_str())
            .collect()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
