//! Timestep axis discovery
//!
//! Step tokens arrive from the archive in whatever order the path map yields
//! them, may repeat, and are not guaranteed to parse as numbers. The axis
//! indexer reduces them to a deterministic column axis: unique tokens, numeric
//! tokens sorted ascending first, non-numeric tokens after them in first-seen
//! order, column index = position.

use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// One discovered timestep
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Timestep {
    /// Raw step token as it appears in dataset paths
    pub token: String,
    /// Parsed numeric value, `NAN` for tokens that do not parse
    pub value: f64,
}

/// Ordered, de-duplicated timestep axis with token-to-column lookup
///
/// Invariants: no duplicate tokens; numeric tokens strictly ascending before
/// any non-numeric token; column indices 0-based and contiguous.
#[derive(Debug, Clone, Default)]
pub struct TimestepAxis {
    steps: Vec<Timestep>,
    columns: HashMap<String, usize>,
}

impl TimestepAxis {
    /// Build the axis from raw step tokens
    pub fn index<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut unique: Vec<String> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        for token in tokens {
            let token = token.as_ref().trim();
            if token.is_empty() {
                continue;
            }
            if seen.insert(token.to_string()) {
                unique.push(token.to_string());
            }
        }

        let mut steps: Vec<Timestep> = unique
            .into_iter()
            .map(|token| {
                let value = token.parse::<f64>().unwrap_or(f64::NAN);
                Timestep { token, value }
            })
            .collect();

        // Stable sort: non-numeric tokens keep first-seen order after all
        // numeric tokens
        steps.sort_by(|a, b| {
            a.value
                .is_nan()
                .cmp(&b.value.is_nan())
                .then(a.value.partial_cmp(&b.value).unwrap_or(std::cmp::Ordering::Equal))
        });

        let columns = steps
            .iter()
            .enumerate()
            .map(|(index, step)| (step.token.clone(), index))
            .collect();

        Self { steps, columns }
    }

    /// Column index for a step token
    pub fn column(&self, token: &str) -> Option<usize> {
        self.columns.get(token.trim()).copied()
    }

    /// Ordered timesteps
    pub fn steps(&self) -> &[Timestep] {
        &self.steps
    }

    /// Ordered raw tokens
    pub fn tokens(&self) -> Vec<&str> {
        self.steps.iter().map(|step| step.token.as_str()).collect()
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the axis is empty
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
