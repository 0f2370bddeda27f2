//! Well time-series extraction from the dense well cube
//!
//! The well cube is a 3-axis block `[well][variable][step]` whose axes follow
//! the archive's fixed-order catalogs. The extractor slices one series per
//! (well, variable) pair, subsamples it at the stride-derived indices, and
//! runs a rename post-pass that resolves trailing-numeric variable suffixes
//! against the component table (`X2` becomes `X_CO2` when component 2 is
//! `CO2`). Missing well-name metadata degrades to synthetic `WELL<n>` names.

use crate::app::models::{Diagnostic, DiagnosticKind, WellCube};
use crate::app::services::component_resolver::ComponentResolver;
use crate::app::services::identifier::sanitize;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// Extracted series for every well, keyed `well id -> variable id -> values`
pub type WellSeriesMap = HashMap<String, HashMap<String, Vec<f64>>>;

/// Result of a well-series extraction pass
#[derive(Debug, Clone)]
pub struct ExtractedWellSeries {
    /// Per-well, per-variable subsampled series
    pub series: WellSeriesMap,
    /// Well identifiers in cube axis order
    pub well_ids: Vec<String>,
    /// Variable identifiers in cube axis order, after the rename post-pass
    pub variable_ids: Vec<String>,
    /// Steps actually used after reconciling cube and time table
    pub steps_used: usize,
    /// Recoverable conditions observed while extracting
    pub diagnostics: Vec<Diagnostic>,
}

/// Slices, subsamples and renames well series out of the cube
pub struct WellSeriesExtractor<'a> {
    resolver: &'a ComponentResolver,
}

impl<'a> WellSeriesExtractor<'a> {
    /// Create an extractor renaming through the given component resolver
    pub fn new(resolver: &'a ComponentResolver) -> Self {
        Self { resolver }
    }

    /// Extract all (well, variable) series at the given step indices
    ///
    /// `well_names` may be absent; synthetic 1-based `WELL<n>` names are
    /// substituted with a diagnostic. `steps_used` caps the usable step range
    /// (the caller reconciles cube and time-table step counts); selection
    /// indices at or beyond it are ignored.
    pub fn extract(
        &self,
        cube: &WellCube,
        well_names: Option<&[String]>,
        variable_names: &[String],
        indices: &[usize],
        steps_used: usize,
    ) -> ExtractedWellSeries {
        let mut diagnostics = Vec::new();

        let well_tokens = match well_names {
            Some(names) => self.reconcile_axis_names(
                names,
                cube.well_count(),
                "well names",
                &mut diagnostics,
            ),
            None => {
                warn!(
                    wells = cube.well_count(),
                    "well origin metadata absent, using synthetic names"
                );
                diagnostics.push(Diagnostic::new(
                    DiagnosticKind::WellNamesMissing,
                    format!(
                        "well origin metadata absent, using synthetic names for {} wells",
                        cube.well_count()
                    ),
                ));
                (1..=cube.well_count())
                    .map(|index| format!("{}{index}", crate::constants::SYNTHETIC_WELL_PREFIX))
                    .collect()
            }
        };

        let variable_tokens = self.reconcile_axis_names(
            variable_names,
            cube.variable_count(),
            "well variable names",
            &mut diagnostics,
        );

        // Wells and variables get independently collision-free identifiers,
        // one per cube axis position
        let well_ids = axis_identifiers(&well_tokens, &mut diagnostics);
        let base_variable_ids = axis_identifiers(&variable_tokens, &mut diagnostics);

        let usable: Vec<usize> = indices
            .iter()
            .copied()
            .filter(|&index| index < steps_used)
            .collect();

        let mut series: WellSeriesMap = HashMap::new();
        for (well_axis, well_id) in well_ids.iter().enumerate() {
            let mut per_well: HashMap<String, Vec<f64>> = HashMap::new();
            for (variable_axis, variable_id) in base_variable_ids.iter().enumerate() {
                let values: Vec<f64> = usable
                    .iter()
                    .map(|&step| cube.data[[well_axis, variable_axis, step]])
                    .collect();
                per_well.insert(variable_id.clone(), values);
            }
            series.insert(well_id.clone(), per_well);
        }

        let variable_ids =
            self.rename_component_suffixes(&mut series, &base_variable_ids, &mut diagnostics);

        debug!(
            wells = well_ids.len(),
            variables = variable_ids.len(),
            steps = usable.len(),
            "well series extracted"
        );

        ExtractedWellSeries {
            series,
            well_ids,
            variable_ids,
            steps_used,
            diagnostics,
        }
    }

    /// Trim or pad an axis-name list to the cube's axis length
    fn reconcile_axis_names(
        &self,
        names: &[String],
        axis_len: usize,
        what: &str,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Vec<String> {
        if names.len() != axis_len {
            warn!(
                declared = names.len(),
                axis = axis_len,
                what,
                "axis name count disagrees with cube axis"
            );
            diagnostics.push(Diagnostic::new(
                DiagnosticKind::SeriesLengthMismatch,
                format!(
                    "{what}: {} declared vs {axis_len} cube entries, clamped to the smaller",
                    names.len()
                ),
            ));
        }
        let mut tokens: Vec<String> = names.iter().take(axis_len).cloned().collect();
        // Unnamed trailing axis positions still need stable identifiers
        for index in tokens.len()..axis_len {
            tokens.push(format!("{}{}", crate::constants::identifiers::FALLBACK, index + 1));
        }
        tokens
    }

    /// Rename `BASE<digits>` variable identifiers through the component table
    ///
    /// Applied after the base series are built; renames replace the original
    /// entry in every well. Unresolvable suffixes stay as they are, and a
    /// rename that would collide with an existing identifier is skipped.
    fn rename_component_suffixes(
        &self,
        series: &mut WellSeriesMap,
        existing: &[String],
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Vec<String> {
        let suffix = Regex::new(r"^(?P<base>[A-Z0-9_]*[A-Z_])(?P<index>[0-9]+)$")
            .expect("static suffix pattern");

        let mut variable_ids = Vec::with_capacity(existing.len());

        for identifier in existing {
            let renamed = suffix.captures(identifier).and_then(|captures| {
                let index: usize = captures["index"].parse().ok()?;
                self.resolver.lookup(index)?;
                Some(self.resolver.resolve(&captures["base"], index))
            });

            let Some(renamed) = renamed else {
                variable_ids.push(identifier.clone());
                continue;
            };

            if existing.contains(&renamed) || variable_ids.contains(&renamed) {
                warn!(%identifier, %renamed, "component rename collides, keeping original");
                diagnostics.push(Diagnostic::new(
                    DiagnosticKind::IdentifierCollision,
                    format!("rename of '{identifier}' to '{renamed}' collides, keeping original"),
                ));
                variable_ids.push(identifier.clone());
                continue;
            }

            debug!(%identifier, %renamed, "component suffix resolved");
            for per_well in series.values_mut() {
                if let Some(values) = per_well.remove(identifier) {
                    per_well.insert(renamed.clone(), values);
                }
            }
            variable_ids.push(renamed);
        }

        variable_ids
    }
}

/// Sanitize axis tokens into one unique identifier per axis position
///
/// Unlike catalog building, exact duplicate tokens are kept (every axis
/// position owns its own data) and disambiguated like any other collision.
fn axis_identifiers(tokens: &[String], diagnostics: &mut Vec<Diagnostic>) -> Vec<String> {
    let mut taken: HashSet<String> = HashSet::new();
    let mut identifiers = Vec::with_capacity(tokens.len());

    for token in tokens {
        let base = sanitize(token);
        let mut identifier = base.clone();
        let mut suffix = 2usize;
        while !taken.insert(identifier.clone()) {
            identifier = format!("{base}_{suffix}");
            suffix += 1;
        }
        if identifier != base {
            warn!(%token, %identifier, "identifier collision, disambiguated with suffix");
            diagnostics.push(Diagnostic::new(
                DiagnosticKind::IdentifierCollision,
                format!("token '{token}' collides on '{base}', renamed to '{identifier}'"),
            ));
        }
        identifiers.push(identifier);
    }

    identifiers
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    fn cube(wells: usize, variables: usize, steps: usize) -> WellCube {
        // Cell value encodes its coordinates for easy assertions
        WellCube::new(Array3::from_shape_fn(
            (wells, variables, steps),
            |(w, v, s)| (w * 100 + v * 10 + s) as f64,
        ))
    }

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_series_sliced_per_well_and_variable() {
        let resolver = ComponentResolver::new(None);
        let extractor = WellSeriesExtractor::new(&resolver);

        let extracted = extractor.extract(
            &cube(2, 2, 3),
            Some(&names(&["P1", "I1"])),
            &names(&["WBHP", "WOPR"]),
            &[0, 1, 2],
            3,
        );

        assert_eq!(extracted.well_ids, vec!["P1", "I1"]);
        assert_eq!(extracted.series["P1"]["WBHP"], vec![0.0, 1.0, 2.0]);
        assert_eq!(extracted.series["I1"]["WOPR"], vec![110.0, 111.0, 112.0]);
        assert!(extracted.diagnostics.is_empty());
    }

    #[test]
    fn test_stride_indices_subsample() {
        let resolver = ComponentResolver::new(None);
        let extractor = WellSeriesExtractor::new(&resolver);

        let extracted = extractor.extract(
            &cube(1, 1, 6),
            Some(&names(&["P1"])),
            &names(&["WBHP"]),
            &[0, 2, 4],
            6,
        );

        assert_eq!(extracted.series["P1"]["WBHP"], vec![0.0, 2.0, 4.0]);
    }

    #[test]
    fn test_indices_beyond_usable_steps_ignored() {
        let resolver = ComponentResolver::new(None);
        let extractor = WellSeriesExtractor::new(&resolver);

        let extracted = extractor.extract(
            &cube(1, 1, 6),
            Some(&names(&["P1"])),
            &names(&["WBHP"]),
            &[0, 2, 4],
            3,
        );

        assert_eq!(extracted.series["P1"]["WBHP"], vec![0.0, 2.0]);
        assert_eq!(extracted.steps_used, 3);
    }

    #[test]
    fn test_synthetic_well_names_when_metadata_absent() {
        let resolver = ComponentResolver::new(None);
        let extractor = WellSeriesExtractor::new(&resolver);

        let extracted = extractor.extract(&cube(2, 1, 2), None, &names(&["WBHP"]), &[0, 1], 2);

        assert_eq!(extracted.well_ids, vec!["WELL1", "WELL2"]);
        assert!(
            extracted
                .diagnostics
                .iter()
                .any(|d| d.kind == DiagnosticKind::WellNamesMissing)
        );
    }

    #[test]
    fn test_component_suffix_renamed() {
        let resolver =
            ComponentResolver::new(Some(vec!["H2O".to_string(), "CO2".to_string()]));
        let extractor = WellSeriesExtractor::new(&resolver);

        let extracted = extractor.extract(
            &cube(1, 2, 2),
            Some(&names(&["P1"])),
            &names(&["X2", "WBHP"]),
            &[0, 1],
            2,
        );

        assert_eq!(extracted.variable_ids, vec!["X_CO2", "WBHP"]);
        assert_eq!(extracted.series["P1"]["X_CO2"], vec![0.0, 1.0]);
        assert!(!extracted.series["P1"].contains_key("X2"));
    }

    #[test]
    fn test_out_of_range_suffix_left_unchanged() {
        let resolver =
            ComponentResolver::new(Some(vec!["H2O".to_string(), "CO2".to_string()]));
        let extractor = WellSeriesExtractor::new(&resolver);

        let extracted = extractor.extract(
            &cube(1, 1, 2),
            Some(&names(&["P1"])),
            &names(&["X9"]),
            &[0, 1],
            2,
        );

        assert_eq!(extracted.variable_ids, vec!["X9"]);
        assert!(extracted.series["P1"].contains_key("X9"));
    }

    #[test]
    fn test_no_component_table_disables_renaming() {
        let resolver = ComponentResolver::new(None);
        let extractor = WellSeriesExtractor::new(&resolver);

        let extracted = extractor.extract(
            &cube(1, 1, 2),
            Some(&names(&["P1"])),
            &names(&["X2"]),
            &[0, 1],
            2,
        );

        assert_eq!(extracted.variable_ids, vec!["X2"]);
    }

    #[test]
    fn test_rename_collision_keeps_original() {
        let resolver = ComponentResolver::new(Some(vec!["CO2".to_string()]));
        let extractor = WellSeriesExtractor::new(&resolver);

        // X1 would rename to X_CO2, which already exists as a variable
        let extracted = extractor.extract(
            &cube(1, 2, 2),
            Some(&names(&["P1"])),
            &names(&["X1", "X_CO2"]),
            &[0, 1],
            2,
        );

        assert_eq!(extracted.variable_ids, vec!["X1", "X_CO2"]);
        assert!(
            extracted
                .diagnostics
                .iter()
                .any(|d| d.kind == DiagnosticKind::IdentifierCollision)
        );
    }

    #[test]
    fn test_duplicate_well_names_keep_their_own_series() {
        let resolver = ComponentResolver::new(None);
        let extractor = WellSeriesExtractor::new(&resolver);

        let extracted = extractor.extract(
            &cube(2, 1, 2),
            Some(&names(&["P1", "P1"])),
            &names(&["WBHP"]),
            &[0, 1],
            2,
        );

        assert_eq!(extracted.well_ids, vec!["P1", "P1_2"]);
        assert_eq!(extracted.series["P1"]["WBHP"], vec![0.0, 1.0]);
        assert_eq!(extracted.series["P1_2"]["WBHP"], vec![100.0, 101.0]);
        assert!(
            extracted
                .diagnostics
                .iter()
                .any(|d| d.kind == DiagnosticKind::IdentifierCollision)
        );
    }

    #[test]
    fn test_axis_name_mismatch_clamped() {
        let resolver = ComponentResolver::new(None);
        let extractor = WellSeriesExtractor::new(&resolver);

        let extracted = extractor.extract(
            &cube(1, 2, 2),
            Some(&names(&["P1"])),
            &names(&["WBHP", "WOPR", "WGOR"]),
            &[0, 1],
            2,
        );

        assert_eq!(extracted.variable_ids, vec!["WBHP", "WOPR"]);
        assert!(
            extracted
                .diagnostics
                .iter()
                .any(|d| d.kind == DiagnosticKind::SeriesLengthMismatch)
        );
    }
}
