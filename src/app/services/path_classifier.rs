//! Dataset path classification
//!
//! Restart archives address their datasets through hierarchical paths. Two
//! layouts matter for collation: the spatial section addresses by folder and
//! step index (`/RESTART/<step>/<variable>`), the well section by variable
//! only (`/WELLS/<variable>`). Everything else is classified as `Other`;
//! paths too short for their section are rejected outright.

use crate::app::models::{ClassifiedPath, Section};
use crate::constants::{PATH_SEPARATOR, sections};

/// Parse a dataset path into its addressing parts
///
/// Returns `None` for degenerate paths and for marker paths with too few
/// segments. Rejection is silent filtering, not an error: rejected paths
/// simply never enter any catalog.
pub fn classify(path: &str) -> Option<ClassifiedPath> {
    let segments: Vec<&str> = path
        .split(PATH_SEPARATOR)
        .filter(|segment| !segment.is_empty())
        .collect();

    let (&marker, rest) = segments.split_first()?;

    let (section, step_token, variable_token) = match marker {
        sections::SPATIAL => {
            // Requires both a step folder and a variable leaf
            if rest.len() < 2 {
                return None;
            }
            (
                Section::Spatial,
                Some(rest[0].trim().to_string()),
                rest[1].trim().to_string(),
            )
        }
        sections::WELLS => {
            if rest.is_empty() {
                return None;
            }
            (Section::WellSeries, None, rest[0].trim().to_string())
        }
        _ => (Section::Other, None, segments.last()?.trim().to_string()),
    };

    Some(ClassifiedPath {
        path: path.to_string(),
        section,
        step_token,
        variable_token,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spatial_path() {
        let classified = classify("/RESTART/000010/PRESSURE").unwrap();
        assert_eq!(classified.section, Section::Spatial);
        assert_eq!(classified.step_token.as_deref(), Some("000010"));
        assert_eq!(classified.variable_token, "PRESSURE");
        assert_eq!(classified.path, "/RESTART/000010/PRESSURE");
    }

    #[test]
    fn test_spatial_path_without_leading_separator() {
        let classified = classify("RESTART/000002/SWAT").unwrap();
        assert_eq!(classified.section, Section::Spatial);
        assert_eq!(classified.step_token.as_deref(), Some("000002"));
    }

    #[test]
    fn test_well_path() {
        let classified = classify("/WELLS/WBHP").unwrap();
        assert_eq!(classified.section, Section::WellSeries);
        assert_eq!(classified.step_token, None);
        assert_eq!(classified.variable_token, "WBHP");
    }

    #[test]
    fn test_tokens_are_trimmed() {
        let classified = classify("/RESTART/ 000010 / PRESSURE ").unwrap();
        assert_eq!(classified.step_token.as_deref(), Some("000010"));
        assert_eq!(classified.variable_token, "PRESSURE");
    }

    #[test]
    fn test_short_marker_paths_rejected() {
        assert!(classify("/RESTART").is_none());
        assert!(classify("/RESTART/000010").is_none());
        assert!(classify("/WELLS").is_none());
    }

    #[test]
    fn test_degenerate_paths_rejected() {
        assert!(classify("").is_none());
        assert!(classify("/").is_none());
        assert!(classify("///").is_none());
    }

    #[test]
    fn test_unknown_sections_classified_as_other() {
        let classified = classify("/METADATA/GRID/DIMENSIONS").unwrap();
        assert_eq!(classified.section, Section::Other);
        assert_eq!(classified.variable_token, "DIMENSIONS");
    }

    #[test]
    fn test_deep_spatial_path_uses_leading_segments() {
        // Extra trailing segments do not shift the step/variable positions
        let classified = classify("/RESTART/000010/PRESSURE/extra").unwrap();
        assert_eq!(classified.step_token.as_deref(), Some("000010"));
        assert_eq!(classified.variable_token, "PRESSURE");
    }
}
