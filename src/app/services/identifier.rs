//! Label sanitization into stable table identifiers
//!
//! Raw archive labels carry units, brackets and separators that make poor
//! table keys. [`sanitize`] maps any label onto the identifier grammar
//! `[A-Z_][A-Z0-9_]*`: uppercase, no leading digit, no leading, trailing or
//! doubled underscores. The transform is total and idempotent.

use crate::constants::identifiers;

/// Sanitize a raw label into a stable identifier
///
/// Uppercases the label, strips parentheses, brackets and whitespace,
/// replaces every remaining character outside `[A-Z0-9_]` with `_`, collapses
/// underscore runs and trims the ends. An empty result falls back to a fixed
/// placeholder; a leading digit is prefixed with a non-digit marker. Never
/// fails and never returns an empty string.
pub fn sanitize(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut last_was_underscore = false;

    for ch in label.to_uppercase().chars() {
        // Stripped outright rather than replaced: units and bracketed
        // qualifiers should not leave underscore holes behind
        if matches!(ch, '(' | ')' | '[' | ']' | '{' | '}') || ch.is_whitespace() {
            continue;
        }

        let mapped = if ch.is_ascii_uppercase() || ch.is_ascii_digit() || ch == '_' {
            ch
        } else {
            '_'
        };

        if mapped == '_' {
            if last_was_underscore || out.is_empty() {
                continue;
            }
            last_was_underscore = true;
        } else {
            last_was_underscore = false;
        }
        out.push(mapped);
    }

    while out.ends_with('_') {
        out.pop();
    }

    if out.is_empty() {
        return identifiers::FALLBACK.to_string();
    }

    if out.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        return format!("{}{}", identifiers::DIGIT_PREFIX, out);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_labels_pass_through() {
        assert_eq!(sanitize("PRESSURE"), "PRESSURE");
        assert_eq!(sanitize("pressure"), "PRESSURE");
        assert_eq!(sanitize("WBHP"), "WBHP");
    }

    #[test]
    fn test_brackets_and_whitespace_are_stripped() {
        assert_eq!(sanitize("Pressure (bar)"), "PRESSUREBAR");
        assert_eq!(sanitize("  gas [sm3]  "), "GASSM3");
        assert_eq!(sanitize("a {b} c"), "ABC");
    }

    #[test]
    fn test_punctuation_becomes_single_underscore() {
        assert_eq!(sanitize("oil/rate"), "OIL_RATE");
        assert_eq!(sanitize("oil--rate"), "OIL_RATE");
        assert_eq!(sanitize("oil.:,rate"), "OIL_RATE");
    }

    #[test]
    fn test_edges_trimmed_no_double_underscores() {
        assert_eq!(sanitize("__oil__rate__"), "OIL_RATE");
        assert_eq!(sanitize("-oil-"), "OIL");
        assert!(!sanitize("a%%%%b").contains("__"));
    }

    #[test]
    fn test_empty_and_all_symbol_fallback() {
        assert_eq!(sanitize(""), "VAR");
        assert_eq!(sanitize("()[]{} "), "VAR");
        assert_eq!(sanitize("---"), "VAR");
    }

    #[test]
    fn test_leading_digit_prefixed() {
        assert_eq!(sanitize("2phase"), "V2PHASE");
        assert_eq!(sanitize("3"), "V3");
    }

    #[test]
    fn test_idempotent() {
        for label in [
            "",
            "PRESSURE",
            "Pressure (bar)",
            "oil/rate",
            "2phase",
            "()[]",
            "__x__",
            "a%%%%b",
            "123 456",
        ] {
            let once = sanitize(label);
            assert_eq!(sanitize(&once), once, "not idempotent for {label:?}");
        }
    }
}
