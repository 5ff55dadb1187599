use std::sync::LazyLock;

use regex::Regex;

use crate::format::strip_separators;
use crate::models::{PlateCandidate, ShapeTier};

// Registered plate shapes as they appear inside running text. A single
// space or hyphen may separate the letter group from the digits.
static STRICT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        // Standard vehicle: three letters, three digits.
        Regex::new(r"[A-Z]{3}[-\s]?\d{3}").unwrap(),
        // Taxi: one letter, two digits, three digits.
        Regex::new(r"[A-Z]\d{2}[-\s]?\d{3}").unwrap(),
        // Motorcycle: two letters, four digits, never separated.
        Regex::new(r"[A-Z]{2}\d{4}").unwrap(),
    ]
});

// Fallback for degraded recognitions: letters directly followed by digits,
// no separator. Only consulted when no strict shape matched.
static LOOSE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z]{2,3}\d{3,4}").unwrap());

/// Stateless candidate extractor over the registered shape tables.
#[derive(Debug, Clone)]
pub struct PlateExtractor;

impl PlateExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Find every plate-shaped substring in an already-normalized fragment.
    ///
    /// All strict shapes are evaluated and each non-overlapping match
    /// becomes one candidate. The loose fallback runs only when no strict
    /// shape matched anywhere in the fragment. A fragment with no
    /// plate-shaped text yields an empty list, never an error.
    pub fn extract(&self, normalized: &str) -> Vec<PlateCandidate> {
        let mut candidates = Vec::new();
        for pattern in STRICT_PATTERNS.iter() {
            for found in pattern.find_iter(normalized) {
                candidates.push(candidate(found.as_str(), ShapeTier::Strict));
            }
        }

        if candidates.is_empty() {
            for found in LOOSE_PATTERN.find_iter(normalized) {
                candidates.push(candidate(found.as_str(), ShapeTier::Loose));
            }
        }

        candidates
    }
}

impl Default for PlateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn candidate(matched: &str, shape_tier: ShapeTier) -> PlateCandidate {
    PlateCandidate {
        raw_match: strip_separators(matched),
        normalized: matched.to_string(),
        shape_tier,
        // Filled in by the scorer.
        scorer_confidence: 0.0,
    }
}
