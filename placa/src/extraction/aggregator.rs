use std::fmt;

use tracing::trace;

use crate::models::{DetectionMode, PlateCandidate, RecognizedText};

use super::{normalize_text, score_candidate, PlateExtractor};

/// Where in the recognition hierarchy a candidate was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentSource {
    FullText,
    Block(usize),
    Line(usize, usize),
}

impl fmt::Display for FragmentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FragmentSource::FullText => write!(f, "full_text"),
            FragmentSource::Block(block) => write!(f, "block[{block}]"),
            FragmentSource::Line(block, line) => write!(f, "block[{block}].line[{line}]"),
        }
    }
}

/// The winning candidate across the whole recognition hierarchy.
#[derive(Debug, Clone)]
pub struct WeightedCandidate {
    pub candidate: PlateCandidate,
    /// Scorer confidence multiplied by the source fragment's recognition
    /// confidence.
    pub weighted_confidence: f32,
    pub source: FragmentSource,
}

/// Walks a recognition result's full text, blocks and lines, extracts and
/// scores candidates from each fragment, and keeps the single candidate
/// with the strictly highest weighted confidence.
///
/// The full text is weighted 1.0; each block and line is weighted by its
/// own recognition confidence. All sources compete in one flat comparison,
/// and on a tie the fragment encountered first wins.
#[derive(Debug, Clone)]
pub struct HierarchyAggregator {
    extractor: PlateExtractor,
}

impl HierarchyAggregator {
    pub fn new() -> Self {
        Self {
            extractor: PlateExtractor::new(),
        }
    }

    /// Best candidate across the hierarchy, or `None` when no fragment
    /// produced a candidate with a weighted confidence above zero.
    pub fn best_candidate(
        &self,
        recognized: &RecognizedText,
        mode: DetectionMode,
    ) -> Option<WeightedCandidate> {
        let mut best: Option<WeightedCandidate> = None;

        self.consider(&mut best, &recognized.full_text, 1.0, FragmentSource::FullText, mode);
        for (b, block) in recognized.blocks.iter().enumerate() {
            self.consider(&mut best, &block.text, block.confidence, FragmentSource::Block(b), mode);
            for (l, line) in block.lines.iter().enumerate() {
                self.consider(
                    &mut best,
                    &line.text,
                    line.confidence,
                    FragmentSource::Line(b, l),
                    mode,
                );
            }
        }

        best
    }

    fn consider(
        &self,
        best: &mut Option<WeightedCandidate>,
        fragment: &str,
        source_confidence: f32,
        source: FragmentSource,
        mode: DetectionMode,
    ) {
        let normalized = normalize_text(fragment, mode);
        for mut candidate in self.extractor.extract(&normalized) {
            candidate.scorer_confidence = score_candidate(&candidate, &normalized, mode);
            let weighted = candidate.scorer_confidence * source_confidence;
            trace!(
                source = %source,
                raw = %candidate.raw_match,
                scored = candidate.scorer_confidence,
                weighted,
                "considering candidate"
            );

            let current = best.as_ref().map_or(0.0, |b| b.weighted_confidence);
            if weighted > current {
                *best = Some(WeightedCandidate {
                    candidate,
                    weighted_confidence: weighted,
                    source,
                });
            }
        }
    }
}

impl Default for HierarchyAggregator {
    fn default() -> Self {
        Self::new()
    }
}
