//! Plate extraction over recognized text.
//!
//! The stages are pure and composable: [`normalize_text`] cleans one raw
//! fragment, [`PlateExtractor`] finds plate-shaped substrings in it,
//! [`score_candidate`] assigns each candidate a composite confidence, and
//! [`HierarchyAggregator`] runs all three over a full recognition result and
//! picks the winner.

mod aggregator;
mod extractor;
mod normalize;
mod scoring;

pub use aggregator::{FragmentSource, HierarchyAggregator, WeightedCandidate};
pub use extractor::PlateExtractor;
pub use normalize::normalize_text;
pub use scoring::score_candidate;
