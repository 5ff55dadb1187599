use crate::format::validate_plate_format;
use crate::models::{DetectionMode, PlateCandidate, ShapeTier};

// Scoring weights. Bonuses are additive and applied at most once each; the
// sum is clamped to [0, 1] at the end.
const BASE_GENERAL: f32 = 0.3;
const BASE_CROPPED: f32 = 0.4;
const PLAUSIBLE_LENGTH_BONUS: f32 = 0.3;
const REGISTERED_SHAPE_BONUS: f32 = 0.3;
const MIXED_CONTENT_BONUS: f32 = 0.1;
const SHORT_TEXT_BONUS: f32 = 0.1;
const LOOSE_TIER_MULTIPLIER: f32 = 0.7;
const CROPPED_RELIABILITY_FACTOR: f32 = 1.2;

const PLAUSIBLE_LENGTH_MIN: usize = 6;
const PLAUSIBLE_LENGTH_MAX: usize = 8;
// Normalized fragments shorter than this are treated as tight crops with
// little surrounding noise.
const SHORT_TEXT_MAX_LEN: usize = 20;

/// Composite confidence for one candidate, in [0, 1].
///
/// `normalized_text` is the full normalized fragment the candidate was
/// extracted from; its length feeds the cropped-mode short-text bonus. The
/// same candidate never scores lower in `Cropped` mode than in `General`.
pub fn score_candidate(
    candidate: &PlateCandidate,
    normalized_text: &str,
    mode: DetectionMode,
) -> f32 {
    let raw = &candidate.raw_match;

    let mut confidence = match mode {
        DetectionMode::General => BASE_GENERAL,
        DetectionMode::Cropped => BASE_CROPPED,
    };

    if (PLAUSIBLE_LENGTH_MIN..=PLAUSIBLE_LENGTH_MAX).contains(&raw.len()) {
        confidence += PLAUSIBLE_LENGTH_BONUS;
    }
    if validate_plate_format(raw) {
        confidence += REGISTERED_SHAPE_BONUS;
    }
    if raw.chars().any(|c| c.is_ascii_alphabetic()) && raw.chars().any(|c| c.is_ascii_digit()) {
        confidence += MIXED_CONTENT_BONUS;
    }
    if mode == DetectionMode::Cropped && normalized_text.len() < SHORT_TEXT_MAX_LEN {
        confidence += SHORT_TEXT_BONUS;
    }

    if candidate.shape_tier == ShapeTier::Loose {
        confidence *= LOOSE_TIER_MULTIPLIER;
    }

    // Pre-cropped plate regions read more reliably than full frames; the
    // factor is applied once, after the tier multiplier.
    if mode == DetectionMode::Cropped && confidence > 0.0 {
        confidence = (confidence * CROPPED_RELIABILITY_FACTOR).min(1.0);
    }

    confidence.clamp(0.0, 1.0)
}
