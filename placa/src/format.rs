//! Validation and display formatting for Peruvian plate numbers.

use std::sync::LazyLock;

use regex::Regex;

// Registered plate shapes, checked against the canonical (separator-free,
// uppercase) form.
static STANDARD_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{3}\d{3}$").unwrap());
static TAXI_SHAPE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Z]\d{5}$").unwrap());
static MOTORCYCLE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2}\d{4}$").unwrap());

/// Separator-free uppercase form used for validation and formatting.
fn canonical_form(plate: &str) -> String {
    plate
        .to_uppercase()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-'))
        .collect()
}

pub(crate) fn strip_separators(text: &str) -> String {
    text.chars().filter(|c| !matches!(c, ' ' | '-')).collect()
}

/// True when `plate`, after separator stripping and uppercasing, is one of
/// the registered shapes: three letters + three digits, one letter + five
/// digits (taxi), or two letters + four digits (motorcycle).
pub fn validate_plate_format(plate: &str) -> bool {
    let canonical = canonical_form(plate);
    STANDARD_SHAPE.is_match(&canonical)
        || TAXI_SHAPE.is_match(&canonical)
        || MOTORCYCLE_SHAPE.is_match(&canonical)
}

/// Canonical display form. `abc123`, `ABC 123` and `ABC-123` all become
/// `ABC-123`; taxi and motorcycle shapes stay unhyphenated. Inputs that
/// match no registered shape are returned in canonical form unchanged, so
/// the function is idempotent on its own output.
pub fn format_plate(plate: &str) -> String {
    let canonical = canonical_form(plate);
    if STANDARD_SHAPE.is_match(&canonical) {
        format!("{}-{}", &canonical[..3], &canonical[3..])
    } else {
        canonical
    }
}
