use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Capture mode for one detection run. Fixed for the lifetime of the run,
/// never mixed mid-pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectionMode {
    /// Full camera frame. Conservative scoring base, no glyph correction.
    General,
    /// Pre-isolated plate region. Higher scoring base, O/I glyph correction.
    Cropped,
}

impl fmt::Display for DetectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectionMode::General => write!(f, "general"),
            DetectionMode::Cropped => write!(f, "cropped"),
        }
    }
}

impl FromStr for DetectionMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "general" => Ok(DetectionMode::General),
            "cropped" => Ok(DetectionMode::Cropped),
            other => Err(format!(
                "unknown detection mode '{other}' (expected 'general' or 'cropped')"
            )),
        }
    }
}

/// Which pattern tier produced a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeTier {
    /// One of the registered plate shapes matched exactly.
    Strict,
    /// Letters-then-digits fallback, penalized by the scorer.
    Loose,
}

/// One plate-shaped substring found in a normalized text fragment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlateCandidate {
    /// Matched substring with internal separators stripped, e.g. `ABC123`.
    pub raw_match: String,
    /// Matched substring as it appeared in the normalized fragment,
    /// separators included, e.g. `ABC-123`.
    pub normalized: String,
    pub shape_tier: ShapeTier,
    /// Composite confidence in [0, 1], before source weighting.
    pub scorer_confidence: f32,
}

/// Final outcome of a detection run. `success` is true exactly when
/// `plate_number` is non-empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlateDetectionResult {
    /// Canonically formatted plate, empty when nothing was detected.
    pub plate_number: String,
    pub confidence: f32,
    pub success: bool,
    /// Full recognized text of the frame, when recognition produced any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all_text: Option<String>,
    /// Set only when a pipeline stage failed. A frame with no plate-shaped
    /// text is a no-match, not an error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Wall-clock duration of the run, measured on a monotonic clock.
    pub processing_time_ms: u64,
}

impl PlateDetectionResult {
    /// A detection that produced a plate.
    pub fn matched(
        plate_number: String,
        confidence: f32,
        all_text: Option<String>,
        processing_time_ms: u64,
    ) -> Self {
        Self {
            plate_number,
            confidence,
            success: true,
            all_text,
            error: None,
            processing_time_ms,
        }
    }

    /// Nothing scored above zero, or the best candidate fell below the
    /// configured confidence floor. The computed confidence is surfaced
    /// either way.
    pub fn no_match(confidence: f32, all_text: Option<String>, processing_time_ms: u64) -> Self {
        Self {
            plate_number: String::new(),
            confidence,
            success: false,
            all_text,
            error: None,
            processing_time_ms,
        }
    }

    /// A pipeline stage failed outright.
    pub fn failed(error: String, processing_time_ms: u64) -> Self {
        Self {
            plate_number: String::new(),
            confidence: 0.0,
            success: false,
            all_text: None,
            error: Some(error),
            processing_time_ms,
        }
    }
}

/// Pixel dimensions of a source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

/// Region of the source image to crop before recognition, in source pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl FromStr for CropRegion {
    type Err = String;

    /// Parses `x,y,width,height`.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(format!("expected x,y,width,height, got '{s}'"));
        }
        let field = |value: &str, name: &str| -> std::result::Result<u32, String> {
            value
                .parse()
                .map_err(|_| format!("invalid {name} '{value}' in crop region"))
        };
        Ok(Self {
            x: field(parts[0], "x")?,
            y: field(parts[1], "y")?,
            width: field(parts[2], "width")?,
            height: field(parts[3], "height")?,
        })
    }
}

/// Parameters to request from the external image preprocessor for one
/// capture, derived from the detection mode and source dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreprocessingProfile {
    pub target_width: u32,
    pub target_height: u32,
    /// JPEG quality, 0-100.
    pub quality: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop_region: Option<CropRegion>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // ====== DetectionMode ======

    #[test]
    fn test_mode_display_round_trips_through_from_str() {
        for mode in [DetectionMode::General, DetectionMode::Cropped] {
            let parsed: DetectionMode = mode.to_string().parse().unwrap();
            assert_eq!(parsed, mode);
        }
    }

    #[test]
    fn test_mode_from_str_is_case_insensitive() {
        assert_eq!("GENERAL".parse::<DetectionMode>().unwrap(), DetectionMode::General);
        assert_eq!("Cropped".parse::<DetectionMode>().unwrap(), DetectionMode::Cropped);
    }

    #[test]
    fn test_mode_from_str_rejects_unknown() {
        let err = "plate".parse::<DetectionMode>().unwrap_err();
        assert!(err.contains("plate"));
    }

    // ====== CropRegion ======

    #[test]
    fn test_crop_region_from_str() {
        let region: CropRegion = "10, 20, 300,150".parse().unwrap();
        assert_eq!(
            region,
            CropRegion { x: 10, y: 20, width: 300, height: 150 }
        );
    }

    #[test]
    fn test_crop_region_from_str_rejects_bad_input() {
        assert!("10,20,300".parse::<CropRegion>().is_err());
        assert!("10,20,300,tall".parse::<CropRegion>().is_err());
    }

    // ====== PlateDetectionResult ======

    #[test]
    fn test_result_constructors_keep_success_consistent() {
        let matched = PlateDetectionResult::matched("ABC-123".to_string(), 0.9, None, 12);
        assert!(matched.success);
        assert!(matched.error.is_none());

        let no_match = PlateDetectionResult::no_match(0.0, Some("noise".to_string()), 3);
        assert!(!no_match.success);
        assert!(no_match.plate_number.is_empty());
        assert!(no_match.error.is_none());

        let failed = PlateDetectionResult::failed("recognition failed: boom".to_string(), 7);
        assert!(!failed.success);
        assert_eq!(failed.confidence, 0.0);
        assert!(failed.error.is_some());
    }

    #[test]
    fn test_result_serializes_camel_case_and_skips_absent_options() {
        let json =
            serde_json::to_string(&PlateDetectionResult::no_match(0.0, None, 5)).unwrap();
        assert!(json.contains("\"plateNumber\""));
        assert!(json.contains("\"processingTimeMs\""));
        assert!(!json.contains("allText"));
        assert!(!json.contains("error"));
    }

    #[test]
    fn test_shape_tier_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&ShapeTier::Strict).unwrap(), "\"strict\"");
        assert_eq!(serde_json::to_string(&ShapeTier::Loose).unwrap(), "\"loose\"");
    }
}
