use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Result;

fn default_confidence() -> f32 {
    1.0
}

/// Recognizers are allowed to omit per-fragment confidence or report it as
/// null. Either way the fragment is treated as fully trusted.
fn confidence_or_default<'de, D>(deserializer: D) -> std::result::Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f32>::deserialize(deserializer)?;
    Ok(value.unwrap_or_else(default_confidence))
}

/// Complete output of one text-recognition pass over an image, preserving the
/// block/line hierarchy the engine reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecognizedText {
    /// Concatenated text of the whole frame.
    pub full_text: String,
    /// Spatial blocks in reading order. Engines that report no structure
    /// leave this empty.
    #[serde(default)]
    pub blocks: Vec<TextBlock>,
}

/// One spatial cluster of recognized text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBlock {
    pub text: String,
    /// Recognition confidence in [0, 1].
    #[serde(default = "default_confidence", deserialize_with = "confidence_or_default")]
    pub confidence: f32,
    #[serde(default)]
    pub lines: Vec<TextLine>,
}

/// One line of text within a block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextLine {
    pub text: String,
    /// Recognition confidence in [0, 1].
    #[serde(default = "default_confidence", deserialize_with = "confidence_or_default")]
    pub confidence: f32,
}

impl RecognizedText {
    /// Result with full text only and no block structure.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            full_text: text.into(),
            blocks: Vec::new(),
        }
    }

    /// Parse a saved recognition dump. Unknown fields are ignored, missing
    /// block lists come back empty and missing confidences come back as 1.0.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
