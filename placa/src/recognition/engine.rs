use async_trait::async_trait;

use crate::error::{PlacaError, Result};
use crate::models::{ImageDimensions, PreprocessingProfile, RecognizedText};

/// Image-manipulation collaborator invoked before recognition.
///
/// Implementations wrap whatever does the actual pixel work: an `image`-based
/// resizer, a mobile host's native manipulator, an external service. A failed
/// probe or preprocess is recoverable; the pipeline falls back to the
/// unmodified source image.
#[async_trait]
pub trait ImagePreprocessor: Send + Sync {
    /// Pixel dimensions of the source image.
    async fn probe(&self, image_uri: &str) -> Result<ImageDimensions>;

    /// Resize, crop and re-encode per `profile`, returning the URI of the
    /// processed image. Returning the original URI unchanged is allowed.
    async fn preprocess(&self, image_uri: &str, profile: &PreprocessingProfile) -> Result<String>;
}

/// Text-recognition collaborator: ML Kit on a mobile host, Tesseract, a
/// cloud vision API. A failure here is fatal for the invocation.
#[async_trait]
pub trait TextRecognitionEngine: Send + Sync {
    async fn recognize(&self, image_uri: &str) -> Result<RecognizedText>;
}

/// Preprocessor for pipelines whose images are already prepared, or whose
/// recognition engine does not read pixels at all. `preprocess` hands the
/// URI back unchanged; `probe` reports that no dimension information is
/// available, which the pipeline treats as a recoverable miss.
pub struct PassthroughPreprocessor;

#[async_trait]
impl ImagePreprocessor for PassthroughPreprocessor {
    async fn probe(&self, image_uri: &str) -> Result<ImageDimensions> {
        Err(PlacaError::Preprocessing(format!(
            "no dimension information for '{image_uri}'"
        )))
    }

    async fn preprocess(&self, image_uri: &str, _profile: &PreprocessingProfile) -> Result<String> {
        Ok(image_uri.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passthrough_returns_uri_unchanged() {
        let profile = PreprocessingProfile {
            target_width: 1024,
            target_height: 768,
            quality: 80,
            crop_region: None,
        };
        let processed =
            tokio_test::block_on(PassthroughPreprocessor.preprocess("file:///a.jpg", &profile));
        assert_eq!(processed.unwrap(), "file:///a.jpg");
    }

    #[test]
    fn test_passthrough_probe_is_a_preprocessing_error() {
        let result = tokio_test::block_on(PassthroughPreprocessor.probe("file:///a.jpg"));
        assert!(matches!(result, Err(PlacaError::Preprocessing(_))));
    }
}
