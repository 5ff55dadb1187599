use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, warn};

use crate::config::Config;
use crate::error::Result;
use crate::extraction::HierarchyAggregator;
use crate::format::format_plate;
use crate::models::{DetectionMode, PlateDetectionResult, RecognizedText};
use crate::recognition::{advise_preprocessing, ImagePreprocessor, TextRecognitionEngine};

/// Aggregate, format and gate an existing recognition result. The
/// preprocessing and recognition stages are skipped entirely.
pub fn detect_from_recognized_text(
    recognized: &RecognizedText,
    mode: DetectionMode,
    config: &Config,
) -> PlateDetectionResult {
    let started = Instant::now();
    aggregate_and_format(&HierarchyAggregator::new(), recognized, mode, config, started)
}

/// Orchestrates one detection run: preprocess (recoverable), recognize
/// (fatal), aggregate, format.
///
/// Holds no per-invocation state; one instance serves concurrent detections
/// without coordination. Failures never escape as `Err`: every run produces
/// a [`PlateDetectionResult`], with `error` set when the recognition stage
/// failed.
pub struct PlateDetector {
    preprocessor: Arc<dyn ImagePreprocessor>,
    recognizer: Arc<dyn TextRecognitionEngine>,
    aggregator: HierarchyAggregator,
    config: Config,
}

impl PlateDetector {
    pub fn new(
        preprocessor: Arc<dyn ImagePreprocessor>,
        recognizer: Arc<dyn TextRecognitionEngine>,
        config: Config,
    ) -> Self {
        Self {
            preprocessor,
            recognizer,
            aggregator: HierarchyAggregator::new(),
            config,
        }
    }

    /// Full pipeline over a source image.
    pub async fn detect_plate(
        &self,
        image_uri: &str,
        mode: DetectionMode,
    ) -> PlateDetectionResult {
        self.run(image_uri, mode, true).await
    }

    /// Pipeline without the preprocessing stage, for images that are
    /// already sized and cropped for recognition.
    pub async fn detect_plate_prepared(
        &self,
        image_uri: &str,
        mode: DetectionMode,
    ) -> PlateDetectionResult {
        self.run(image_uri, mode, false).await
    }

    /// Aggregate and format an existing recognition result.
    pub fn detect_from_recognized_text(
        &self,
        recognized: &RecognizedText,
        mode: DetectionMode,
    ) -> PlateDetectionResult {
        let started = Instant::now();
        aggregate_and_format(&self.aggregator, recognized, mode, &self.config, started)
    }

    async fn run(
        &self,
        image_uri: &str,
        mode: DetectionMode,
        preprocess: bool,
    ) -> PlateDetectionResult {
        let started = Instant::now();
        debug!(image_uri, %mode, "starting plate detection");

        let recognition_uri = if preprocess {
            match self.preprocess_stage(image_uri, mode).await {
                Ok(processed) => processed,
                Err(error) => {
                    warn!(%error, "preprocessing failed, continuing with original image");
                    image_uri.to_string()
                }
            }
        } else {
            image_uri.to_string()
        };

        let recognized = match self.recognizer.recognize(&recognition_uri).await {
            Ok(recognized) => recognized,
            Err(error) => {
                debug!(%error, "recognition failed");
                return PlateDetectionResult::failed(
                    format!("recognition failed: {error}"),
                    elapsed_ms(started),
                );
            }
        };

        aggregate_and_format(&self.aggregator, &recognized, mode, &self.config, started)
    }

    async fn preprocess_stage(&self, image_uri: &str, mode: DetectionMode) -> Result<String> {
        let dimensions = self.preprocessor.probe(image_uri).await?;
        let profile = advise_preprocessing(mode, dimensions, None, &self.config.preprocessing);
        debug!(
            width = profile.target_width,
            height = profile.target_height,
            quality = profile.quality,
            "requesting image preprocessing"
        );
        self.preprocessor.preprocess(image_uri, &profile).await
    }
}

impl Clone for PlateDetector {
    fn clone(&self) -> Self {
        Self {
            preprocessor: Arc::clone(&self.preprocessor),
            recognizer: Arc::clone(&self.recognizer),
            aggregator: self.aggregator.clone(),
            config: self.config.clone(),
        }
    }
}

fn aggregate_and_format(
    aggregator: &HierarchyAggregator,
    recognized: &RecognizedText,
    mode: DetectionMode,
    config: &Config,
    started: Instant,
) -> PlateDetectionResult {
    let all_text = (!recognized.full_text.is_empty()).then(|| recognized.full_text.clone());

    match aggregator.best_candidate(recognized, mode) {
        Some(best) => {
            let plate = format_plate(&best.candidate.raw_match);
            let elapsed = elapsed_ms(started);
            if best.weighted_confidence < config.detection.min_confidence {
                debug!(
                    plate = %plate,
                    confidence = best.weighted_confidence,
                    floor = config.detection.min_confidence,
                    "best candidate below confidence floor"
                );
                return PlateDetectionResult::no_match(best.weighted_confidence, all_text, elapsed);
            }
            debug!(
                plate = %plate,
                confidence = best.weighted_confidence,
                source = %best.source,
                "plate detected"
            );
            PlateDetectionResult::matched(plate, best.weighted_confidence, all_text, elapsed)
        }
        None => {
            debug!(%mode, "no plate-shaped text found");
            PlateDetectionResult::no_match(0.0, all_text, elapsed_ms(started))
        }
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DetectionConfig, PreprocessingConfig};
    use crate::error::PlacaError;
    use crate::models::{ImageDimensions, PreprocessingProfile, TextBlock};
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn test_config() -> Config {
        Config {
            preprocessing: PreprocessingConfig::default(),
            detection: DetectionConfig::default(),
        }
    }

    struct StubPreprocessor {
        probes: AtomicUsize,
        fail: bool,
    }

    impl StubPreprocessor {
        fn ok() -> Self {
            Self { probes: AtomicUsize::new(0), fail: false }
        }

        fn failing() -> Self {
            Self { probes: AtomicUsize::new(0), fail: true }
        }
    }

    #[async_trait]
    impl ImagePreprocessor for StubPreprocessor {
        async fn probe(&self, _image_uri: &str) -> Result<ImageDimensions> {
            self.probes.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(PlacaError::Preprocessing("probe exploded".to_string()));
            }
            Ok(ImageDimensions { width: 4032, height: 3024 })
        }

        async fn preprocess(
            &self,
            image_uri: &str,
            _profile: &PreprocessingProfile,
        ) -> Result<String> {
            if self.fail {
                return Err(PlacaError::Preprocessing("resize exploded".to_string()));
            }
            Ok(format!("{image_uri}#processed"))
        }
    }

    struct RecordingEngine {
        text: String,
        seen: Mutex<Vec<String>>,
    }

    impl RecordingEngine {
        fn new(text: &str) -> Self {
            Self {
                text: text.to_string(),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TextRecognitionEngine for RecordingEngine {
        async fn recognize(&self, image_uri: &str) -> Result<RecognizedText> {
            self.seen.lock().unwrap().push(image_uri.to_string());
            Ok(RecognizedText::from_text(self.text.as_str()))
        }
    }

    struct FailingEngine;

    #[async_trait]
    impl TextRecognitionEngine for FailingEngine {
        async fn recognize(&self, _image_uri: &str) -> Result<RecognizedText> {
            Err(PlacaError::Recognition("engine offline".to_string()))
        }
    }

    // ====== Full pipeline ======

    #[tokio::test]
    async fn test_detect_plate_runs_all_stages() {
        let preprocessor = Arc::new(StubPreprocessor::ok());
        let engine = Arc::new(RecordingEngine::new("REPUBLICA DEL PERU ABC-123"));
        let detector = PlateDetector::new(preprocessor.clone(), engine.clone(), test_config());

        let result = detector
            .detect_plate("file:///frame.jpg", DetectionMode::General)
            .await;

        assert!(result.success);
        assert_eq!(result.plate_number, "ABC-123");
        assert!(result.confidence > 0.6);
        assert_eq!(result.all_text.as_deref(), Some("REPUBLICA DEL PERU ABC-123"));
        assert!(result.error.is_none());
        // The engine received the preprocessed image, not the original.
        assert_eq!(engine.seen.lock().unwrap()[0], "file:///frame.jpg#processed");
        assert_eq!(preprocessor.probes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_preprocess_failure_falls_back_to_original_image() {
        let engine = Arc::new(RecordingEngine::new("ABC-123"));
        let detector = PlateDetector::new(
            Arc::new(StubPreprocessor::failing()),
            engine.clone(),
            test_config(),
        );

        let result = detector
            .detect_plate("file:///frame.jpg", DetectionMode::General)
            .await;

        assert!(result.success);
        assert_eq!(result.plate_number, "ABC-123");
        assert_eq!(engine.seen.lock().unwrap()[0], "file:///frame.jpg");
    }

    #[tokio::test]
    async fn test_recognition_failure_is_fatal() {
        let detector = PlateDetector::new(
            Arc::new(StubPreprocessor::ok()),
            Arc::new(FailingEngine),
            test_config(),
        );

        let result = detector
            .detect_plate("file:///frame.jpg", DetectionMode::General)
            .await;

        assert!(!result.success);
        assert_eq!(result.plate_number, "");
        assert_eq!(result.confidence, 0.0);
        assert!(result.all_text.is_none());
        assert!(result.error.unwrap().contains("engine offline"));
    }

    #[tokio::test]
    async fn test_prepared_detection_skips_preprocessing() {
        let preprocessor = Arc::new(StubPreprocessor::ok());
        let engine = Arc::new(RecordingEngine::new("AB0-123"));
        let detector = PlateDetector::new(preprocessor.clone(), engine.clone(), test_config());

        let result = detector
            .detect_plate_prepared("file:///prepared.jpg", DetectionMode::Cropped)
            .await;

        assert!(result.success);
        assert_eq!(preprocessor.probes.load(Ordering::SeqCst), 0);
        assert_eq!(engine.seen.lock().unwrap()[0], "file:///prepared.jpg");
    }

    // ====== Aggregation outcomes ======

    #[test]
    fn test_no_plate_shaped_text_is_a_no_match_not_an_error() {
        let result = detect_from_recognized_text(
            &RecognizedText::from_text("###???"),
            DetectionMode::General,
            &test_config(),
        );

        assert!(!result.success);
        assert_eq!(result.plate_number, "");
        assert_eq!(result.confidence, 0.0);
        assert!(result.error.is_none());
    }

    #[test]
    fn test_below_floor_reports_no_match_but_keeps_confidence() {
        let mut config = test_config();
        config.detection.min_confidence = 0.9;
        let recognized = RecognizedText {
            full_text: String::new(),
            blocks: vec![TextBlock {
                text: "ABC-123".to_string(),
                confidence: 0.5,
                lines: Vec::new(),
            }],
        };

        let result = detect_from_recognized_text(&recognized, DetectionMode::General, &config);

        assert!(!result.success);
        assert!(result.plate_number.is_empty());
        assert_eq!(result.confidence, 0.5);
        assert!(result.error.is_none());
    }

    #[test]
    fn test_detect_from_recognized_text_end_to_end() {
        let result = detect_from_recognized_text(
            &RecognizedText::from_text("REPUBLICA DEL PERU ABC-123"),
            DetectionMode::General,
            &test_config(),
        );

        assert!(result.success);
        assert_eq!(result.plate_number, "ABC-123");
        assert!(result.confidence > 0.6);
        assert_eq!(result.all_text.as_deref(), Some("REPUBLICA DEL PERU ABC-123"));
    }
}
