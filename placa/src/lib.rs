//! License-plate detection for Peruvian vehicle registrations.
//!
//! `placa` turns the noisy, hierarchical output of an external
//! text-recognition engine into a single validated, canonically formatted
//! plate number with a composite confidence score. The crate owns the text
//! pipeline only: normalization, shape extraction, scoring, hierarchy
//! aggregation and formatting. Pixels stay behind the
//! [`recognition::ImagePreprocessor`] and
//! [`recognition::TextRecognitionEngine`] collaborator traits.
//!
//! # Usage
//!
//! ```
//! use placa::{detect_from_recognized_text, Config, DetectionMode, RecognizedText};
//!
//! let recognized = RecognizedText::from_text("REPUBLICA DEL PERU ABC-123");
//! let result =
//!     detect_from_recognized_text(&recognized, DetectionMode::General, &Config::default());
//!
//! assert!(result.success);
//! assert_eq!(result.plate_number, "ABC-123");
//! ```

pub mod config;
pub mod error;
pub mod extraction;
pub mod format;
pub mod models;
pub mod pipeline;
pub mod recognition;

pub use config::Config;
pub use error::{PlacaError, Result};
pub use format::{format_plate, validate_plate_format};
pub use models::{DetectionMode, PlateDetectionResult, RecognizedText};
pub use pipeline::{detect_from_recognized_text, PlateDetector};
pub use recognition::advise_preprocessing;
