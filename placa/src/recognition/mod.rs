//! Collaborator seams and preprocessing advice.
//!
//! The pipeline core never touches pixels. Image work and text recognition
//! happen behind the [`ImagePreprocessor`] and [`TextRecognitionEngine`]
//! traits, and [`advise_preprocessing`] computes the parameters a caller
//! should request from its preprocessor before recognizing.

mod advisor;
mod engine;
mod synthetic;

pub use advisor::advise_preprocessing;
pub use engine::{ImagePreprocessor, PassthroughPreprocessor, TextRecognitionEngine};
pub use synthetic::{FixtureGenerator, SyntheticRecognitionEngine};
