mod detector;

pub use detector::{detect_from_recognized_text, PlateDetector};
