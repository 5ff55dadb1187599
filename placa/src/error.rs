use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlacaError {
    /// Dimension probe or image preprocessing failed. The detection pipeline
    /// treats this as recoverable and continues with the unmodified image.
    #[error("Preprocessing error: {0}")]
    Preprocessing(String),

    /// The external text-recognition engine failed. Fatal for the invocation.
    #[error("Recognition error: {0}")]
    Recognition(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PlacaError>;
