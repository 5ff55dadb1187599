use std::env;

/// Parse an environment variable into `T`, falling back to `default` when the
/// variable is unset or does not parse.
fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T {
    match env::var(var) {
        Ok(value) => value.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid value for {}, using default", var);
            default
        }),
        Err(_) => default,
    }
}

/// Runtime configuration, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub preprocessing: PreprocessingConfig,
    pub detection: DetectionConfig,
}

/// Resize and re-encode targets handed to the external image preprocessor.
#[derive(Debug, Clone)]
pub struct PreprocessingConfig {
    /// Target width for full-frame captures. Height follows the source
    /// aspect ratio.
    pub general_target_width: u32,
    /// JPEG quality (0-100) for full-frame captures.
    pub general_quality: u8,
    /// Fixed target width for pre-cropped plate regions.
    pub cropped_target_width: u32,
    /// Fixed target height for pre-cropped plate regions.
    pub cropped_target_height: u32,
    /// JPEG quality (0-100) for pre-cropped plate regions.
    pub cropped_quality: u8,
}

#[derive(Debug, Clone)]
pub struct DetectionConfig {
    /// Weighted-confidence floor below which a detection is reported as a
    /// no-match. The computed confidence is still surfaced for diagnostics.
    /// 0.0 disables the floor.
    pub min_confidence: f32,
}

impl Default for PreprocessingConfig {
    fn default() -> Self {
        Self {
            general_target_width: 1024,
            general_quality: 80,
            cropped_target_width: 800,
            cropped_target_height: 360,
            cropped_quality: 95,
        }
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self { min_confidence: 0.0 }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            preprocessing: PreprocessingConfig {
                general_target_width: parse_env_or("PLACA_GENERAL_TARGET_WIDTH", 1024),
                general_quality: parse_env_or("PLACA_GENERAL_QUALITY", 80),
                cropped_target_width: parse_env_or("PLACA_CROPPED_TARGET_WIDTH", 800),
                cropped_target_height: parse_env_or("PLACA_CROPPED_TARGET_HEIGHT", 360),
                cropped_quality: parse_env_or("PLACA_CROPPED_QUALITY", 95),
            },
            detection: DetectionConfig {
                min_confidence: parse_env_or("PLACA_MIN_CONFIDENCE", 0.0),
            },
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::default()
    }
}
