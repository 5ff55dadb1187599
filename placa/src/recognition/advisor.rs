use crate::config::PreprocessingConfig;
use crate::models::{CropRegion, DetectionMode, ImageDimensions, PreprocessingProfile};

/// Derive the resize and re-encode parameters to request from the image
/// preprocessor for one capture.
///
/// General mode scales the frame to the configured target width, keeping the
/// source aspect ratio; upscaling small frames is intentional, recognition
/// engines read small text better at higher resolution. Cropped mode ignores
/// the source dimensions and requests the fixed plate-sized target. The crop
/// region, when given, is passed through for the preprocessor to apply.
pub fn advise_preprocessing(
    mode: DetectionMode,
    dimensions: ImageDimensions,
    crop_region: Option<CropRegion>,
    config: &PreprocessingConfig,
) -> PreprocessingProfile {
    match mode {
        DetectionMode::General => {
            let target_width = config.general_target_width;
            PreprocessingProfile {
                target_width,
                target_height: scaled_height(dimensions, target_width),
                quality: config.general_quality,
                crop_region,
            }
        }
        DetectionMode::Cropped => PreprocessingProfile {
            target_width: config.cropped_target_width,
            target_height: config.cropped_target_height,
            quality: config.cropped_quality,
            crop_region,
        },
    }
}

/// Height that keeps the source aspect ratio at `target_width`. A degenerate
/// zero-width probe keeps the source height.
fn scaled_height(dimensions: ImageDimensions, target_width: u32) -> u32 {
    if dimensions.width == 0 {
        return dimensions.height;
    }
    let ratio = target_width as f32 / dimensions.width as f32;
    (dimensions.height as f32 * ratio).round() as u32
}
