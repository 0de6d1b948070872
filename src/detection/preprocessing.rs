use image::{DynamicImage, GrayImage};
use imageproc::contrast::{threshold, ThresholdType};

/// Convert image to grayscale
pub fn to_grayscale(img: &DynamicImage) -> GrayImage {
    img.to_luma8()
}

/// Fixed-level binarization: pixels strictly above `cutoff` become 255, the rest 0
pub fn binary_threshold(img: &GrayImage, cutoff: u8) -> GrayImage {
    threshold(img, cutoff, ThresholdType::Binary)
}
