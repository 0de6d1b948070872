use image::{DynamicImage, Rgb, RgbImage};
use log::debug;

use super::CaptureSource;
use crate::error::CaptureError;

/// Generated frames of two bright squares drifting across a dark background
#[derive(Debug, Clone)]
pub struct SyntheticSource {
    frame_count: usize,
    width: u32,
    height: u32,
    square: u32,
}

impl Default for SyntheticSource {
    fn default() -> Self {
        Self {
            frame_count: 30,
            width: 320,
            height: 240,
            square: 40,
        }
    }
}

impl SyntheticSource {
    pub fn new(frame_count: usize, width: u32, height: u32, square: u32) -> Self {
        Self {
            frame_count,
            width,
            height,
            square,
        }
    }

    pub fn with_frame_count(mut self, frame_count: usize) -> Self {
        self.frame_count = frame_count;
        self
    }

    fn generate_frame(&self, index: usize) -> RgbImage {
        let mut frame = RgbImage::new(self.width, self.height);
        let span = self.width.saturating_sub(self.square).max(1);
        let offset = (index as u32 * 4) % span;

        let squares = [
            (offset, self.height / 4, 150u8),
            (span - 1 - offset, self.height / 2, 220u8),
        ];
        for (left, top, value) in squares {
            for y in top..(top + self.square).min(self.height) {
                for x in left..(left + self.square).min(self.width) {
                    frame.put_pixel(x, y, Rgb([value, value, value]));
                }
            }
        }
        frame
    }
}

impl CaptureSource for SyntheticSource {
    /// Index of the next frame to generate
    type Handle = usize;

    fn open(&mut self) -> Result<usize, CaptureError> {
        if self.width == 0 || self.height == 0 {
            return Err(CaptureError::Unavailable {
                source_name: self.name(),
                reason: format!("invalid frame size {}x{}", self.width, self.height),
            });
        }
        debug!("Opened {}", self.name());
        Ok(0)
    }

    fn read(&mut self, handle: &mut usize) -> Option<DynamicImage> {
        if *handle >= self.frame_count {
            return None;
        }
        let frame = self.generate_frame(*handle);
        *handle += 1;
        Some(DynamicImage::ImageRgb8(frame))
    }

    fn release(&mut self, handle: usize) {
        debug!("Released {} after {} frames", self.name(), handle);
    }

    fn name(&self) -> String {
        format!("synthetic {}x{}", self.width, self.height)
    }
}
