use std::collections::VecDeque;
use std::time::Duration;

use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};
use regionsweep::{CaptureError, CaptureSource, PresentError, Presenter, Rect};

/// A filled square: left, top, side length, intensity
pub type Square = (u32, u32, u32, u8);

/// Creates a zero grayscale frame with the given squares painted in order
pub fn frame_with_squares(width: u32, height: u32, squares: &[Square]) -> GrayImage {
    let mut frame = GrayImage::new(width, height);
    for &(left, top, side, value) in squares {
        for y in top..(top + side).min(height) {
            for x in left..(left + side).min(width) {
                frame.put_pixel(x, y, Luma([value]));
            }
        }
    }
    frame
}

/// Same as [`frame_with_squares`] but as a three-channel capture frame
pub fn color_frame_with_squares(width: u32, height: u32, squares: &[Square]) -> DynamicImage {
    let gray = frame_with_squares(width, height, squares);
    let rgb = RgbImage::from_fn(width, height, |x, y| {
        let v = gray.get_pixel(x, y)[0];
        Rgb([v, v, v])
    });
    DynamicImage::ImageRgb8(rgb)
}

/// A busy frame: separated blobs, a nested pair, a ring and a smooth ramp
pub fn cluttered_frame() -> GrayImage {
    let mut frame = frame_with_squares(
        160,
        120,
        &[
            (5, 5, 20, 90),
            (40, 5, 30, 140),
            (48, 13, 12, 230),
            (90, 10, 50, 180),
            (105, 25, 20, 0),
            (110, 30, 8, 250),
            (10, 70, 25, 60),
        ],
    );
    for y in 60..110 {
        for x in 60..150 {
            let v = ((x - 60) * 2 + (y - 60)) as u8;
            frame.put_pixel(x, y, Luma([v]));
        }
    }
    frame
}

/// Capture source that serves a fixed list of frames and counts lifecycle calls
pub struct RecordingSource {
    pub frames: Vec<DynamicImage>,
    pub fail_open: bool,
    pub opens: usize,
    pub reads: usize,
    pub releases: usize,
}

impl RecordingSource {
    pub fn new(frames: Vec<DynamicImage>) -> Self {
        Self {
            frames,
            fail_open: false,
            opens: 0,
            reads: 0,
            releases: 0,
        }
    }

    pub fn unavailable() -> Self {
        Self {
            fail_open: true,
            ..Self::new(Vec::new())
        }
    }
}

impl CaptureSource for RecordingSource {
    type Handle = usize;

    fn open(&mut self) -> Result<usize, CaptureError> {
        self.opens += 1;
        if self.fail_open {
            return Err(CaptureError::Unavailable {
                source_name: self.name(),
                reason: "device busy".to_string(),
            });
        }
        Ok(0)
    }

    fn read(&mut self, handle: &mut usize) -> Option<DynamicImage> {
        self.reads += 1;
        let frame = self.frames.get(*handle).cloned();
        *handle += 1;
        frame
    }

    fn release(&mut self, _handle: usize) {
        self.releases += 1;
    }

    fn name(&self) -> String {
        "recording source".to_string()
    }
}

/// Presenter that remembers what it was asked to draw and show
#[derive(Default)]
pub struct RecordingPresenter {
    pub rects: Vec<Rect>,
    pub shown: Vec<(String, u32, u32)>,
    pub keys: VecDeque<Option<char>>,
    pub fail_show: bool,
    pub polls: usize,
}

impl RecordingPresenter {
    pub fn with_keys(keys: &[Option<char>]) -> Self {
        Self {
            keys: keys.iter().copied().collect(),
            ..Self::default()
        }
    }

    pub fn shown_in(&self, window: &str) -> usize {
        self.shown.iter().filter(|(w, _, _)| w == window).count()
    }
}

impl Presenter for RecordingPresenter {
    fn draw_rectangle(&mut self, frame: &mut RgbImage, rect: &Rect, color: Rgb<u8>, thickness: u32) {
        self.rects.push(*rect);
        regionsweep::presentation::draw_rectangle(frame, rect, color, thickness);
    }

    fn show(&mut self, window: &str, frame: &DynamicImage) -> Result<(), PresentError> {
        if self.fail_show {
            return Err(PresentError::OutputDir {
                path: "/unwritable".into(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            });
        }
        self.shown
            .push((window.to_string(), frame.width(), frame.height()));
        Ok(())
    }

    fn poll_key(&mut self, _timeout: Duration) -> Option<char> {
        self.polls += 1;
        self.keys.pop_front().flatten()
    }
}
