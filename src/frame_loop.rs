use std::time::Instant;

use image::DynamicImage;
use log::{debug, info};

use crate::capture::{CaptureGuard, CaptureSource};
use crate::config::LoopConfig;
use crate::detection::{preprocessing, RegionExtractor};
use crate::error::LoopError;
use crate::presentation::Presenter;

/// Why the loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Cancelled,
    EndOfStream,
    FrameLimit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopSummary {
    pub frames: usize,
    pub regions: usize,
    pub stop: StopReason,
}

/// Capture → extract → annotate → present, one frame at a time
pub struct FrameLoop {
    extractor: RegionExtractor,
    config: LoopConfig,
}

impl FrameLoop {
    pub fn new(extractor: RegionExtractor, config: LoopConfig) -> Self {
        Self { extractor, config }
    }

    /// Run until cancelled, the source runs dry, or the frame limit is hit.
    ///
    /// If the source cannot be opened no frame is read and the error is
    /// returned as [`LoopError::Acquisition`]. The capture handle is released
    /// exactly once on every path out of this function.
    pub fn run<S, P>(&self, source: &mut S, presenter: &mut P) -> Result<LoopSummary, LoopError>
    where
        S: CaptureSource,
        P: Presenter,
    {
        let name = source.name();
        let mut capture = CaptureGuard::open(source)?;
        info!(
            "Capturing from {}; type '{}' and press Enter to stop",
            name, self.config.cancel_key
        );

        let mut frames = 0;
        let mut regions = 0;

        let stop = loop {
            if self.config.max_frames.is_some_and(|limit| frames >= limit) {
                break StopReason::FrameLimit;
            }

            let Some(frame) = capture.read() else {
                break StopReason::EndOfStream;
            };
            frames += 1;
            regions += self.process_frame(&frame, presenter, frames)?;

            if presenter.poll_key(self.config.poll_timeout) == Some(self.config.cancel_key) {
                break StopReason::Cancelled;
            }
        };

        capture.release();
        info!(
            "Stopped after {} frames ({} regions): {:?}",
            frames, regions, stop
        );

        Ok(LoopSummary {
            frames,
            regions,
            stop,
        })
    }

    /// Extract, annotate and present one frame; returns the region count
    fn process_frame<P: Presenter>(
        &self,
        frame: &DynamicImage,
        presenter: &mut P,
        index: usize,
    ) -> Result<usize, LoopError> {
        let started = Instant::now();
        let gray = preprocessing::to_grayscale(frame);
        let extraction = self.extractor.extract_with_mask(&gray);
        debug!(
            "Frame {}: {} regions in {:.1} ms",
            index,
            extraction.regions.len(),
            started.elapsed().as_secs_f64() * 1000.0
        );

        let mut annotated = frame.to_rgb8();
        for region in &extraction.regions {
            presenter.draw_rectangle(
                &mut annotated,
                &region.rect,
                self.config.box_color,
                self.config.box_thickness,
            );
        }

        presenter.show(&self.config.window_name, &DynamicImage::ImageRgb8(annotated))?;
        if self.config.show_mask {
            let mask = DynamicImage::ImageLuma8(extraction.mask.into_image());
            presenter.show(&self.config.mask_window_name, &mask)?;
        }

        Ok(extraction.regions.len())
    }
}
