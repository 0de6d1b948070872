mod sequence;
mod synthetic;

pub use sequence::{ImageSequenceSource, SequenceCursor};
pub use synthetic::SyntheticSource;

use image::DynamicImage;

use crate::error::CaptureError;

/// A source of video frames with an explicit open/read/release lifecycle
pub trait CaptureSource {
    type Handle;

    /// Acquire the device or stream. Failure is fatal for the caller.
    fn open(&mut self) -> Result<Self::Handle, CaptureError>;

    /// Next frame, or `None` once the stream is exhausted
    fn read(&mut self, handle: &mut Self::Handle) -> Option<DynamicImage>;

    fn release(&mut self, handle: Self::Handle);

    /// Human-readable name for diagnostics
    fn name(&self) -> String;
}

/// Owns an open capture handle and releases it exactly once, on drop or explicitly
pub struct CaptureGuard<'a, S: CaptureSource> {
    source: &'a mut S,
    handle: Option<S::Handle>,
}

impl<'a, S: CaptureSource> CaptureGuard<'a, S> {
    pub fn open(source: &'a mut S) -> Result<Self, CaptureError> {
        let handle = source.open()?;
        Ok(Self {
            source,
            handle: Some(handle),
        })
    }

    pub fn read(&mut self) -> Option<DynamicImage> {
        let handle = self.handle.as_mut()?;
        self.source.read(handle)
    }

    pub fn release(mut self) {
        self.release_handle();
    }

    fn release_handle(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.source.release(handle);
        }
    }
}

impl<S: CaptureSource> Drop for CaptureGuard<'_, S> {
    fn drop(&mut self) {
        self.release_handle();
    }
}
