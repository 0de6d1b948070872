use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageReader};
use log::{debug, warn};

use super::CaptureSource;
use crate::error::CaptureError;

const FRAME_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "tif", "tiff", "pgm", "ppm"];

/// Replays a directory of still images as a video stream, in file name order
#[derive(Debug, Clone)]
pub struct ImageSequenceSource {
    dir: PathBuf,
}

/// Open handle over the listed frame files
#[derive(Debug)]
pub struct SequenceCursor {
    paths: Vec<PathBuf>,
    next: usize,
}

impl SequenceCursor {
    pub fn remaining(&self) -> usize {
        self.paths.len() - self.next
    }
}

impl ImageSequenceSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn is_frame_file(path: &Path) -> bool {
        path.is_file()
            && path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| FRAME_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
    }
}

impl CaptureSource for ImageSequenceSource {
    type Handle = SequenceCursor;

    fn open(&mut self) -> Result<SequenceCursor, CaptureError> {
        if !self.dir.is_dir() {
            return Err(CaptureError::Unavailable {
                source_name: self.name(),
                reason: "not a directory".to_string(),
            });
        }

        let entries = std::fs::read_dir(&self.dir).map_err(|source| CaptureError::Listing {
            path: self.dir.clone(),
            source,
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|source| CaptureError::Listing {
                    path: self.dir.clone(),
                    source,
                })?
                .path();
            if Self::is_frame_file(&path) {
                paths.push(path);
            }
        }
        paths.sort();

        if paths.is_empty() {
            return Err(CaptureError::Unavailable {
                source_name: self.name(),
                reason: "no image frames found".to_string(),
            });
        }

        debug!("Opened {} with {} frames", self.name(), paths.len());
        Ok(SequenceCursor { paths, next: 0 })
    }

    fn read(&mut self, handle: &mut SequenceCursor) -> Option<DynamicImage> {
        let path = handle.paths.get(handle.next)?;
        handle.next += 1;

        // An unreadable frame ends the stream, the same way a dropped camera would
        match ImageReader::open(path).and_then(|r| r.with_guessed_format()) {
            Ok(reader) => match reader.decode() {
                Ok(img) => Some(img),
                Err(e) => {
                    warn!("Failed to decode frame {}: {}", path.display(), e);
                    None
                }
            },
            Err(e) => {
                warn!("Failed to open frame {}: {}", path.display(), e);
                None
            }
        }
    }

    fn release(&mut self, handle: SequenceCursor) {
        debug!(
            "Released {} ({} frames unread)",
            self.name(),
            handle.remaining()
        );
    }

    fn name(&self) -> String {
        format!("image sequence {}", self.dir.display())
    }
}
