use std::time::Duration;

use image::Rgb;

use crate::error::ConfigError;

pub const DEFAULT_DELTA: u8 = 5;
pub const DEFAULT_MIN_AREA: f64 = 100.0;
pub const DEFAULT_MAX_AREA: f64 = 10000.0;

/// Region extractor parameters, fixed for the lifetime of an extractor
#[derive(Debug, Clone, PartialEq)]
pub struct RegionConfig {
    /// Step between consecutive sweep thresholds
    pub delta: u8,
    /// Exclusive lower bound on contour area
    pub min_area: f64,
    /// Exclusive upper bound on contour area
    pub max_area: f64,
    /// Extract per-threshold contours on the rayon pool
    pub parallel: bool,
}

impl RegionConfig {
    pub fn new(delta: u8, min_area: f64, max_area: f64) -> Self {
        Self {
            delta,
            min_area,
            max_area,
            parallel: false,
        }
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.delta == 0 {
            return Err(ConfigError::ZeroDelta);
        }
        let (min, max) = (self.min_area, self.max_area);
        if !min.is_finite() || !max.is_finite() || min < 0.0 {
            return Err(ConfigError::InvalidAreaBound { min, max });
        }
        if min >= max {
            return Err(ConfigError::EmptyAreaRange { min, max });
        }
        Ok(())
    }

    /// Strict open-interval test used for acceptance
    pub fn admits_area(&self, area: f64) -> bool {
        self.min_area < area && area < self.max_area
    }
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DELTA, DEFAULT_MIN_AREA, DEFAULT_MAX_AREA)
    }
}

/// Frame loop and annotation settings
#[derive(Debug, Clone)]
pub struct LoopConfig {
    pub window_name: String,
    pub mask_window_name: String,
    /// Present the occupancy mask next to the annotated frame
    pub show_mask: bool,
    pub box_color: Rgb<u8>,
    pub box_thickness: u32,
    /// How long to wait for a cancellation key each iteration
    pub poll_timeout: Duration,
    /// Stop after this many frames
    pub max_frames: Option<usize>,
    pub cancel_key: char,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            window_name: "Real-Time MSER Approximation".to_string(),
            mask_window_name: "Occupancy Mask".to_string(),
            show_mask: false,
            box_color: Rgb([0, 255, 0]),
            box_thickness: 2,
            poll_timeout: Duration::from_millis(1),
            max_frames: None,
            cancel_key: 'q',
        }
    }
}
