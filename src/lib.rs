pub mod capture;
pub mod config;
pub mod detection;
pub mod error;
pub mod frame_loop;
pub mod models;
pub mod presentation;

pub use capture::{CaptureGuard, CaptureSource, ImageSequenceSource, SyntheticSource};
pub use config::{LoopConfig, RegionConfig};
pub use detection::{Extraction, RegionExtractor};
pub use error::{CaptureError, ConfigError, LoopError, PresentError};
pub use frame_loop::{FrameLoop, LoopSummary, StopReason};
pub use models::{Point, Polygon, Rect, Region};
pub use presentation::{FrameSink, KeyListener, Presenter};
