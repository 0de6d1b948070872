#![allow(dead_code, unused_imports)]

mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from regionsweep for tests
pub use regionsweep::{
    LoopConfig, LoopError, LoopSummary, Rect, Region, RegionConfig, RegionExtractor, StopReason,
};
