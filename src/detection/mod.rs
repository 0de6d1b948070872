pub mod preprocessing;
pub mod contours;
pub mod occupancy;

use image::GrayImage;
use log::trace;
use rayon::prelude::*;

use crate::config::RegionConfig;
use crate::error::ConfigError;
use crate::models::{Polygon, Rect, Region};
use occupancy::{Footprint, OccupancyMask};

/// Threshold levels visited by the sweep: `0, delta, 2*delta, ...` while below `255 - delta`
pub fn threshold_levels(delta: u8) -> impl Iterator<Item = u8> {
    let end = if delta == 0 { 0 } else { 255 - u16::from(delta) };
    (0..end).step_by(usize::from(delta.max(1))).map(|t| t as u8)
}

/// A contour that passed the area filter at one threshold and still awaits the overlap test
#[derive(Debug, Clone)]
pub struct Candidate {
    pub threshold: u8,
    pub contour: Polygon,
    pub area: f64,
    pub rect: Rect,
}

/// Run the overlap test for one threshold's candidates, in discovery order.
///
/// Consumes the mask left by the previous threshold and returns the updated
/// mask together with the regions accepted at this level.
pub fn sweep_pass(mut mask: OccupancyMask, candidates: Vec<Candidate>) -> (OccupancyMask, Vec<Region>) {
    let mut accepted = Vec::new();

    for candidate in candidates {
        let footprint = Footprint::rasterize(&candidate.contour, candidate.rect);
        if mask.overlaps(&footprint) {
            trace!(
                "t={} dropped contour at ({}, {}): overlaps an earlier region",
                candidate.threshold, candidate.rect.x, candidate.rect.y
            );
            continue;
        }

        mask.claim(&footprint);
        accepted.push(Region {
            rect: candidate.rect,
            contour: candidate.contour,
            contour_area: candidate.area,
            threshold: candidate.threshold,
        });
    }

    (mask, accepted)
}

/// Everything one extraction call produced
#[derive(Debug, Clone)]
pub struct Extraction {
    pub regions: Vec<Region>,
    /// Final occupancy mask, one claimed pixel per accepted footprint pixel
    pub mask: OccupancyMask,
    /// Number of threshold levels visited
    pub passes: usize,
}

/// Greedy threshold-sweep approximation of MSER detection
#[derive(Debug, Clone)]
pub struct RegionExtractor {
    config: RegionConfig,
}

impl RegionExtractor {
    pub fn new(config: RegionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Detect regions in one grayscale frame
    pub fn extract(&self, frame: &GrayImage) -> Vec<Region> {
        self.extract_with_mask(frame).regions
    }

    /// Detect regions and keep the occupancy mask for display
    pub fn extract_with_mask(&self, frame: &GrayImage) -> Extraction {
        let levels: Vec<u8> = threshold_levels(self.config.delta).collect();

        // Contour work per level is independent; only the claim step below is ordered
        let per_level: Vec<Vec<Candidate>> = if self.config.parallel {
            levels.par_iter().map(|&t| self.candidates_at(frame, t)).collect()
        } else {
            levels.iter().map(|&t| self.candidates_at(frame, t)).collect()
        };

        let (width, height) = frame.dimensions();
        let (mask, regions) = per_level.into_iter().fold(
            (OccupancyMask::new(width, height), Vec::new()),
            |(mask, mut regions), candidates| {
                let (mask, accepted) = sweep_pass(mask, candidates);
                regions.extend(accepted);
                (mask, regions)
            },
        );

        Extraction {
            regions,
            mask,
            passes: levels.len(),
        }
    }

    /// Contours at threshold `t` whose area lies strictly inside the configured bounds
    pub fn candidates_at(&self, frame: &GrayImage, t: u8) -> Vec<Candidate> {
        let binary = preprocessing::binary_threshold(frame, t);

        contours::find_external_contours(&binary)
            .into_iter()
            .filter_map(|contour| {
                if contour.is_degenerate() {
                    return None;
                }
                let area = contours::polygon_area(&contour);
                if !self.config.admits_area(area) {
                    return None;
                }
                let rect = contours::bounding_rect(&contour)?;
                Some(Candidate {
                    threshold: t,
                    contour,
                    area,
                    rect,
                })
            })
            .collect()
    }
}

impl Default for RegionExtractor {
    fn default() -> Self {
        Self {
            config: RegionConfig::default(),
        }
    }
}
