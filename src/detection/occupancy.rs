use image::{GrayImage, Luma};

use crate::detection::contours::fill_rasterize;
use crate::models::{Point, Polygon, Rect};

/// Rasterized interior of one contour, stored only over its bounding rectangle.
///
/// Outside `origin` the footprint is empty, so overlap tests and claims never
/// need to touch the rest of the frame.
#[derive(Debug, Clone)]
pub struct Footprint {
    pub origin: Rect,
    pub mask: GrayImage,
}

impl Footprint {
    pub fn rasterize(polygon: &Polygon, bounds: Rect) -> Self {
        let local = Polygon::new(
            polygon
                .points
                .iter()
                .map(|p| Point::new(p.x - bounds.x as i32, p.y - bounds.y as i32))
                .collect(),
        );
        let mut mask = GrayImage::new(bounds.width, bounds.height);
        fill_rasterize(&local, &mut mask);
        Self { origin: bounds, mask }
    }

    /// Filled pixels in frame coordinates
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.mask
            .enumerate_pixels()
            .filter(|(_, _, p)| p[0] != 0)
            .map(|(x, y, _)| (x + self.origin.x, y + self.origin.y))
    }
}

/// Pixels claimed by regions accepted so far in one extraction call.
///
/// Pixels only ever go from unclaimed to claimed.
#[derive(Debug, Clone)]
pub struct OccupancyMask {
    mask: GrayImage,
    claimed: usize,
}

impl OccupancyMask {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            mask: GrayImage::new(width, height),
            claimed: 0,
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.mask.dimensions()
    }

    pub fn is_claimed(&self, x: u32, y: u32) -> bool {
        x < self.mask.width() && y < self.mask.height() && self.mask.get_pixel(x, y)[0] != 0
    }

    pub fn claimed_pixels(&self) -> usize {
        self.claimed
    }

    pub fn overlaps(&self, footprint: &Footprint) -> bool {
        footprint.pixels().any(|(x, y)| self.is_claimed(x, y))
    }

    /// Union the footprint into the mask
    pub fn claim(&mut self, footprint: &Footprint) {
        let (width, height) = self.mask.dimensions();
        for (x, y) in footprint.pixels() {
            if x < width && y < height && self.mask.get_pixel(x, y)[0] == 0 {
                self.mask.put_pixel(x, y, Luma([255]));
                self.claimed += 1;
            }
        }
    }

    pub fn into_image(self) -> GrayImage {
        self.mask
    }
}
