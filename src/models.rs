use imageproc::point::Point as ImagePoint;

/// Integer pixel coordinate in frame space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<ImagePoint<i32>> for Point {
    fn from(p: ImagePoint<i32>) -> Self {
        Self { x: p.x, y: p.y }
    }
}

impl From<Point> for ImagePoint<i32> {
    fn from(p: Point) -> Self {
        ImagePoint::new(p.x, p.y)
    }
}

/// Closed boundary polygon; the last point connects back to the first
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Polygon {
    pub points: Vec<Point>,
}

impl Polygon {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Fewer than three points cannot enclose any area
    pub fn is_degenerate(&self) -> bool {
        self.points.len() < 3
    }
}

/// Axis-aligned rectangle in frame coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    pub fn area(&self) -> u32 {
        self.width * self.height
    }

    /// Exclusive right edge
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Exclusive bottom edge
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

/// A region accepted by the threshold sweep.
///
/// `rect` is what gets reported and drawn, `contour_area` is the enclosed
/// polygon area the acceptance test was run against. They are deliberately
/// kept apart: a thin diagonal blob has a large box and a small polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub rect: Rect,
    pub contour: Polygon,
    pub contour_area: f64,
    /// Sweep level at which the region was first accepted
    pub threshold: u8,
}

impl Region {
    /// Bounding-box area, for reporting only
    pub fn area(&self) -> u32 {
        self.rect.area()
    }

    pub fn center(&self) -> (u32, u32) {
        (
            self.rect.x + self.rect.width / 2,
            self.rect.y + self.rect.height / 2,
        )
    }
}
