use image::imageops::replace;
use image::{GrayImage, Luma};
use imageproc::contours::{find_contours, BorderType};
use imageproc::drawing::draw_polygon_mut;
use imageproc::point::Point as ImagePoint;

use crate::models::{Point, Polygon, Rect};

/// Find the outer boundaries of top-level foreground components in a binary image.
///
/// Hole borders and anything nested inside a hole are dropped, so each
/// connected blob contributes exactly one polygon. Polygons come back in
/// raster discovery order.
pub fn find_external_contours(binary: &GrayImage) -> Vec<Polygon> {
    // The tracer needs a background ring around every blob, including ones on the frame edge
    let (width, height) = binary.dimensions();
    let mut padded = GrayImage::new(width + 2, height + 2);
    replace(&mut padded, binary, 1, 1);

    find_contours::<i32>(&padded)
        .into_iter()
        .filter(|c| matches!(c.border_type, BorderType::Outer) && c.parent.is_none())
        .map(|c| {
            simplify_chain(
                c.points
                    .into_iter()
                    .map(|p| Point::new(p.x - 1, p.y - 1))
                    .collect(),
            )
        })
        .collect()
}

/// Collapse straight runs of a traced boundary down to their end points.
///
/// Every interior point of a horizontal, vertical or diagonal run is removed,
/// leaving only the corners. The enclosed area is unchanged.
pub fn simplify_chain(points: Vec<Point>) -> Polygon {
    let n = points.len();
    if n < 3 {
        return Polygon::new(points);
    }

    let step = |a: Point, b: Point| ((b.x - a.x).signum(), (b.y - a.y).signum());
    let corners = (0..n)
        .filter(|&i| {
            let prev = points[(i + n - 1) % n];
            let next = points[(i + 1) % n];
            step(prev, points[i]) != step(points[i], next)
        })
        .map(|i| points[i])
        .collect();

    Polygon::new(corners)
}

/// Enclosed area of a closed polygon (shoelace formula, orientation ignored)
pub fn polygon_area(polygon: &Polygon) -> f64 {
    let pts = &polygon.points;
    if pts.len() < 3 {
        return 0.0;
    }

    let twice_area: i64 = pts
        .iter()
        .zip(pts.iter().cycle().skip(1))
        .map(|(a, b)| a.x as i64 * b.y as i64 - b.x as i64 * a.y as i64)
        .sum();

    twice_area.abs() as f64 / 2.0
}

/// Smallest axis-aligned rectangle containing every vertex, inclusive of edge pixels
pub fn bounding_rect(polygon: &Polygon) -> Option<Rect> {
    let first = polygon.points.first()?;
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);

    for p in &polygon.points[1..] {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }

    // Contour points live in frame space, which is never negative
    let min_x = min_x.max(0) as u32;
    let min_y = min_y.max(0) as u32;
    Some(Rect::new(
        min_x,
        min_y,
        (max_x.max(0) as u32) - min_x + 1,
        (max_y.max(0) as u32) - min_y + 1,
    ))
}

/// Paint the filled interior and boundary of `polygon` into `target` with 255
pub fn fill_rasterize(polygon: &Polygon, target: &mut GrayImage) {
    let mut pts: Vec<ImagePoint<i32>> = polygon.points.iter().copied().map(Into::into).collect();

    // The polygon is implicitly closed; an explicit closing point would be rejected
    while pts.len() > 1 && pts.first() == pts.last() {
        pts.pop();
    }

    match pts.as_slice() {
        [] => {}
        [p] => {
            if p.x >= 0 && p.y >= 0 && (p.x as u32) < target.width() && (p.y as u32) < target.height() {
                target.put_pixel(p.x as u32, p.y as u32, Luma([255]));
            }
        }
        _ => draw_polygon_mut(target, &pts, Luma([255])),
    }
}
