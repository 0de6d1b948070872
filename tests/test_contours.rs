mod common;

use common::*;
use image::GrayImage;
use regionsweep::detection::contours::{
    bounding_rect, fill_rasterize, find_external_contours, polygon_area, simplify_chain,
};
use regionsweep::detection::preprocessing::binary_threshold;
use regionsweep::{Point, Polygon};

fn poly(points: &[(i32, i32)]) -> Polygon {
    Polygon::new(points.iter().map(|&(x, y)| Point::new(x, y)).collect())
}

#[test]
fn test_binary_threshold_is_strictly_above_cutoff() {
    let frame = frame_with_squares(4, 1, &[(0, 0, 1, 99), (1, 0, 1, 100), (2, 0, 1, 101)]);

    let binary = binary_threshold(&frame, 100);

    let values: Vec<u8> = binary.pixels().map(|p| p[0]).collect();
    assert_eq!(values, vec![0, 0, 255, 0]);
}

#[test]
fn test_polygon_area_ignores_orientation() {
    let clockwise = poly(&[(0, 0), (9, 0), (9, 4), (0, 4)]);
    let counter = poly(&[(0, 0), (0, 4), (9, 4), (9, 0)]);

    assert_eq!(polygon_area(&clockwise), 36.0);
    assert_eq!(polygon_area(&counter), 36.0);
    assert_eq!(polygon_area(&poly(&[(0, 0), (4, 0), (0, 3)])), 6.0);
}

#[test]
fn test_polygon_area_of_degenerate_contours_is_zero() {
    assert_eq!(polygon_area(&Polygon::default()), 0.0);
    assert_eq!(polygon_area(&poly(&[(3, 3)])), 0.0);
    assert_eq!(polygon_area(&poly(&[(0, 0), (5, 5)])), 0.0);
    assert!(poly(&[(0, 0), (5, 5)]).is_degenerate());
}

#[test]
fn test_bounding_rect_includes_edge_pixels() {
    let rect = bounding_rect(&poly(&[(3, 7), (12, 9), (5, 20)]));
    assert_eq!(rect, Some(Rect::new(3, 7, 10, 14)));

    assert_eq!(bounding_rect(&poly(&[(4, 4)])), Some(Rect::new(4, 4, 1, 1)));
    assert_eq!(bounding_rect(&Polygon::default()), None);
}

#[test]
fn test_simplify_chain_keeps_only_corners() {
    let traced = poly(&[
        (0, 0),
        (0, 1),
        (0, 2),
        (1, 2),
        (2, 2),
        (2, 1),
        (2, 0),
        (1, 0),
    ]);

    let simplified = simplify_chain(traced.points);

    assert_eq!(simplified, poly(&[(0, 0), (0, 2), (2, 2), (2, 0)]));
}

#[test]
fn test_square_traces_to_four_corners() {
    let binary = binary_threshold(&frame_with_squares(30, 30, &[(5, 8, 10, 200)]), 0);

    let contours = find_external_contours(&binary);

    assert_eq!(contours.len(), 1);
    assert_eq!(contours[0].len(), 4);
    assert_eq!(polygon_area(&contours[0]), 81.0);
    assert_eq!(bounding_rect(&contours[0]), Some(Rect::new(5, 8, 10, 10)));
}

#[test]
fn test_holes_and_islands_are_not_external() {
    // A ring with an island in its hole, plus a separate blob
    let frame = frame_with_squares(
        60,
        40,
        &[(2, 2, 30, 200), (8, 8, 18, 0), (14, 14, 6, 200), (40, 5, 10, 200)],
    );
    let binary = binary_threshold(&frame, 0);

    let contours = find_external_contours(&binary);

    assert_eq!(contours.len(), 2);
    assert_eq!(bounding_rect(&contours[0]), Some(Rect::new(2, 2, 30, 30)));
    assert_eq!(bounding_rect(&contours[1]), Some(Rect::new(40, 5, 10, 10)));
}

#[test]
fn test_fill_rasterize_covers_interior_and_boundary() {
    let mut mask = GrayImage::new(20, 20);

    fill_rasterize(&poly(&[(2, 3), (2, 12), (11, 12), (11, 3)]), &mut mask);

    let filled = mask.pixels().filter(|p| p[0] == 255).count();
    assert_eq!(filled, 100);
    assert_eq!(mask.get_pixel(2, 3)[0], 255);
    assert_eq!(mask.get_pixel(11, 12)[0], 255);
    assert_eq!(mask.get_pixel(12, 12)[0], 0);
}

#[test]
fn test_fill_rasterize_accepts_explicitly_closed_polygon() {
    let mut mask = GrayImage::new(10, 10);

    fill_rasterize(&poly(&[(1, 1), (1, 4), (4, 4), (4, 1), (1, 1)]), &mut mask);

    assert_eq!(mask.pixels().filter(|p| p[0] == 255).count(), 16);
}

#[test]
fn test_fully_foreground_frame_has_one_external_contour() {
    let binary = GrayImage::from_pixel(20, 15, image::Luma([255]));

    let contours = find_external_contours(&binary);

    assert_eq!(contours.len(), 1);
    assert_eq!(contours[0].len(), 4);
    assert_eq!(bounding_rect(&contours[0]), Some(Rect::new(0, 0, 20, 15)));
    assert_eq!(polygon_area(&contours[0]), 19.0 * 14.0);
}

#[test]
fn test_edge_blob_keeps_frame_coordinates() {
    let binary = binary_threshold(&frame_with_squares(30, 30, &[(0, 5, 20, 100)]), 0);

    let contours = find_external_contours(&binary);

    assert_eq!(contours.len(), 1);
    assert!(contours[0].points.iter().all(|p| p.x >= 0 && p.y >= 0));
    assert_eq!(bounding_rect(&contours[0]), Some(Rect::new(0, 5, 20, 20)));
    assert_eq!(polygon_area(&contours[0]), 361.0);
}
