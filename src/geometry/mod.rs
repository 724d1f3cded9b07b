//! Pure geometry used by the surface, the shape catalogue and the renderer.

mod curves;
mod hit_testing;

pub use curves::{arc, catmull_rom, smooth_coords, SPLINE_STEPS};
pub use hit_testing::{
    distance_to_line_segment, distance_to_polyline, ellipse_contains, point_in_polygon,
};

use egui::{Pos2, Rect};

/// Calculate the bounding box for a set of points
pub fn calculate_bounds(points: &[Pos2], padding: f32) -> Rect {
    if points.is_empty() {
        return Rect::NOTHING;
    }

    let mut min_x = f32::INFINITY;
    let mut min_y = f32::INFINITY;
    let mut max_x = f32::NEG_INFINITY;
    let mut max_y = f32::NEG_INFINITY;

    for point in points {
        min_x = min_x.min(point.x);
        min_y = min_y.min(point.y);
        max_x = max_x.max(point.x);
        max_y = max_y.max(point.y);
    }

    Rect::from_min_max(
        Pos2::new(min_x - padding, min_y - padding),
        Pos2::new(max_x + padding, max_y + padding),
    )
}

/// Scale `point` about `origin`.
pub fn scale_about(point: Pos2, origin: Pos2, factor: f32) -> Pos2 {
    origin + (point - origin) * factor
}
