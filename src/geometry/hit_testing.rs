use egui::{Pos2, Rect};

/// Calculate distance from a point to a line segment
pub fn distance_to_line_segment(point: Pos2, line_start: Pos2, line_end: Pos2) -> f32 {
    let line_vec = line_end - line_start;
    let point_vec = point - line_start;

    let line_len = line_vec.length();
    if line_len == 0.0 {
        return point_vec.length();
    }

    let t = ((point_vec.x * line_vec.x + point_vec.y * line_vec.y) / line_len).clamp(0.0, line_len);
    let projection = line_start + (line_vec * t / line_len);
    (point - projection).length()
}

/// Shortest distance from `point` to any segment of an open polyline.
pub fn distance_to_polyline(point: Pos2, points: &[Pos2]) -> f32 {
    match points {
        [] => f32::INFINITY,
        [only] => (point - *only).length(),
        _ => points
            .windows(2)
            .map(|w| distance_to_line_segment(point, w[0], w[1]))
            .fold(f32::INFINITY, f32::min),
    }
}

/// Even-odd point in polygon test; the polygon is implicitly closed.
pub fn point_in_polygon(point: Pos2, polygon: &[Pos2]) -> bool {
    if polygon.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (a, b) = (polygon[i], polygon[j]);
        if (a.y > point.y) != (b.y > point.y) {
            let cross_x = (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x;
            if point.x < cross_x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Whether `point` lies inside the ellipse inscribed in `rect`.
pub fn ellipse_contains(rect: Rect, point: Pos2) -> bool {
    let radius = rect.size() / 2.0;
    if radius.x <= 0.0 || radius.y <= 0.0 {
        return false;
    }
    let d = point - rect.center();
    (d.x / radius.x).powi(2) + (d.y / radius.y).powi(2) <= 1.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn segment_distance() {
        let d = distance_to_line_segment(pos2(5.0, 3.0), pos2(0.0, 0.0), pos2(10.0, 0.0));
        assert!((d - 3.0).abs() < 1e-5);
        // Beyond the end the distance is to the endpoint.
        let d = distance_to_line_segment(pos2(13.0, 4.0), pos2(0.0, 0.0), pos2(10.0, 0.0));
        assert!((d - 5.0).abs() < 1e-5);
    }

    #[test]
    fn triangle_contains_its_centroid_only() {
        let tri = [pos2(0.0, 0.0), pos2(58.0, 28.0), pos2(0.0, 56.0)];
        assert!(point_in_polygon(pos2(20.0, 28.0), &tri));
        assert!(!point_in_polygon(pos2(50.0, 5.0), &tri));
        assert!(!point_in_polygon(pos2(-1.0, 28.0), &tri));
    }

    #[test]
    fn ellipse_corners_are_outside() {
        let rect = Rect::from_min_max(pos2(0.0, 0.0), pos2(10.0, 10.0));
        assert!(ellipse_contains(rect, pos2(5.0, 5.0)));
        assert!(ellipse_contains(rect, pos2(5.0, 0.5)));
        assert!(!ellipse_contains(rect, pos2(0.5, 0.5)));
    }

    #[test]
    fn polyline_distance_takes_the_nearest_segment() {
        let line = [pos2(0.0, 0.0), pos2(10.0, 0.0), pos2(10.0, 10.0)];
        assert!((distance_to_polyline(pos2(12.0, 5.0), &line) - 2.0).abs() < 1e-5);
        assert_eq!(distance_to_polyline(pos2(0.0, 0.0), &[]), f32::INFINITY);
    }
}
