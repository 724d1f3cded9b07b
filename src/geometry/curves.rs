use std::ops::Range;

use egui::{Pos2, Vec2, pos2};

/// Samples per control segment when a smoothed line or polygon is flattened.
pub const SPLINE_STEPS: usize = 12;

/// Points along an elliptical arc, one per whole degree in `degrees`.
///
/// Radii may be negative to mirror the arc around its center.
pub fn arc(center: Pos2, radii: Vec2, degrees: Range<i32>) -> impl Iterator<Item = Pos2> {
    degrees.map(move |deg| {
        let rad = (deg as f32).to_radians();
        pos2(center.x + rad.cos() * radii.x, center.y + rad.sin() * radii.y)
    })
}

/// Control polygon for a wire between `start` and `end`.
///
/// Two midpoints are pushed `offset` units horizontally away from the
/// endpoints, so wires always leave and enter their endpoints horizontally.
pub fn smooth_coords(start: Pos2, end: Pos2, offset: f32) -> [Pos2; 4] {
    [
        start,
        pos2(start.x + offset, start.y),
        pos2(end.x - offset, end.y),
        end,
    ]
}

/// Flatten a uniform Catmull-Rom spline through `points`.
///
/// Fewer than three points are returned unchanged.
pub fn catmull_rom(points: &[Pos2], steps: usize, closed: bool) -> Vec<Pos2> {
    let n = points.len();
    if n < 3 || steps == 0 {
        return points.to_vec();
    }

    let last = n as isize - 1;
    let at = |i: isize| -> Pos2 {
        if closed {
            points[i.rem_euclid(n as isize) as usize]
        } else {
            points[i.clamp(0, last) as usize]
        }
    };

    let segments = if closed { n } else { n - 1 };
    let mut out = Vec::with_capacity(segments * steps + 1);
    for seg in 0..segments as isize {
        let (p0, p1, p2, p3) = (at(seg - 1), at(seg), at(seg + 1), at(seg + 2));
        for step in 0..steps {
            let t = step as f32 / steps as f32;
            out.push(spline_point(p0, p1, p2, p3, t));
        }
    }
    if !closed {
        out.push(points[n - 1]);
    }
    out
}

fn spline_point(p0: Pos2, p1: Pos2, p2: Pos2, p3: Pos2, t: f32) -> Pos2 {
    let t2 = t * t;
    let t3 = t2 * t;
    let blend = |a: f32, b: f32, c: f32, d: f32| {
        0.5 * (2.0 * b
            + (c - a) * t
            + (2.0 * a - 5.0 * b + 4.0 * c - d) * t2
            + (3.0 * b - a - 3.0 * c + d) * t3)
    };
    pos2(
        blend(p0.x, p1.x, p2.x, p3.x),
        blend(p0.y, p1.y, p2.y, p3.y),
    )
}
