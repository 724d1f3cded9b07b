// src/renderer.rs
use eframe::egui::{self, Color32, Mesh, Pos2, Rect, Shape, Stroke, Vec2, epaint::EllipseShape};

use crate::geometry::{SPLINE_STEPS, catmull_rom};
use crate::surface::{Primitive, PrimitiveKind, Surface};
use crate::viewport::Viewport;

/// Turns the retained surface into egui shapes.
///
/// Shapes are rebuilt only when the surface revision or the viewport changed
/// since the previous frame.
#[derive(Debug, Default)]
pub struct Renderer {
    cache_key: Option<(u64, Viewport)>,
    cached: Vec<Shape>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paints the visible part of the surface
    ///
    /// Args:
    ///     surface (Surface): The primitives to draw, bottom to top
    ///     viewport (Viewport): Scroll offset and on-screen rect
    ///     painter (egui::Painter): The painter to draw with
    pub fn paint(&mut self, surface: &Surface, viewport: &Viewport, painter: &egui::Painter) {
        painter.extend(self.shapes(surface, viewport).iter().cloned());
    }

    pub fn shapes(&mut self, surface: &Surface, viewport: &Viewport) -> &[Shape] {
        let key = (surface.revision(), *viewport);
        if self.cache_key != Some(key) {
            self.cached = build_shapes(surface, viewport);
            self.cache_key = Some(key);
        }
        &self.cached
    }
}

/// Screen-space shapes for every visible primitive overlapping the view.
pub fn build_shapes(surface: &Surface, viewport: &Viewport) -> Vec<Shape> {
    let visible = viewport.visible_canvas_rect();
    let offset = viewport.screen_rect.min.to_vec2() - viewport.scroll;
    let mut shapes = Vec::new();
    for (_, primitive) in surface.iter_stacked() {
        if !primitive.visible || primitive.points.is_empty() {
            continue;
        }
        if !primitive.bbox().expand(primitive.stroke_width).intersects(visible) {
            continue;
        }
        push_primitive(&mut shapes, primitive, offset);
    }
    shapes
}

fn push_primitive(shapes: &mut Vec<Shape>, primitive: &Primitive, offset: Vec2) {
    let stroke = if primitive.stroke_width > 0.0 {
        Stroke::new(primitive.stroke_width, primitive.stroke_color)
    } else {
        Stroke::NONE
    };
    let fill = primitive.fill.unwrap_or(Color32::TRANSPARENT);
    let points: Vec<Pos2> = primitive.points.iter().map(|p| *p + offset).collect();

    match primitive.kind {
        PrimitiveKind::Line { smooth } => {
            let points = if smooth {
                catmull_rom(&points, SPLINE_STEPS, false)
            } else {
                points
            };
            shapes.push(Shape::line(points, stroke));
        }
        PrimitiveKind::Rect => {
            let rect = Rect::from_points(&points);
            shapes.push(Shape::Rect(egui::epaint::RectShape::new(rect, 0.0, fill, stroke)));
        }
        PrimitiveKind::Oval => {
            let rect = Rect::from_points(&points);
            shapes.push(Shape::Ellipse(EllipseShape {
                center: rect.center(),
                radius: rect.size() / 2.0,
                fill,
                stroke,
            }));
        }
        PrimitiveKind::Polygon { smooth } => {
            let points = if smooth {
                catmull_rom(&points, SPLINE_STEPS, true)
            } else {
                points
            };
            if fill != Color32::TRANSPARENT && points.len() >= 3 {
                shapes.push(Shape::mesh(fan_mesh(&points, fill)));
            }
            shapes.push(Shape::closed_line(points, stroke));
        }
    }
}

/// Triangle fan around the centroid. Good enough for the star-shaped
/// outlines the built-in shapes use.
fn fan_mesh(points: &[Pos2], color: Color32) -> Mesh {
    let sum = points.iter().fold(Vec2::ZERO, |acc, p| acc + p.to_vec2());
    let centroid = (sum / points.len() as f32).to_pos2();

    let mut mesh = Mesh::default();
    mesh.colored_vertex(centroid, color);
    for point in points {
        mesh.colored_vertex(*point, color);
    }
    let n = points.len() as u32;
    for i in 0..n {
        mesh.add_triangle(0, 1 + i, 1 + (i + 1) % n);
    }
    mesh
}
