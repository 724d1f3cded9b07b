//! Retained store of everything drawn on a canvas.
//!
//! The surface knows nothing about objects or items: it holds primitives,
//! their stacking order and a revision counter that only moves when a write
//! actually changes something.

use std::collections::HashMap;
use std::fmt;

use egui::{Color32, Pos2, Rect, Vec2};

use crate::geometry::{
    calculate_bounds, distance_to_polyline, ellipse_contains, point_in_polygon, scale_about,
};
use crate::id_generator::IdGenerator;

/// Handle to one rendered primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PrimitiveId(u64);

impl fmt::Display for PrimitiveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    Line { smooth: bool },
    Oval,
    Rect,
    Polygon { smooth: bool },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    pub kind: PrimitiveKind,
    /// Two corner points for ovals and rects, the vertex list otherwise.
    pub points: Vec<Pos2>,
    pub fill: Option<Color32>,
    pub stroke_color: Color32,
    pub stroke_width: f32,
    pub visible: bool,
}

impl Primitive {
    pub fn bbox(&self) -> Rect {
        calculate_bounds(&self.points, 0.0)
    }

    /// Shape-aware containment, widened by `slop` canvas units.
    pub fn contains(&self, point: Pos2, slop: f32) -> bool {
        let half_stroke = self.stroke_width / 2.0;
        match self.kind {
            PrimitiveKind::Line { .. } => {
                distance_to_polyline(point, &self.points) <= half_stroke + slop
            }
            PrimitiveKind::Rect => self.bbox().expand(half_stroke + slop).contains(point),
            PrimitiveKind::Oval => {
                ellipse_contains(self.bbox().expand(half_stroke + slop), point)
            }
            PrimitiveKind::Polygon { .. } => {
                point_in_polygon(point, &self.points)
                    || self.distance_to_outline(point) <= half_stroke + slop
            }
        }
    }

    fn distance_to_outline(&self, point: Pos2) -> f32 {
        let mut closed = self.points.clone();
        if let Some(first) = self.points.first() {
            closed.push(*first);
        }
        distance_to_polyline(point, &closed)
    }
}

#[derive(Debug, Default)]
pub struct Surface {
    primitives: HashMap<PrimitiveId, Primitive>,
    /// Bottom to top.
    order: Vec<PrimitiveId>,
    ids: IdGenerator,
    revision: u64,
}

impl Surface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a primitive on top of the stack.
    pub fn create(&mut self, primitive: Primitive) -> PrimitiveId {
        let id = PrimitiveId(self.ids.generate());
        self.primitives.insert(id, primitive);
        self.order.push(id);
        self.revision += 1;
        id
    }

    pub fn delete(&mut self, id: PrimitiveId) -> Option<Primitive> {
        let removed = self.primitives.remove(&id)?;
        self.order.retain(|other| *other != id);
        self.revision += 1;
        Some(removed)
    }

    pub fn get(&self, id: PrimitiveId) -> Option<&Primitive> {
        self.primitives.get(&id)
    }

    pub fn contains(&self, id: PrimitiveId) -> bool {
        self.primitives.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Number of effective mutations so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Apply `edit` and bump the revision if it reports a change.
    fn modify(&mut self, id: PrimitiveId, edit: impl FnOnce(&mut Primitive) -> bool) -> bool {
        let Some(primitive) = self.primitives.get_mut(&id) else {
            return false;
        };
        let changed = edit(primitive);
        if changed {
            self.revision += 1;
        }
        changed
    }

    pub fn set_points(&mut self, id: PrimitiveId, points: Vec<Pos2>) -> bool {
        self.modify(id, |p| {
            if p.points == points {
                return false;
            }
            p.points = points;
            true
        })
    }

    pub fn set_fill(&mut self, id: PrimitiveId, fill: Option<Color32>) -> bool {
        self.modify(id, |p| {
            if p.fill == fill {
                return false;
            }
            p.fill = fill;
            true
        })
    }

    pub fn set_stroke_color(&mut self, id: PrimitiveId, color: Color32) -> bool {
        self.modify(id, |p| {
            if p.stroke_color == color {
                return false;
            }
            p.stroke_color = color;
            true
        })
    }

    pub fn set_stroke_width(&mut self, id: PrimitiveId, width: f32) -> bool {
        self.modify(id, |p| {
            if p.stroke_width == width {
                return false;
            }
            p.stroke_width = width;
            true
        })
    }

    pub fn set_visible(&mut self, id: PrimitiveId, visible: bool) -> bool {
        self.modify(id, |p| {
            if p.visible == visible {
                return false;
            }
            p.visible = visible;
            true
        })
    }

    pub fn move_by(&mut self, ids: impl IntoIterator<Item = PrimitiveId>, delta: Vec2) {
        if delta == Vec2::ZERO {
            return;
        }
        for id in ids {
            self.modify(id, |p| {
                for point in &mut p.points {
                    *point += delta;
                }
                true
            });
        }
    }

    /// Scale coordinates about `origin`; stroke widths are left alone.
    pub fn scale(&mut self, ids: impl IntoIterator<Item = PrimitiveId>, origin: Pos2, factor: f32) {
        if factor == 1.0 {
            return;
        }
        for id in ids {
            self.modify(id, |p| {
                for point in &mut p.points {
                    *point = scale_about(*point, origin, factor);
                }
                true
            });
        }
    }

    /// Move a primitive to the top of the stacking order.
    pub fn raise(&mut self, id: PrimitiveId) -> bool {
        let Some(index) = self.stacking_index(id) else {
            return false;
        };
        if index + 1 == self.order.len() {
            return false;
        }
        self.order.remove(index);
        self.order.push(id);
        self.revision += 1;
        true
    }

    /// Position in the stacking order, 0 being the bottom.
    pub fn stacking_index(&self, id: PrimitiveId) -> Option<usize> {
        self.order.iter().position(|other| *other == id)
    }

    pub fn bbox(&self, id: PrimitiveId) -> Option<Rect> {
        self.get(id).map(Primitive::bbox)
    }

    /// Primitives bottom to top.
    pub fn iter_stacked(&self) -> impl Iterator<Item = (PrimitiveId, &Primitive)> + '_ {
        self.order
            .iter()
            .filter_map(|id| self.primitives.get(id).map(|p| (*id, p)))
    }

    /// Topmost visible primitive under `point` that passes `filter`.
    pub fn find_at(
        &self,
        point: Pos2,
        slop: f32,
        filter: impl Fn(PrimitiveId) -> bool,
    ) -> Option<PrimitiveId> {
        self.order.iter().rev().copied().find(|id| {
            filter(*id)
                && self
                    .primitives
                    .get(id)
                    .is_some_and(|p| p.visible && p.contains(point, slop))
        })
    }

    /// Topmost primitive containing `point`, else the one whose bounding box
    /// is nearest, as long as it is no further than `halo`. Primitives
    /// rejected by `filter` are skipped entirely.
    pub fn find_closest(
        &self,
        point: Pos2,
        halo: f32,
        filter: impl Fn(PrimitiveId) -> bool,
    ) -> Option<PrimitiveId> {
        if let Some(hit) = self.find_at(point, 1.0, &filter) {
            return Some(hit);
        }
        let mut best: Option<(f32, PrimitiveId)> = None;
        for id in self.order.iter().rev().copied() {
            let Some(primitive) = self.primitives.get(&id) else {
                continue;
            };
            if !primitive.visible || !filter(id) {
                continue;
            }
            let distance = primitive.bbox().distance_to_pos(point);
            if distance > halo {
                continue;
            }
            if best.is_none_or(|(d, _)| distance < d) {
                best = Some((distance, id));
            }
        }
        best.map(|(_, id)| id)
    }

    /// Visible primitives whose bounding box lies entirely inside `rect`,
    /// bottom to top.
    pub fn find_enclosed(&self, rect: Rect) -> Vec<PrimitiveId> {
        self.iter_stacked()
            .filter(|(_, p)| p.visible && rect.contains_rect(p.bbox()))
            .map(|(id, _)| id)
            .collect()
    }
}
