//! A single drawable primitive and its visual state.
//!
//! Items are configured with the `with_*` builders before they are realized,
//! then kept in sync with their primitive through the `set_*` setters. Every
//! visual setter writes straight through to the [`Surface`] once the item
//! has been added, so the order of assignments never matters.

use egui::{Color32, Pos2, Rect, Vec2};

use crate::palette;
use crate::surface::{Primitive, PrimitiveId, PrimitiveKind, Surface};

/// Geometry of an item, relative to nothing: all coordinates are canvas coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemShape {
    HorzLine { length: f32 },
    VertLine { length: f32 },
    Line { points: Vec<Pos2> },
    /// Spline-smoothed control polygon of a wire stroke.
    Wire { points: Vec<Pos2> },
    Rect { size: Vec2 },
    Oval { size: Vec2 },
    Polygon { points: Vec<Pos2>, smooth: bool },
}

impl ItemShape {
    pub fn is_line(&self) -> bool {
        matches!(
            self,
            Self::HorzLine { .. } | Self::VertLine { .. } | Self::Line { .. } | Self::Wire { .. }
        )
    }

    fn primitive_kind(&self) -> PrimitiveKind {
        match self {
            Self::HorzLine { .. } | Self::VertLine { .. } | Self::Line { .. } => {
                PrimitiveKind::Line { smooth: false }
            }
            Self::Wire { .. } => PrimitiveKind::Line { smooth: true },
            Self::Rect { .. } => PrimitiveKind::Rect,
            Self::Oval { .. } => PrimitiveKind::Oval,
            Self::Polygon { smooth, .. } => PrimitiveKind::Polygon { smooth: *smooth },
        }
    }

    fn points(&self, origin: Pos2) -> Vec<Pos2> {
        match self {
            Self::HorzLine { length } => vec![origin, origin + Vec2::new(*length, 0.0)],
            Self::VertLine { length } => vec![origin, origin + Vec2::new(0.0, *length)],
            Self::Rect { size } | Self::Oval { size } => vec![origin, origin + *size],
            Self::Line { points } | Self::Wire { points } | Self::Polygon { points, .. } => {
                points.clone()
            }
        }
    }
}

/// Behavioral flags of an item. None of these affect rendering directly.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemFlags {
    pub show_selection: bool,
    pub draggable: bool,
    pub clickable: bool,
    pub highlightable: bool,
    pub raisable: bool,
    pub always_on_top: bool,
    pub connectable_initiator: bool,
    pub connectable_terminator: bool,
}

impl Default for ItemFlags {
    fn default() -> Self {
        Self {
            show_selection: true,
            draggable: true,
            clickable: true,
            highlightable: true,
            raisable: true,
            always_on_top: false,
            connectable_initiator: false,
            connectable_terminator: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Item {
    name: String,
    origin: Pos2,
    shape: ItemShape,
    primitive: Option<PrimitiveId>,

    hidden: bool,
    selected: bool,
    highlighted: bool,
    show_highlight: bool,

    fill_color: Color32,
    selected_fill_color: Color32,
    current_fill_color: Color32,
    outline_color: Color32,
    active_outline_color: Color32,
    outline_width: f32,
    active_outline_width: f32,

    highlight_group: Option<String>,
    flags: ItemFlags,
}

impl Item {
    /// A hidden, unrealized item with the defaults for its shape.
    pub fn new(name: impl Into<String>, origin: Pos2, shape: ItemShape) -> Self {
        let is_line = shape.is_line();
        let mut item = Self {
            name: name.into(),
            origin,
            shape,
            primitive: None,
            hidden: true,
            selected: false,
            highlighted: false,
            show_highlight: true,
            fill_color: palette::FILL,
            selected_fill_color: palette::SELECTED_FILL,
            current_fill_color: palette::FILL,
            outline_color: palette::OUTLINE,
            active_outline_color: palette::ACTIVE_OUTLINE,
            outline_width: 2.0,
            active_outline_width: 5.0,
            highlight_group: None,
            flags: ItemFlags::default(),
        };
        if is_line {
            item.flags.show_selection = false;
            item.flags.raisable = false;
            item.flags.highlightable = false;
            item.show_highlight = false;
            item.active_outline_width = item.outline_width;
        }
        item
    }

    pub fn horz_line(name: impl Into<String>, origin: Pos2, length: f32) -> Self {
        Self::new(name, origin, ItemShape::HorzLine { length })
    }

    pub fn vert_line(name: impl Into<String>, origin: Pos2, length: f32) -> Self {
        Self::new(name, origin, ItemShape::VertLine { length })
    }

    pub fn line(name: impl Into<String>, points: Vec<Pos2>) -> Self {
        let origin = points.first().copied().unwrap_or_default();
        Self::new(name, origin, ItemShape::Line { points })
    }

    pub fn wire(name: impl Into<String>, points: Vec<Pos2>) -> Self {
        let origin = points.first().copied().unwrap_or_default();
        Self::new(name, origin, ItemShape::Wire { points })
    }

    pub fn rect(name: impl Into<String>, origin: Pos2, size: Vec2) -> Self {
        Self::new(name, origin, ItemShape::Rect { size })
    }

    pub fn oval(name: impl Into<String>, origin: Pos2, size: Vec2) -> Self {
        Self::new(name, origin, ItemShape::Oval { size })
    }

    pub fn polygon(name: impl Into<String>, points: Vec<Pos2>, smooth: bool) -> Self {
        let origin = points.first().copied().unwrap_or_default();
        Self::new(name, origin, ItemShape::Polygon { points, smooth })
    }

    // ---------------------------------------------------------------------
    // Builders, used before `add`

    /// Realize the item visible.
    pub fn shown(mut self) -> Self {
        self.hidden = false;
        self
    }

    pub fn with_fill(mut self, color: Color32) -> Self {
        self.fill_color = color;
        self.current_fill_color = color;
        self
    }

    pub fn with_outline(mut self, color: Color32, width: f32) -> Self {
        self.outline_color = color;
        self.outline_width = width;
        if !self.show_highlight {
            self.active_outline_width = width;
        }
        self
    }

    pub fn with_active_outline(mut self, color: Color32, width: f32) -> Self {
        self.active_outline_color = color;
        self.active_outline_width = width;
        self
    }

    pub fn with_flags(mut self, edit: impl FnOnce(&mut ItemFlags)) -> Self {
        edit(&mut self.flags);
        self
    }

    pub fn with_highlight_group(mut self, group: impl Into<String>) -> Self {
        self.highlight_group = Some(group.into());
        self
    }

    /// Pin the active outline to the resting one.
    pub fn without_highlight(mut self) -> Self {
        self.show_highlight = false;
        self.active_outline_width = self.outline_width;
        self
    }

    // ---------------------------------------------------------------------
    // Realization

    /// Create the backing primitive. Calling this on a realized item returns
    /// the existing primitive.
    pub fn add(&mut self, surface: &mut Surface) -> PrimitiveId {
        if let Some(id) = self.primitive.filter(|id| surface.contains(*id)) {
            return id;
        }
        let (stroke_color, stroke_width) = self.stroke_style();
        let id = surface.create(Primitive {
            kind: self.shape.primitive_kind(),
            points: self.shape.points(self.origin),
            fill: self.primitive_fill(),
            stroke_color,
            stroke_width,
            visible: !self.hidden,
        });
        self.primitive = Some(id);
        id
    }

    /// Delete the backing primitive.
    pub fn destroy(&mut self, surface: &mut Surface) {
        if let Some(id) = self.primitive.take() {
            surface.delete(id);
        }
    }

    fn stroke_style(&self) -> (Color32, f32) {
        if self.highlighted {
            (self.active_outline_color, self.active_outline_width)
        } else {
            (self.outline_color, self.outline_width)
        }
    }

    fn primitive_fill(&self) -> Option<Color32> {
        (!self.shape.is_line()).then_some(self.current_fill_color)
    }

    fn push_stroke(&self, surface: &mut Surface) {
        if let Some(id) = self.primitive {
            let (color, width) = self.stroke_style();
            surface.set_stroke_color(id, color);
            surface.set_stroke_width(id, width);
        }
    }

    fn refresh_fill(&mut self, surface: &mut Surface) {
        self.current_fill_color = if self.selected && self.flags.show_selection {
            self.selected_fill_color
        } else {
            self.fill_color
        };
        if let Some(id) = self.primitive {
            surface.set_fill(id, self.primitive_fill());
        }
    }

    // ---------------------------------------------------------------------
    // Setters, pushed to the surface immediately

    /// Only a real transition touches the surface.
    pub fn set_hidden(&mut self, surface: &mut Surface, hidden: bool) {
        if self.hidden == hidden {
            return;
        }
        self.hidden = hidden;
        if let Some(id) = self.primitive {
            surface.set_visible(id, !hidden);
        }
    }

    pub fn show(&mut self, surface: &mut Surface) {
        self.set_hidden(surface, false);
    }

    pub fn hide(&mut self, surface: &mut Surface) {
        self.set_hidden(surface, true);
    }

    pub fn set_selected(&mut self, surface: &mut Surface, selected: bool) {
        self.selected = selected;
        self.refresh_fill(surface);
    }

    pub fn set_highlighted(&mut self, surface: &mut Surface, highlighted: bool) {
        self.highlighted = highlighted;
        self.push_stroke(surface);
    }

    pub fn set_fill_color(&mut self, surface: &mut Surface, color: Color32) {
        self.fill_color = color;
        self.refresh_fill(surface);
    }

    pub fn set_selected_fill_color(&mut self, surface: &mut Surface, color: Color32) {
        self.selected_fill_color = color;
        self.refresh_fill(surface);
    }

    pub fn set_outline_color(&mut self, surface: &mut Surface, color: Color32) {
        self.outline_color = color;
        self.push_stroke(surface);
    }

    pub fn set_active_outline_color(&mut self, surface: &mut Surface, color: Color32) {
        self.active_outline_color = color;
        self.push_stroke(surface);
    }

    pub fn set_outline_width(&mut self, surface: &mut Surface, width: f32) {
        self.outline_width = width;
        if !self.show_highlight {
            self.active_outline_width = width;
        }
        self.push_stroke(surface);
    }

    pub fn set_active_outline_width(&mut self, surface: &mut Surface, width: f32) {
        self.active_outline_width = width;
        self.push_stroke(surface);
    }

    pub fn set_show_selection(&mut self, surface: &mut Surface, show: bool) {
        self.flags.show_selection = show;
        self.refresh_fill(surface);
    }

    /// Turning highlighting off pins the active width to the resting width.
    pub fn set_show_highlight(&mut self, surface: &mut Surface, show: bool) {
        self.show_highlight = show;
        if !show {
            self.active_outline_width = self.outline_width;
            self.push_stroke(surface);
        }
    }

    pub fn set_highlight_group(&mut self, group: Option<String>) {
        self.highlight_group = group;
    }

    /// Multiply both outline widths, as zooming does.
    pub fn scale_widths(&mut self, surface: &mut Surface, factor: f32) {
        self.outline_width *= factor;
        self.active_outline_width *= factor;
        self.push_stroke(surface);
    }

    /// Replace the point list of a line, wire or polygon item.
    ///
    /// Returns `false` for shapes defined by origin and size.
    pub fn set_points(&mut self, surface: &mut Surface, new_points: Vec<Pos2>) -> bool {
        match &mut self.shape {
            ItemShape::Line { points }
            | ItemShape::Wire { points }
            | ItemShape::Polygon { points, .. } => {
                *points = new_points.clone();
            }
            _ => return false,
        }
        if let Some(id) = self.primitive {
            surface.set_points(id, new_points);
        }
        true
    }

    pub fn raise(&self, surface: &mut Surface) {
        if let Some(id) = self.primitive {
            surface.raise(id);
        }
    }

    // ---------------------------------------------------------------------
    // Queries

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn origin(&self) -> Pos2 {
        self.origin
    }

    /// The geometry the item was declared with. Wires are rewritten as their
    /// ends move; other shapes keep their creation-time points, so use
    /// [`Item::points`] for where the item is drawn now.
    pub fn shape(&self) -> &ItemShape {
        &self.shape
    }

    /// Current vertices on the surface: two corners for rects and ovals, the
    /// point list otherwise. Empty before the item is drawn.
    pub fn points(&self, surface: &Surface) -> Vec<Pos2> {
        self.primitive
            .and_then(|id| surface.get(id))
            .map(|primitive| primitive.points.clone())
            .unwrap_or_default()
    }

    pub fn primitive(&self) -> Option<PrimitiveId> {
        self.primitive
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    pub fn shows_highlight(&self) -> bool {
        self.show_highlight
    }

    pub fn fill_color(&self) -> Color32 {
        self.fill_color
    }

    pub fn selected_fill_color(&self) -> Color32 {
        self.selected_fill_color
    }

    pub fn current_fill_color(&self) -> Color32 {
        self.current_fill_color
    }

    pub fn outline_color(&self) -> Color32 {
        self.outline_color
    }

    pub fn active_outline_color(&self) -> Color32 {
        self.active_outline_color
    }

    pub fn outline_width(&self) -> f32 {
        self.outline_width
    }

    pub fn active_outline_width(&self) -> f32 {
        self.active_outline_width
    }

    pub fn highlight_group(&self) -> Option<&str> {
        self.highlight_group.as_deref()
    }

    pub fn flags(&self) -> &ItemFlags {
        &self.flags
    }

    pub fn flags_mut(&mut self) -> &mut ItemFlags {
        &mut self.flags
    }

    pub fn bbox(&self, surface: &Surface) -> Option<Rect> {
        surface.bbox(self.primitive?)
    }

    /// Center of the rendered bounding box.
    pub fn center_point(&self, surface: &Surface) -> Option<Pos2> {
        self.bbox(surface).map(|rect| rect.center())
    }
}
