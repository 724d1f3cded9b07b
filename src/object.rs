//! Named aggregates of items: the unit of selection, dragging and hovering.

use std::fmt;

use egui::{Pos2, Vec2};

use crate::geometry::scale_about;
use crate::item::Item;
use crate::node::{ConnectionId, NodeId};
use crate::palette;
use crate::surface::{PrimitiveId, Surface};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub(crate) u64);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "object {}", self.0)
    }
}

/// Object level capabilities.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectFlags {
    pub selectable: bool,
    pub highlightable: bool,
    pub draggable: bool,
    pub clickable: bool,
    /// Owns nodes that wires can attach to.
    pub connectable: bool,
    /// Is a wire: owns a connection.
    pub connector: bool,
    /// Never hovered, never resolved by hit lookups; presses fall through to the canvas.
    pub background: bool,
}

impl Default for ObjectFlags {
    fn default() -> Self {
        Self {
            selectable: true,
            highlightable: true,
            draggable: true,
            clickable: true,
            connectable: false,
            connector: false,
            background: false,
        }
    }
}

/// State-dependent behavior driven by [`crate::Canvas::toggle`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Behavior {
    Static,
    /// Slides the `slider_switch` item by `capsule_length` and recolors `inner`.
    ToggleSwitch { capsule_length: f32 },
    /// Swaps `body` and `filament` between the lit and unlit palettes.
    LightBulb,
}

impl Behavior {
    pub fn is_toggleable(&self) -> bool {
        !matches!(self, Self::Static)
    }
}

/// A node as seen from its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSlot {
    pub key: String,
    pub item: String,
    pub id: NodeId,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct DragState {
    pub primitive: PrimitiveId,
    pub last: Pos2,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PendingConnection {
    /// Initiator item the gesture started on.
    pub item: String,
    pub anchor: Pos2,
    pub preview: Vec<PrimitiveId>,
}

#[derive(Debug, Clone)]
pub struct Object {
    id: ObjectId,
    tag: String,
    kind: String,
    position: Pos2,
    items: Vec<Item>,
    nodes: Vec<NodeSlot>,
    connection: Option<ConnectionId>,
    wire_endpoints: Option<[Pos2; 2]>,
    selected: bool,
    flags: ObjectFlags,
    behavior: Behavior,
    on: bool,
    bindings: bool,
    drag: Option<DragState>,
    pending: Option<PendingConnection>,
}

impl Object {
    pub(crate) fn new(
        id: ObjectId,
        tag: String,
        kind: String,
        position: Pos2,
        items: Vec<Item>,
        flags: ObjectFlags,
        behavior: Behavior,
    ) -> Self {
        Self {
            id,
            tag,
            kind,
            position,
            items,
            nodes: Vec::new(),
            connection: None,
            wire_endpoints: None,
            selected: false,
            flags,
            behavior,
            on: false,
            bindings: false,
            drag: None,
            pending: None,
        }
    }

    pub(crate) fn set_nodes(&mut self, nodes: Vec<NodeSlot>) {
        self.nodes = nodes;
    }

    pub(crate) fn set_connection(&mut self, connection: ConnectionId) {
        self.connection = Some(connection);
    }

    pub(crate) fn set_wire_endpoints(&mut self, endpoints: [Pos2; 2]) {
        self.wire_endpoints = Some(endpoints);
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Registered type name this object was created from.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn position(&self) -> Pos2 {
        self.position
    }

    pub fn flags(&self) -> &ObjectFlags {
        &self.flags
    }

    pub fn flags_mut(&mut self) -> &mut ObjectFlags {
        &mut self.flags
    }

    pub fn behavior(&self) -> Behavior {
        self.behavior
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn item(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.name() == name)
    }

    pub(crate) fn item_mut(&mut self, name: &str) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| item.name() == name)
    }

    /// Item backed by `primitive`, by linear scan of this object only.
    pub fn get_item_by_id(&self, primitive: PrimitiveId) -> Option<&Item> {
        self.items.iter().find(|item| item.primitive() == Some(primitive))
    }

    pub fn primitives(&self) -> impl Iterator<Item = PrimitiveId> + '_ {
        self.items.iter().filter_map(Item::primitive)
    }

    pub fn nodes(&self) -> &[NodeSlot] {
        &self.nodes
    }

    pub fn node(&self, key: &str) -> Option<NodeId> {
        self.nodes.iter().find(|slot| slot.key == key).map(|slot| slot.id)
    }

    pub fn node_for_item(&self, item: &str) -> Option<&NodeSlot> {
        self.nodes.iter().find(|slot| slot.item == item)
    }

    /// The connection a wire owns.
    pub fn connection(&self) -> Option<ConnectionId> {
        self.connection
    }

    /// Cached endpoints of a wire, before smoothing.
    pub fn wire_endpoints(&self) -> Option<[Pos2; 2]> {
        self.wire_endpoints
    }

    pub fn has_mouse_bindings(&self) -> bool {
        self.bindings
    }

    /// Opt in to pointer gestures and hover. Returns `false` if already bound.
    pub(crate) fn add_mouse_bindings(&mut self) -> bool {
        !std::mem::replace(&mut self.bindings, true)
    }

    // ---------------------------------------------------------------------
    // Visibility and styling

    pub(crate) fn show(&mut self, surface: &mut Surface) {
        for item in &mut self.items {
            item.show(surface);
        }
    }

    pub(crate) fn hide(&mut self, surface: &mut Surface) {
        for item in &mut self.items {
            item.hide(surface);
        }
    }

    pub(crate) fn set_outline_width(&mut self, surface: &mut Surface, width: f32) {
        for item in &mut self.items {
            item.set_outline_width(surface, width);
        }
    }

    pub(crate) fn set_active_outline_width(&mut self, surface: &mut Surface, width: f32) {
        for item in &mut self.items {
            item.set_active_outline_width(surface, width);
        }
    }

    /// Highlight `item_name`, or every highlightable sibling sharing its group.
    pub(crate) fn set_highlighted(&mut self, surface: &mut Surface, item_name: &str, on: bool) {
        let Some(item) = self.item(item_name) else {
            return;
        };
        if !item.flags().highlightable {
            return;
        }
        match item.highlight_group().map(str::to_owned) {
            None => {
                if let Some(item) = self.item_mut(item_name) {
                    item.set_highlighted(surface, on);
                }
            }
            Some(group) => {
                for sibling in &mut self.items {
                    if sibling.flags().highlightable && sibling.highlight_group() == Some(group.as_str()) {
                        sibling.set_highlighted(surface, on);
                    }
                }
            }
        }
    }

    pub(crate) fn raise_up(&self, surface: &mut Surface) {
        for item in &self.items {
            item.raise(surface);
        }
    }

    pub(crate) fn raise_always_on_top(&self, surface: &mut Surface) {
        for item in self.items.iter().filter(|item| item.flags().always_on_top) {
            item.raise(surface);
        }
    }

    // ---------------------------------------------------------------------
    // Selection

    pub(crate) fn set_selected(&mut self, surface: &mut Surface) {
        if !self.flags.selectable {
            return;
        }
        self.selected = true;
        for item in &mut self.items {
            item.set_selected(surface, true);
        }
    }

    pub(crate) fn clear_selected(&mut self, surface: &mut Surface) {
        if !self.flags.selectable {
            return;
        }
        self.selected = false;
        for item in &mut self.items {
            item.set_selected(surface, false);
        }
    }

    pub(crate) fn toggle_selected(&mut self, surface: &mut Surface) {
        if self.selected {
            self.clear_selected(surface);
        } else {
            self.set_selected(surface);
        }
    }

    /// Promote the whole object if any item is selected, demote it otherwise.
    pub(crate) fn update_selection_status(&mut self, surface: &mut Surface) {
        if self.items.iter().any(Item::is_selected) {
            self.set_selected(surface);
        } else {
            self.clear_selected(surface);
        }
    }

    /// Mark the items backed by `primitives` as selected and clear the rest,
    /// without touching the object level flag.
    pub(crate) fn mark_items(&mut self, surface: &mut Surface, primitives: &[PrimitiveId]) {
        for item in &mut self.items {
            let marked = item.primitive().is_some_and(|id| primitives.contains(&id));
            item.set_selected(surface, marked);
        }
    }

    // ---------------------------------------------------------------------
    // Geometry

    pub(crate) fn move_by(&mut self, surface: &mut Surface, delta: Vec2) {
        surface.move_by(self.primitives(), delta);
        self.position += delta;
    }

    /// Scale geometry about `origin` and outline widths by `factor`.
    pub(crate) fn scale(&mut self, surface: &mut Surface, origin: Pos2, factor: f32) {
        surface.scale(self.primitives(), origin, factor);
        self.scale_widths(surface, factor);
        self.position = scale_about(self.position, origin, factor);
        if let Some([a, b]) = self.wire_endpoints {
            self.wire_endpoints = Some([
                scale_about(a, origin, factor),
                scale_about(b, origin, factor),
            ]);
        }
    }

    pub(crate) fn scale_widths(&mut self, surface: &mut Surface, factor: f32) {
        for item in &mut self.items {
            item.scale_widths(surface, factor);
        }
    }

    /// Point both wire strokes at a new control polygon and lift them.
    pub(crate) fn redraw_wire(&mut self, surface: &mut Surface, endpoints: [Pos2; 2], coords: [Pos2; 4]) {
        self.wire_endpoints = Some(endpoints);
        for item in &mut self.items {
            item.set_points(surface, coords.to_vec());
            item.raise(surface);
        }
    }

    pub(crate) fn destroy(&mut self, surface: &mut Surface) {
        for item in &mut self.items {
            item.destroy(surface);
        }
    }

    // ---------------------------------------------------------------------
    // Gesture bookkeeping

    pub(crate) fn begin_drag(&mut self, primitive: PrimitiveId, pos: Pos2) {
        self.drag = Some(DragState {
            primitive,
            last: pos,
        });
    }

    /// Pointer delta since the last recorded position, or `None` when no drag
    /// is in progress.
    pub(crate) fn drag_to(&mut self, pos: Pos2) -> Option<Vec2> {
        let drag = self.drag.as_mut()?;
        let delta = pos - drag.last;
        drag.last = pos;
        Some(delta)
    }

    pub(crate) fn drag_primitive(&self) -> Option<PrimitiveId> {
        self.drag.map(|drag| drag.primitive)
    }

    pub(crate) fn end_drag(&mut self) {
        self.drag = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub(crate) fn begin_connection(&mut self, item: String, anchor: Pos2) {
        self.pending = Some(PendingConnection {
            item,
            anchor,
            preview: Vec::new(),
        });
    }

    pub(crate) fn pending_connection_mut(&mut self) -> Option<&mut PendingConnection> {
        self.pending.as_mut()
    }

    pub(crate) fn take_pending_connection(&mut self) -> Option<PendingConnection> {
        self.pending.take()
    }

    pub fn is_connecting(&self) -> bool {
        self.pending.is_some()
    }

    // ---------------------------------------------------------------------
    // Toggle state

    /// Apply a new on/off state. Returns the slider travel still to animate
    /// for toggle switches, `None` when nothing changed or nothing slides.
    pub(crate) fn apply_state(&mut self, surface: &mut Surface, on: bool, zoom: f32) -> Option<Vec2> {
        if self.on == on || !self.behavior.is_toggleable() {
            return None;
        }
        self.on = on;
        match self.behavior {
            Behavior::Static => None,
            Behavior::ToggleSwitch { capsule_length } => {
                let color = if on { palette::SWITCH_ON } else { palette::SWITCH_OFF };
                if let Some(inner) = self.item_mut("inner") {
                    inner.set_fill_color(surface, color);
                }
                let travel = capsule_length * zoom;
                Some(Vec2::new(if on { -travel } else { travel }, 0.0))
            }
            Behavior::LightBulb => {
                let (fill, glow) = if on {
                    (palette::BULB_LIT, palette::FILAMENT_GLOW)
                } else {
                    (palette::FILL, palette::OUTLINE)
                };
                if let Some(filament) = self.item_mut("filament") {
                    filament.set_fill_color(surface, fill);
                    filament.set_outline_color(surface, glow);
                    filament.set_active_outline_color(surface, glow);
                }
                if let Some(body) = self.item_mut("body") {
                    body.set_fill_color(surface, fill);
                }
                None
            }
        }
    }
}
