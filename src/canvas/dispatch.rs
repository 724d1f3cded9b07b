//! Pointer input routing.
//!
//! Every press resolves the primitive under the pointer to a concrete
//! object and item through the hit index and hands that pair to the
//! gesture it starts. Motion and release go to whichever gesture is active.

use egui::{Modifiers, PointerButton, Pos2, Rect, Vec2, vec2};

use super::{Canvas, Gesture};
use crate::event::CanvasEvent;
use crate::geometry::smooth_coords;
use crate::input::InputEvent;
use crate::object::ObjectId;
use crate::palette;
use crate::registry::ShapeArgs;
use crate::shapes::preview_primitives;
use crate::surface::{Primitive, PrimitiveId, PrimitiveKind};

/// Extra pick radius around primitives, in canvas units.
const HIT_SLOP: f32 = 2.0;
/// How far from a terminator a connection may be dropped.
const DROP_HALO: f32 = 8.0;

impl Canvas {
    pub fn handle_input(&mut self, event: &InputEvent) {
        match event {
            InputEvent::PointerDown {
                location,
                button: PointerButton::Primary,
                modifiers,
            } if location.is_in_canvas => self.pointer_down(location.position, *modifiers),
            InputEvent::PointerUp {
                location,
                button: PointerButton::Primary,
                ..
            } => self.pointer_up(location.position),
            InputEvent::PointerMove { location } => self.pointer_move(location.position),
            InputEvent::PointerGone => self.cancel_gesture(),
            InputEvent::Wheel {
                location,
                delta,
                modifiers,
            } if location.is_in_canvas => self.wheel(location.position, *delta, *modifiers),
            _ => {}
        }
    }

    /// True while a drag, connection, marquee or pan is in progress.
    pub fn is_busy(&self) -> bool {
        self.gesture != Gesture::Idle
    }

    /// Topmost primitive of a bound, non-background object under `pos`.
    fn bound_hit(&self, pos: Pos2) -> Option<(PrimitiveId, ObjectId, String)> {
        let primitive = self.surface.find_at(pos, HIT_SLOP, |id| {
            self.hit_index
                .get(&id)
                .and_then(|(object, _)| self.objects.get(object))
                .is_some_and(|object| object.has_mouse_bindings())
        })?;
        let (object, item) = self.hit_index.get(&primitive)?.clone();
        Some((primitive, object, item))
    }

    fn pointer_down(&mut self, screen: Pos2, modifiers: Modifiers) {
        // A press while a gesture is open means its release was lost.
        self.cancel_gesture();
        let pos = self.viewport.screen_to_canvas(screen);

        let Some((primitive, id, item_name)) = self.bound_hit(pos) else {
            self.press_canvas(screen, pos, modifiers);
            return;
        };
        let Some(object) = self.objects.get(&id) else {
            return;
        };
        let Some(item) = object.item(&item_name) else {
            return;
        };
        let flags = *item.flags();
        let object_flags = *object.flags();
        let toggleable = object.behavior().is_toggleable();

        if flags.connectable_initiator && object_flags.connectable {
            self.begin_connection(id, item_name);
        } else if flags.draggable && object_flags.draggable {
            if modifiers.command {
                self.toggle_selected_by_id(id);
            } else {
                self.begin_drag(id, primitive, pos);
            }
        } else if flags.clickable && object_flags.clickable && toggleable {
            if let Err(err) = self.toggle_by_id(id) {
                log::warn!("Toggle failed: {err}");
            }
        }
    }

    fn press_canvas(&mut self, screen: Pos2, pos: Pos2, modifiers: Modifiers) {
        if modifiers.command {
            self.gesture = Gesture::Panning { last: screen };
            return;
        }
        let preview = self.surface.create(Primitive {
            kind: PrimitiveKind::Rect,
            points: vec![pos, pos],
            fill: None,
            stroke_color: palette::MARQUEE,
            stroke_width: 1.0,
            visible: true,
        });
        self.gesture = Gesture::Marquee {
            start: pos,
            preview,
        };
        self.status("Starting selection...");
    }

    fn pointer_move(&mut self, screen: Pos2) {
        let pos = self.viewport.screen_to_canvas(screen);
        match self.gesture {
            Gesture::Idle => self.track_hover(pos),
            Gesture::Dragging { object } => self.drag_motion(object, pos),
            Gesture::Connecting { object } => self.connection_motion(object, pos),
            Gesture::Marquee { start, preview } => {
                self.surface.set_points(preview, vec![start, pos]);
                self.status("Dragging Selection Box...");
            }
            Gesture::Panning { last } => {
                let extent = self.extent();
                self.viewport.scroll_by(last - screen, extent);
                self.gesture = Gesture::Panning { last: screen };
            }
        }
    }

    fn pointer_up(&mut self, screen: Pos2) {
        let pos = self.viewport.screen_to_canvas(screen);
        match std::mem::take(&mut self.gesture) {
            Gesture::Idle | Gesture::Panning { .. } => {}
            Gesture::Dragging { object } => {
                if let Some(object) = self.objects.get_mut(&object) {
                    object.end_drag();
                    log::debug!("Finished dragging {}", object.tag());
                }
            }
            Gesture::Connecting { object } => self.finish_connection(object, pos),
            Gesture::Marquee { start, preview } => self.finish_marquee(start, pos, preview),
        }
        self.track_hover(pos);
    }

    fn wheel(&mut self, screen: Pos2, delta: Vec2, modifiers: Modifiers) {
        if modifiers.command {
            if delta.y != 0.0 {
                self.zoom_at(screen, delta.y > 0.0);
            }
            return;
        }
        let delta = if modifiers.shift {
            vec2(delta.x + delta.y, 0.0)
        } else {
            delta
        };
        let extent = self.extent();
        self.viewport.scroll_by(-delta, extent);
    }

    /// Drop whatever gesture is open, removing its previews.
    pub fn cancel_gesture(&mut self) {
        match std::mem::take(&mut self.gesture) {
            Gesture::Idle | Gesture::Panning { .. } => {}
            Gesture::Dragging { object } => {
                if let Some(object) = self.objects.get_mut(&object) {
                    object.end_drag();
                }
            }
            Gesture::Connecting { object } => {
                if let Some(pending) = self
                    .objects
                    .get_mut(&object)
                    .and_then(|object| object.take_pending_connection())
                {
                    for primitive in pending.preview {
                        self.surface.delete(primitive);
                    }
                }
            }
            Gesture::Marquee { preview, .. } => {
                self.surface.delete(preview);
            }
        }
    }

    pub(super) fn abandon_gesture_on(&mut self, id: ObjectId) {
        let involved = matches!(
            self.gesture,
            Gesture::Dragging { object } | Gesture::Connecting { object } if object == id
        );
        if involved {
            self.cancel_gesture();
        }
    }

    // ---------------------------------------------------------------------
    // Hover

    fn track_hover(&mut self, pos: Pos2) {
        let hit = self.bound_hit(pos).map(|(primitive, ..)| primitive);
        if hit == self.hovered {
            return;
        }
        if let Some(old) = self.hovered.take() {
            self.leave_item(old);
        }
        if let Some(new) = hit {
            self.enter_item(new);
            self.hovered = Some(new);
        }
    }

    // ---------------------------------------------------------------------
    // Drag

    fn begin_drag(&mut self, id: ObjectId, primitive: PrimitiveId, pos: Pos2) {
        let Some(object) = self.objects.get_mut(&id) else {
            return;
        };
        object.begin_drag(primitive, pos);
        log::debug!("Started dragging {}", object.tag());
        self.gesture = Gesture::Dragging { object: id };
    }

    fn drag_motion(&mut self, id: ObjectId, pos: Pos2) {
        let Some(object) = self.objects.get_mut(&id) else {
            self.gesture = Gesture::Idle;
            return;
        };
        let Some(delta) = object.drag_to(pos) else {
            return;
        };
        if delta == Vec2::ZERO {
            return;
        }
        let pressed_selected = object
            .drag_primitive()
            .and_then(|primitive| object.get_item_by_id(primitive))
            .is_some_and(|item| item.is_selected());
        let tag = object.tag().to_owned();

        let moved: Vec<ObjectId> = if pressed_selected {
            self.objects
                .values()
                .filter(|object| object.is_selected())
                .map(|object| object.id())
                .collect()
        } else {
            vec![id]
        };
        for id in &moved {
            if let Some(object) = self.objects.get_mut(id) {
                object.move_by(&mut self.surface, delta);
            }
        }
        self.update_wires_of(&moved);
        self.status(&format!("Dragging {tag} at {}x{}", pos.x.round(), pos.y.round()));
    }

    // ---------------------------------------------------------------------
    // Connection

    fn begin_connection(&mut self, id: ObjectId, item: String) {
        let Some(object) = self.objects.get_mut(&id) else {
            return;
        };
        let Some(anchor) = object
            .item(&item)
            .and_then(|item| item.center_point(&self.surface))
        else {
            return;
        };
        object.begin_connection(item, anchor);
        let message = format!(
            "Making Connection {} at {} x {}",
            object.tag(),
            anchor.x.round(),
            anchor.y.round()
        );
        log::debug!("{message}");
        self.gesture = Gesture::Connecting { object: id };
        self.status(&message);
    }

    /// Rubber-band preview from the anchor to the pointer.
    fn connection_motion(&mut self, id: ObjectId, pos: Pos2) {
        let offset = self.config.wire_curve_offset * self.zoom_level;
        let zoom = self.zoom_level;
        let Some(pending) = self
            .objects
            .get_mut(&id)
            .and_then(|object| object.pending_connection_mut())
        else {
            self.gesture = Gesture::Idle;
            return;
        };
        let coords = smooth_coords(pending.anchor, pos, offset);
        if pending.preview.is_empty() {
            for primitive in preview_primitives(coords, zoom) {
                pending.preview.push(self.surface.create(primitive));
            }
        } else {
            for primitive in &pending.preview {
                self.surface.set_points(*primitive, coords.to_vec());
            }
        }
    }

    fn finish_connection(&mut self, id: ObjectId, pos: Pos2) {
        let Some(pending) = self
            .objects
            .get_mut(&id)
            .and_then(|object| object.take_pending_connection())
        else {
            return;
        };
        for primitive in pending.preview {
            self.surface.delete(primitive);
        }
        if let Err(reason) = self.complete_connection(id, &pending.item, pending.anchor, pos) {
            log::warn!("Connection abandoned: {reason}");
        }
    }

    /// Resolve the drop target and build the wire. Every rejection happens
    /// before the wire is created.
    fn complete_connection(
        &mut self,
        from: ObjectId,
        from_item: &str,
        anchor: Pos2,
        pos: Pos2,
    ) -> Result<(), String> {
        // Wires sit on top of the dots they touch but never accept a drop.
        let target = self
            .surface
            .find_closest(pos, DROP_HALO, |id| {
                self.hit_index
                    .get(&id)
                    .and_then(|(object, _)| self.objects.get(object))
                    .is_some_and(|object| !object.flags().connector)
            })
            .ok_or("nothing under the pointer")?;
        let (to, to_item) = self
            .hit_index
            .get(&target)
            .cloned()
            .ok_or("drop target is not an item")?;

        let source = self.objects.get(&from).ok_or("source object is gone")?;
        let target_object = self.objects.get(&to).ok_or("target object is gone")?;
        let is_terminator = target_object
            .item(&to_item)
            .is_some_and(|item| item.flags().connectable_terminator);
        if !is_terminator {
            return Err(format!("{to_item} of {} is not a terminator", target_object.tag()));
        }
        let from_slot = source
            .node_for_item(from_item)
            .ok_or_else(|| format!("{from_item} of {} has no node", source.tag()))?
            .clone();
        let to_slot = target_object
            .node_for_item(&to_item)
            .ok_or_else(|| format!("{to_item} of {} has no node", target_object.tag()))?
            .clone();
        let from_tag = source.tag().to_owned();
        let to_tag = target_object.tag().to_owned();

        let end = target_object
            .item(&to_item)
            .and_then(|item| item.center_point(&self.surface))
            .unwrap_or(pos);
        self.status(&format!(
            "Terminate Connection {to_tag} at {}x{}",
            end.x.round(),
            end.y.round()
        ));

        for slot in [&from_slot, &to_slot] {
            if let Some(node) = self.nodes.get(&slot.id) {
                if let Err(err) = node.check_capacity() {
                    self.status(&format!("Connection rejected: {err}"));
                    return Err(err.to_string());
                }
            }
        }

        let mut name = format!("{from_tag}_{}__to__{to_tag}_{}", from_slot.key, to_slot.key);
        if self.tags.contains_key(&name) {
            name.clear();
        }
        let wire = self
            .create("GWire", ShapeArgs::new(name).endpoints(anchor, end))
            .map_err(|err| err.to_string())?;
        if let Err(err) = self.connect_by_id(wire, from_slot.id, to_slot.id) {
            let tag = self.tag_of(wire);
            if let Err(cleanup) = self.destroy(&tag) {
                log::warn!("Could not remove {tag}: {cleanup}");
            }
            return Err(err.to_string());
        }
        self.redraw_wire(wire);
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Marquee

    fn finish_marquee(&mut self, start: Pos2, end: Pos2, preview: PrimitiveId) {
        self.surface.delete(preview);
        if start == end {
            self.clear_selection();
            return;
        }
        let area = Rect::from_two_pos(start, end);
        let enclosed: Vec<PrimitiveId> = self
            .surface
            .find_enclosed(area)
            .into_iter()
            .filter(|id| self.hit_index.contains_key(id))
            .collect();
        for object in self.objects.values_mut() {
            if !object.flags().selectable {
                continue;
            }
            object.mark_items(&mut self.surface, &enclosed);
            object.update_selection_status(&mut self.surface);
        }
        self.status("Items selected.");
        let selected = self.selected_tags();
        log::debug!("Marquee selected {selected:?}");
        self.emit(CanvasEvent::SelectionChanged { selected });
    }
}
