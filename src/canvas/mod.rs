//! The root container: live objects, the shape registry, hit lookups and
//! the node/connection arenas.

mod dispatch;
mod view;
mod wiring;

use std::collections::HashMap;
use std::fmt;

use egui::{Pos2, Rect, Vec2};

use crate::blueprint::Blueprint;
use crate::config::CanvasConfig;
use crate::error::{ShapeError, ShapeResult};
use crate::event::{CanvasEvent, EventEnvelope, EventQueue};
use crate::id_generator::IdGenerator;
use crate::item::Item;
use crate::node::{Connection, ConnectionId, Node, NodeId};
use crate::object::{NodeSlot, Object, ObjectId};
use crate::registry::{BuildContext, Registry, ShapeArgs};
use crate::shapes;
use crate::surface::{Primitive, PrimitiveId, PrimitiveKind, Surface};
use crate::viewport::Viewport;

pub type StatusSink = Box<dyn FnMut(&str)>;

/// Pointer gesture in progress. At most one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum Gesture {
    #[default]
    Idle,
    Dragging {
        object: ObjectId,
    },
    Connecting {
        object: ObjectId,
    },
    Marquee {
        start: Pos2,
        preview: PrimitiveId,
    },
    /// Scrolling the view; `last` is in screen coordinates.
    Panning {
        last: Pos2,
    },
}

/// A toggle switch slider still travelling.
#[derive(Debug, Clone, Copy, PartialEq)]
struct SlideAnimation {
    object: ObjectId,
    primitive: PrimitiveId,
    step: Vec2,
    remaining: u32,
}

pub struct Canvas {
    config: CanvasConfig,
    surface: Surface,
    viewport: Viewport,
    registry: Registry,

    objects: HashMap<ObjectId, Object>,
    tags: HashMap<String, ObjectId>,
    /// Primitive to owning object and item name. Background objects are not indexed.
    hit_index: HashMap<PrimitiveId, (ObjectId, String)>,
    nodes: HashMap<NodeId, Node>,
    connections: HashMap<ConnectionId, Connection>,

    object_ids: IdGenerator,
    node_ids: IdGenerator,
    connection_ids: IdGenerator,
    event_ids: IdGenerator,
    type_counters: HashMap<String, u64>,

    background: PrimitiveId,
    zoom_level: f32,
    gesture: Gesture,
    hovered: Option<PrimitiveId>,
    animations: Vec<SlideAnimation>,

    events: EventQueue,
    status_sink: Option<StatusSink>,
}

impl fmt::Debug for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Canvas")
            .field("objects", &self.objects.len())
            .field("nodes", &self.nodes.len())
            .field("connections", &self.connections.len())
            .field("zoom_level", &self.zoom_level)
            .field("gesture", &self.gesture)
            .field("registry", &self.registry)
            .field("events", &self.events.len())
            .field(
                "status_sink",
                &self.status_sink.as_ref().map(|_| "<status sink>"),
            )
            .finish_non_exhaustive()
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(CanvasConfig::default())
    }
}

impl Canvas {
    /// An empty canvas with no registered shape types.
    pub fn new(config: CanvasConfig) -> Self {
        let mut surface = Surface::new();
        let color = config.background();
        let background = surface.create(Primitive {
            kind: PrimitiveKind::Rect,
            points: vec![Pos2::ZERO, Pos2::new(config.width, config.height)],
            fill: Some(color),
            stroke_color: color,
            stroke_width: 0.0,
            visible: true,
        });
        let events = EventQueue::new("canvas", config.event_queue_capacity);
        Self {
            config,
            surface,
            viewport: Viewport::default(),
            registry: Registry::new(),
            objects: HashMap::new(),
            tags: HashMap::new(),
            hit_index: HashMap::new(),
            nodes: HashMap::new(),
            connections: HashMap::new(),
            object_ids: IdGenerator::default(),
            node_ids: IdGenerator::default(),
            connection_ids: IdGenerator::default(),
            event_ids: IdGenerator::default(),
            type_counters: HashMap::new(),
            background,
            zoom_level: 1.0,
            gesture: Gesture::Idle,
            hovered: None,
            animations: Vec::new(),
            events,
            status_sink: None,
        }
    }

    /// A canvas with every built-in shape type registered.
    pub fn with_builtins(config: CanvasConfig) -> Self {
        let mut canvas = Self::new(config);
        canvas.register_builtins();
        canvas
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The scrollable background rectangle.
    pub fn background(&self) -> PrimitiveId {
        self.background
    }

    // ---------------------------------------------------------------------
    // Registry

    pub fn register<F>(&mut self, type_name: impl Into<String>, constructor: F)
    where
        F: Fn(&ShapeArgs, &BuildContext) -> ShapeResult<Blueprint> + 'static,
    {
        self.registry.register(type_name, constructor);
    }

    pub fn register_builtins(&mut self) {
        shapes::register_builtins(&mut self.registry);
    }

    // ---------------------------------------------------------------------
    // Creation

    /// Build an object of `type_name`, realize its items and nodes, and add
    /// it to the live table. An empty `args.name` picks `"<type>_<n>"`.
    ///
    /// Nothing is realized unless every check passes.
    pub fn create(&mut self, type_name: &str, args: ShapeArgs) -> ShapeResult<ObjectId> {
        let ctx = BuildContext {
            zoom: self.zoom_level,
            wire_curve_offset: self.config.wire_curve_offset,
        };
        let blueprint = self.registry.build(type_name, &args, &ctx)?;

        let tag = if args.name.is_empty() {
            self.auto_name(type_name)
        } else {
            args.name
        };
        if self.tags.contains_key(&tag) {
            return Err(ShapeError::NameInUse(tag));
        }
        for node in &blueprint.nodes {
            if blueprint.item(&node.item).is_none() {
                return Err(ShapeError::UnknownItem {
                    object: tag,
                    item: node.item.clone(),
                });
            }
        }

        let Blueprint {
            position,
            mut items,
            nodes,
            flags,
            behavior,
            scale_with_zoom,
            wire_endpoints,
        } = blueprint;

        let id = ObjectId(self.object_ids.generate());
        for item in &mut items {
            let primitive = item.add(&mut self.surface);
            if !flags.background {
                self.hit_index.insert(primitive, (id, item.name().to_owned()));
            }
        }

        let mut object = Object::new(
            id,
            tag.clone(),
            type_name.to_owned(),
            position,
            items,
            flags,
            behavior,
        );
        if scale_with_zoom && self.zoom_level != 1.0 {
            object.scale(&mut self.surface, position, self.zoom_level);
        }

        let mut slots = Vec::with_capacity(nodes.len());
        for node in nodes {
            let node_id = NodeId(self.node_ids.generate());
            self.nodes.insert(
                node_id,
                Node::new(node_id, node.label, node.key.clone(), id, node.item.clone()),
            );
            slots.push(NodeSlot {
                key: node.key,
                item: node.item,
                id: node_id,
            });
        }
        object.set_nodes(slots);

        if flags.connector {
            let connection = ConnectionId(self.connection_ids.generate());
            self.connections.insert(
                connection,
                Connection::new(connection, format!("{tag} connection"), id),
            );
            object.set_connection(connection);
        }
        if let Some(endpoints) = wire_endpoints {
            object.set_wire_endpoints(endpoints);
        }

        log::info!("Created {type_name} {tag} at {}x{}", position.x, position.y);
        self.objects.insert(id, object);
        self.tags.insert(tag.clone(), id);
        self.emit(CanvasEvent::ObjectCreated {
            tag,
            kind: type_name.to_owned(),
        });
        Ok(id)
    }

    fn auto_name(&mut self, type_name: &str) -> String {
        let counter = self.type_counters.entry(type_name.to_owned()).or_insert(0);
        loop {
            *counter += 1;
            let name = format!("{type_name}_{counter}");
            if !self.tags.contains_key(&name) {
                return name;
            }
        }
    }

    // ---------------------------------------------------------------------
    // Lookup

    pub fn object(&self, tag: &str) -> Option<&Object> {
        self.tags.get(tag).and_then(|id| self.objects.get(id))
    }

    pub fn object_by_id(&self, id: ObjectId) -> Option<&Object> {
        self.objects.get(&id)
    }

    pub fn objects(&self) -> impl Iterator<Item = &Object> + '_ {
        self.objects.values()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Object owning a rendered primitive. Background objects never resolve.
    pub fn get_object_by_id(&self, primitive: PrimitiveId) -> Option<&Object> {
        let (object, _) = self.hit_index.get(&primitive)?;
        self.objects.get(object)
    }

    /// Item backed by a rendered primitive. Background objects never resolve.
    pub fn get_item_by_id(&self, primitive: PrimitiveId) -> Option<&Item> {
        let (object, item) = self.hit_index.get(&primitive)?;
        self.objects.get(object)?.item(item)
    }

    pub fn node(&self, tag: &str, key: &str) -> ShapeResult<NodeId> {
        let object = self.require(tag)?;
        object.node(key).ok_or_else(|| ShapeError::UnknownNode {
            object: tag.to_owned(),
            node: key.to_owned(),
        })
    }

    pub fn node_info(&self, node: NodeId) -> Option<&Node> {
        self.nodes.get(&node)
    }

    pub fn connection_info(&self, connection: ConnectionId) -> Option<&Connection> {
        self.connections.get(&connection)
    }

    /// Tags of every selected object, sorted.
    pub fn selected_tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = self
            .objects
            .values()
            .filter(|object| object.is_selected())
            .map(|object| object.tag().to_owned())
            .collect();
        tags.sort();
        tags
    }

    fn id_of(&self, tag: &str) -> ShapeResult<ObjectId> {
        self.tags
            .get(tag)
            .copied()
            .ok_or_else(|| ShapeError::UnknownObject(tag.to_owned()))
    }

    fn require(&self, tag: &str) -> ShapeResult<&Object> {
        self.object(tag)
            .ok_or_else(|| ShapeError::UnknownObject(tag.to_owned()))
    }

    fn require_mut(&mut self, tag: &str) -> ShapeResult<&mut Object> {
        let id = self.id_of(tag)?;
        self.objects
            .get_mut(&id)
            .ok_or_else(|| ShapeError::UnknownObject(tag.to_owned()))
    }

    fn tag_of(&self, id: ObjectId) -> String {
        self.objects
            .get(&id)
            .map_or_else(|| id.to_string(), |object| object.tag().to_owned())
    }

    // ---------------------------------------------------------------------
    // Per-object operations

    pub fn show(&mut self, tag: &str) -> ShapeResult<()> {
        let id = self.id_of(tag)?;
        if let Some(object) = self.objects.get_mut(&id) {
            object.show(&mut self.surface);
        }
        Ok(())
    }

    pub fn hide(&mut self, tag: &str) -> ShapeResult<()> {
        let id = self.id_of(tag)?;
        if let Some(object) = self.objects.get_mut(&id) {
            object.hide(&mut self.surface);
        }
        Ok(())
    }

    /// Opt `tag` in to pointer gestures and hover. Returns `false` if it was
    /// already bound.
    pub fn add_mouse_bindings(&mut self, tag: &str) -> ShapeResult<bool> {
        let bound = self.require_mut(tag)?.add_mouse_bindings();
        if !bound {
            log::debug!("{tag} already has mouse bindings");
        }
        Ok(bound)
    }

    pub fn set_outline_width(&mut self, tag: &str, width: f32) -> ShapeResult<()> {
        let id = self.id_of(tag)?;
        if let Some(object) = self.objects.get_mut(&id) {
            object.set_outline_width(&mut self.surface, width);
        }
        Ok(())
    }

    pub fn set_active_outline_width(&mut self, tag: &str, width: f32) -> ShapeResult<()> {
        let id = self.id_of(tag)?;
        if let Some(object) = self.objects.get_mut(&id) {
            object.set_active_outline_width(&mut self.surface, width);
        }
        Ok(())
    }

    /// Move an object and redraw every wire attached to it.
    pub fn move_object(&mut self, tag: &str, delta: Vec2) -> ShapeResult<()> {
        let id = self.id_of(tag)?;
        if let Some(object) = self.objects.get_mut(&id) {
            object.move_by(&mut self.surface, delta);
        }
        self.update_wires_of(&[id]);
        Ok(())
    }

    /// Scale an object about its own position, outline widths included.
    pub fn scale_object(&mut self, tag: &str, factor: f32) -> ShapeResult<()> {
        if !(factor.is_finite() && factor > 0.0) {
            return Err(ShapeError::invalid_args(
                tag,
                format!("scale factor must be positive, got {factor}"),
            ));
        }
        let id = self.id_of(tag)?;
        if let Some(object) = self.objects.get_mut(&id) {
            let origin = object.position();
            object.scale(&mut self.surface, origin, factor);
        }
        self.update_wires_of(&[id]);
        Ok(())
    }

    pub fn select(&mut self, tag: &str) -> ShapeResult<()> {
        let id = self.id_of(tag)?;
        if let Some(object) = self.objects.get_mut(&id) {
            object.set_selected(&mut self.surface);
        }
        self.selection_changed();
        Ok(())
    }

    pub fn deselect(&mut self, tag: &str) -> ShapeResult<()> {
        let id = self.id_of(tag)?;
        if let Some(object) = self.objects.get_mut(&id) {
            object.clear_selected(&mut self.surface);
        }
        self.selection_changed();
        Ok(())
    }

    pub fn toggle_selected(&mut self, tag: &str) -> ShapeResult<bool> {
        let id = self.id_of(tag)?;
        let selected = self.toggle_selected_by_id(id);
        Ok(selected)
    }

    fn toggle_selected_by_id(&mut self, id: ObjectId) -> bool {
        let selected = match self.objects.get_mut(&id) {
            Some(object) => {
                object.toggle_selected(&mut self.surface);
                object.is_selected()
            }
            None => false,
        };
        self.selection_changed();
        selected
    }

    /// Deselect every object.
    pub fn clear_selection(&mut self) {
        for object in self.objects.values_mut() {
            if object.is_selected() {
                object.clear_selected(&mut self.surface);
            }
        }
        self.selection_changed();
    }

    fn selection_changed(&mut self) {
        let selected = self.selected_tags();
        self.emit(CanvasEvent::SelectionChanged { selected });
    }

    /// Lift an object to the top of the stacking order, keeping the wires
    /// attached to it above it.
    pub fn raise(&mut self, tag: &str) -> ShapeResult<()> {
        let id = self.id_of(tag)?;
        self.raise_with_neighbors(id);
        Ok(())
    }

    fn raise_with_neighbors(&mut self, id: ObjectId) {
        if let Some(object) = self.objects.get(&id) {
            object.raise_up(&mut self.surface);
        }
        for wire in self.neighbor_wires(id) {
            if let Some(wire) = self.objects.get(&wire) {
                wire.raise_always_on_top(&mut self.surface);
            }
        }
    }

    /// Flip a toggleable object. Returns the new state.
    pub fn toggle(&mut self, tag: &str) -> ShapeResult<bool> {
        let id = self.id_of(tag)?;
        self.toggle_by_id(id)
    }

    fn toggle_by_id(&mut self, id: ObjectId) -> ShapeResult<bool> {
        let on = !self.toggleable(id)?.is_on();
        self.apply_state_of(id, on);
        Ok(on)
    }

    /// Drive a toggleable object to `on`. Returns `false`, with nothing
    /// emitted or animated, when it is already in that state.
    pub fn set_state(&mut self, tag: &str, on: bool) -> ShapeResult<bool> {
        let id = self.id_of(tag)?;
        if self.toggleable(id)?.is_on() == on {
            return Ok(false);
        }
        self.apply_state_of(id, on);
        Ok(true)
    }

    fn toggleable(&self, id: ObjectId) -> ShapeResult<&Object> {
        let object = self
            .objects
            .get(&id)
            .ok_or_else(|| ShapeError::UnknownObject(id.to_string()))?;
        if !object.behavior().is_toggleable() {
            return Err(ShapeError::invalid_args(object.kind(), "not toggleable"));
        }
        Ok(object)
    }

    fn apply_state_of(&mut self, id: ObjectId, on: bool) {
        self.finish_animation_of(id);
        let steps = self.config.slider_steps.max(1);
        let zoom = self.zoom_level;
        let Some(object) = self.objects.get_mut(&id) else {
            return;
        };
        if let Some(travel) = object.apply_state(&mut self.surface, on, zoom) {
            if let Some(primitive) = object.item("slider_switch").and_then(Item::primitive) {
                self.animations.push(SlideAnimation {
                    object: id,
                    primitive,
                    step: travel / steps as f32,
                    remaining: steps,
                });
            }
        }
        let tag = object.tag().to_owned();
        log::info!("Toggled {tag} {}", if on { "on" } else { "off" });
        self.emit(CanvasEvent::Toggled { tag, on });
    }

    // ---------------------------------------------------------------------
    // Hover

    /// Pointer entered `primitive`: raise its object (and the wires touching
    /// it) and highlight the item with its highlight group.
    ///
    /// Returns `false` when the primitive does not resolve to a hoverable item.
    pub fn enter_item(&mut self, primitive: PrimitiveId) -> bool {
        self.set_hover(primitive, true)
    }

    pub fn leave_item(&mut self, primitive: PrimitiveId) -> bool {
        self.set_hover(primitive, false)
    }

    fn set_hover(&mut self, primitive: PrimitiveId, entered: bool) -> bool {
        let Some((id, name)) = self.hit_index.get(&primitive).cloned() else {
            return false;
        };
        let Some(object) = self.objects.get(&id) else {
            return false;
        };
        if object.flags().background {
            return false;
        }
        let raisable = object.item(&name).is_some_and(|item| item.flags().raisable);
        if entered && raisable {
            self.raise_with_neighbors(id);
        }
        if let Some(object) = self.objects.get_mut(&id) {
            if object.flags().highlightable {
                object.set_highlighted(&mut self.surface, &name, entered);
            }
        }
        true
    }

    // ---------------------------------------------------------------------
    // Events and status

    pub fn poll_event(&mut self) -> Option<EventEnvelope> {
        self.events.get()
    }

    pub fn events(&self) -> &EventQueue {
        &self.events
    }

    fn emit(&mut self, event: CanvasEvent) {
        let id = self.event_ids.generate();
        self.events.put(EventEnvelope { id, event });
    }

    /// Receive human readable progress messages during gestures.
    pub fn register_status_sink(&mut self, sink: StatusSink) {
        self.status_sink = Some(sink);
    }

    fn status(&mut self, message: &str) {
        if let Some(sink) = self.status_sink.as_mut() {
            sink(message);
        }
    }

    fn extent(&self) -> Rect {
        self.surface.bbox(self.background).unwrap_or_else(|| {
            Rect::from_min_size(Pos2::ZERO, Vec2::new(self.config.width, self.config.height))
        })
    }
}
