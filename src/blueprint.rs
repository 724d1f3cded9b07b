//! Declarative description of an object, produced by shape constructors and
//! realized by the canvas.

use egui::Pos2;

use crate::item::Item;
use crate::object::{Behavior, ObjectFlags};

/// A node to create once the object's items exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeDecl {
    /// Lookup key, e.g. `"input_1"`.
    pub key: String,
    /// Human readable name, e.g. `"GAndGate Input 1"`.
    pub label: String,
    /// Item the node is attached to.
    pub item: String,
}

#[derive(Debug, Clone)]
pub struct Blueprint {
    pub position: Pos2,
    /// Realized bottom to top, in this order.
    pub items: Vec<Item>,
    pub nodes: Vec<NodeDecl>,
    pub flags: ObjectFlags,
    pub behavior: Behavior,
    /// Built at zoom 1 and scaled to the current zoom on creation.
    pub scale_with_zoom: bool,
    pub wire_endpoints: Option<[Pos2; 2]>,
}

impl Blueprint {
    pub fn new(position: Pos2) -> Self {
        Self {
            position,
            items: Vec::new(),
            nodes: Vec::new(),
            flags: ObjectFlags::default(),
            behavior: Behavior::Static,
            scale_with_zoom: true,
            wire_endpoints: None,
        }
    }

    pub fn with_item(mut self, item: Item) -> Self {
        self.items.push(item);
        self
    }

    pub fn with_items(mut self, items: impl IntoIterator<Item = Item>) -> Self {
        self.items.extend(items);
        self
    }

    /// Attach a node to `item` and mark the object connectable.
    pub fn with_node(
        mut self,
        key: impl Into<String>,
        label: impl Into<String>,
        item: impl Into<String>,
    ) -> Self {
        self.nodes.push(NodeDecl {
            key: key.into(),
            label: label.into(),
            item: item.into(),
        });
        self.flags.connectable = true;
        self
    }

    pub fn with_flags(mut self, edit: impl FnOnce(&mut ObjectFlags)) -> Self {
        edit(&mut self.flags);
        self
    }

    pub fn with_behavior(mut self, behavior: Behavior) -> Self {
        self.behavior = behavior;
        self
    }

    /// A wire between two points. Wire geometry is already built for the
    /// current zoom, so it is not rescaled on creation.
    pub fn connector(mut self, start: Pos2, end: Pos2) -> Self {
        self.flags.connector = true;
        self.flags.selectable = false;
        self.flags.draggable = false;
        self.scale_with_zoom = false;
        self.wire_endpoints = Some([start, end]);
        self
    }

    /// Exempt from hover, selection and hit lookups.
    pub fn background(mut self) -> Self {
        self.flags.background = true;
        self.flags.selectable = false;
        self.flags.highlightable = false;
        self.flags.draggable = false;
        self
    }

    pub fn item(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.name() == name)
    }
}
