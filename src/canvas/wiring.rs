//! Connecting nodes, keeping wires on their endpoints, and teardown.

use egui::Pos2;

use super::Canvas;
use crate::error::{ShapeError, ShapeResult};
use crate::event::CanvasEvent;
use crate::geometry::smooth_coords;
use crate::node::{ConnectionId, NodeId};
use crate::object::ObjectId;

impl Canvas {
    /// Join nodes `a` and `b` through the connection owned by the wire `wire`.
    ///
    /// Every precondition is checked before anything changes, so a rejected
    /// call leaves the wire and both nodes as they were.
    pub fn connect(&mut self, wire: &str, a: NodeId, b: NodeId) -> ShapeResult<ConnectionId> {
        let id = self.id_of(wire)?;
        self.connect_by_id(id, a, b)
    }

    pub(super) fn connect_by_id(
        &mut self,
        wire: ObjectId,
        a: NodeId,
        b: NodeId,
    ) -> ShapeResult<ConnectionId> {
        let object = self
            .objects
            .get(&wire)
            .ok_or_else(|| ShapeError::UnknownObject(wire.to_string()))?;
        let tag = object.tag().to_owned();
        let connection = match object.connection() {
            Some(connection) if object.flags().connector => connection,
            _ => return Err(ShapeError::NotAConnector(tag)),
        };
        let pending = self
            .connections
            .get(&connection)
            .ok_or_else(|| ShapeError::NotAConnector(tag.clone()))?;
        if !pending.nodes().is_empty() {
            return Err(ShapeError::ConnectionFull(tag));
        }
        if a == b {
            return Err(ShapeError::invalid_args(&tag, "cannot connect a node to itself"));
        }
        for node in [a, b] {
            self.nodes
                .get(&node)
                .ok_or_else(|| ShapeError::UnknownNode {
                    object: tag.clone(),
                    node: node.to_string(),
                })?
                .check_capacity()?;
        }

        if let Some(pending) = self.connections.get_mut(&connection) {
            pending.set_endpoints(a, b);
        }
        for node in [a, b] {
            if let Some(node) = self.nodes.get_mut(&node) {
                node.attach(connection);
            }
        }
        log::info!("Connected {a} to {b} through {tag}");
        self.emit(CanvasEvent::Connected {
            wire: tag,
            connection,
            from: a,
            to: b,
        });
        Ok(connection)
    }

    /// Redraw a wire from the live centers of its endpoint items.
    ///
    /// Returns `false` while the wire's connection is still pending.
    pub fn update_wire(&mut self, wire: &str) -> ShapeResult<bool> {
        let id = self.id_of(wire)?;
        Ok(self.redraw_wire(id))
    }

    pub(super) fn redraw_wire(&mut self, wire: ObjectId) -> bool {
        let Some(endpoints) = self.wire_endpoint_centers(wire) else {
            return false;
        };
        let offset = self.config.wire_curve_offset * self.zoom_level;
        let coords = smooth_coords(endpoints[0], endpoints[1], offset);
        match self.objects.get_mut(&wire) {
            Some(object) => {
                object.redraw_wire(&mut self.surface, endpoints, coords);
                true
            }
            None => false,
        }
    }

    fn wire_endpoint_centers(&self, wire: ObjectId) -> Option<[Pos2; 2]> {
        let connection = self.objects.get(&wire)?.connection()?;
        let (a, b) = self.connections.get(&connection)?.endpoints()?;
        Some([self.node_center(a)?, self.node_center(b)?])
    }

    /// Center of the item a node is attached to.
    pub fn node_center(&self, node: NodeId) -> Option<Pos2> {
        let node = self.nodes.get(&node)?;
        self.objects
            .get(&node.object())?
            .item(node.item())?
            .center_point(&self.surface)
    }

    /// Wires attached to any node of `object`.
    pub(super) fn neighbor_wires(&self, object: ObjectId) -> Vec<ObjectId> {
        let mut wires = Vec::new();
        let Some(object) = self.objects.get(&object) else {
            return wires;
        };
        let connections = object
            .nodes()
            .iter()
            .filter_map(|slot| self.nodes.get(&slot.id))
            .flat_map(|node| node.connections());
        for connection in connections {
            if let Some(connection) = self.connections.get(connection) {
                if !wires.contains(&connection.owner()) {
                    wires.push(connection.owner());
                }
            }
        }
        wires
    }

    pub(super) fn update_wires_of(&mut self, objects: &[ObjectId]) {
        let mut wires = Vec::new();
        for object in objects {
            for wire in self.neighbor_wires(*object) {
                if !wires.contains(&wire) {
                    wires.push(wire);
                }
            }
        }
        for wire in wires {
            self.redraw_wire(wire);
        }
    }

    /// Remove an object and everything it rendered.
    ///
    /// Wires attached to its nodes are destroyed with it. Destroying a wire
    /// releases both of its nodes.
    pub fn destroy(&mut self, tag: &str) -> ShapeResult<()> {
        let id = self.id_of(tag)?;
        for wire in self.neighbor_wires(id) {
            if wire != id {
                self.destroy_by_id(wire);
            }
        }
        self.destroy_by_id(id);
        Ok(())
    }

    fn destroy_by_id(&mut self, id: ObjectId) {
        self.abandon_gesture_on(id);
        self.animations.retain(|animation| animation.object != id);
        let Some(mut object) = self.objects.remove(&id) else {
            return;
        };

        for primitive in object.primitives() {
            self.hit_index.remove(&primitive);
            if self.hovered == Some(primitive) {
                self.hovered = None;
            }
        }
        object.destroy(&mut self.surface);

        for slot in object.nodes() {
            if let Some(node) = self.nodes.remove(&slot.id) {
                for connection in node.connections() {
                    self.release_connection(*connection);
                }
            }
        }
        if let Some(connection) = object.connection() {
            if let Some(connection) = self.connections.remove(&connection) {
                for node in connection.nodes() {
                    if let Some(node) = self.nodes.get_mut(node) {
                        node.detach(connection.id());
                    }
                }
            }
        }

        let tag = object.tag().to_owned();
        self.tags.remove(&tag);
        log::info!("Destroyed {tag}");
        self.emit(CanvasEvent::ObjectDestroyed { tag });
        if object.is_selected() {
            self.selection_changed();
        }
    }

    /// Empty a connection whose node went away. Its wire stays, pending.
    fn release_connection(&mut self, connection: ConnectionId) {
        let Some(released) = self.connections.get_mut(&connection) else {
            return;
        };
        let nodes = released.nodes().to_vec();
        released.clear();
        for node in nodes {
            if let Some(node) = self.nodes.get_mut(&node) {
                node.detach(connection);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::CanvasConfig;
    use crate::error::ShapeError;
    use crate::registry::ShapeArgs;
    use crate::Canvas;
    use egui::pos2;

    #[test]
    fn a_node_cannot_feed_itself() {
        let mut canvas = Canvas::with_builtins(CanvasConfig::default());
        canvas
            .create("GNotGate", ShapeArgs::new("not").at(0.0, 0.0))
            .unwrap();
        canvas
            .create("GWire", ShapeArgs::new("w").endpoints(pos2(0.0, 0.0), pos2(1.0, 1.0)))
            .unwrap();
        let output = canvas.node("not", "output").unwrap();
        let err = canvas.connect("w", output, output).unwrap_err();
        assert!(matches!(err, ShapeError::InvalidArguments { .. }));
        assert!(canvas.node_info(output).unwrap().has_capacity());
    }

    #[test]
    fn only_wires_connect() {
        let mut canvas = Canvas::with_builtins(CanvasConfig::default());
        canvas
            .create("GNotGate", ShapeArgs::new("a").at(0.0, 0.0))
            .unwrap();
        canvas
            .create("GNotGate", ShapeArgs::new("b").at(200.0, 0.0))
            .unwrap();
        let out = canvas.node("a", "output").unwrap();
        let input = canvas.node("b", "input").unwrap();
        assert!(matches!(
            canvas.connect("a", out, input),
            Err(ShapeError::NotAConnector(tag)) if tag == "a"
        ));
    }

    #[test]
    fn pending_wires_do_not_redraw() {
        let mut canvas = Canvas::with_builtins(CanvasConfig::default());
        canvas
            .create("GWire", ShapeArgs::new("w").endpoints(pos2(0.0, 0.0), pos2(1.0, 1.0)))
            .unwrap();
        assert!(!canvas.update_wire("w").unwrap());
    }
}
